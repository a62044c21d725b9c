pub mod request {
    pub use crate::modules::auth::middleware::Auth;

    pub struct Payload {
        pub auth: Auth,
    }
}

pub mod response {
    use crate::modules::booking::repository::BookingStats;
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        Stats(BookingStats),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::Stats(stats) => (StatusCode::OK, Json(json!(stats))).into_response(),
            }
        }
    }

    pub enum Error {
        FailedToFetchStats,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::FailedToFetchStats => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "An error occurred while fetching statistics" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
