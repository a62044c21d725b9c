pub mod request {
    pub use crate::modules::auth::middleware::Auth;

    pub struct Payload {
        pub auth: Auth,
    }
}

pub mod response {
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        Stats {
            total_bookings: i64,
            completed_bookings: i64,
            total_addresses: i64,
        },
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::Stats {
                    total_bookings,
                    completed_bookings,
                    total_addresses,
                } => (
                    StatusCode::OK,
                    Json(json!({
                        "total_bookings": total_bookings,
                        "completed_bookings": completed_bookings,
                        "total_addresses": total_addresses,
                    })),
                )
                    .into_response(),
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
                    Json(json!({ "error": "Failed to fetch statistics" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
