pub mod request {
    pub use crate::modules::auth::middleware::Auth;

    pub struct Payload {
        pub auth: Auth,
        pub id: String,
    }
}

pub mod response {
    use crate::modules::booking::repository::FullBooking;
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        Booking(FullBooking),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::Booking(booking) => {
                    (StatusCode::OK, Json(json!({ "booking": booking }))).into_response()
                }
            }
        }
    }

    pub enum Error {
        BookingNotFound,
        FailedToFetchBooking,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::BookingNotFound => (
                    StatusCode::NOT_FOUND,
                    Json(json!({ "error": "Booking not found" })),
                )
                    .into_response(),
                Self::FailedToFetchBooking => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "An error occurred while fetching booking" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
