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
        BookingCancelled(FullBooking),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::BookingCancelled(booking) => (
                    StatusCode::OK,
                    Json(json!({
                        "message": "Booking cancelled successfully",
                        "booking": booking,
                    })),
                )
                    .into_response(),
            }
        }
    }

    pub enum Error {
        BookingNotFound,
        NotPending,
        FailedToCancelBooking,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::BookingNotFound => (
                    StatusCode::NOT_FOUND,
                    Json(json!({ "error": "Booking not found" })),
                )
                    .into_response(),
                Self::NotPending => (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": "Only pending bookings can be cancelled" })),
                )
                    .into_response(),
                Self::FailedToCancelBooking => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "An error occurred while cancelling booking" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
