pub mod request {
    pub use crate::modules::auth::middleware::Auth;
    use serde::Deserialize;

    #[derive(Deserialize, Default)]
    pub struct Body {
        pub pickup_date: Option<String>,
        pub additional_notes: Option<String>,
        pub waste_types: Option<Vec<String>>,
        pub quantity: Option<String>,
    }

    pub struct Payload {
        pub auth: Auth,
        pub id: String,
        pub body: Body,
    }
}

pub mod response {
    use crate::modules::booking::repository::FullBooking;
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        BookingUpdated(FullBooking),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::BookingUpdated(booking) => (
                    StatusCode::OK,
                    Json(json!({
                        "message": "Booking updated successfully",
                        "booking": booking,
                    })),
                )
                    .into_response(),
            }
        }
    }

    #[derive(Debug)]
    pub enum Error {
        BookingNotFound,
        NotPending,
        InvalidPickupDate,
        PickupDateInPast,
        NoWasteTypes,
        MissingQuantity,
        FailedToUpdateBooking,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            let (status, message) = match self {
                Self::BookingNotFound => (StatusCode::NOT_FOUND, "Booking not found"),
                Self::NotPending => (
                    StatusCode::BAD_REQUEST,
                    "Only pending bookings can be updated",
                ),
                Self::InvalidPickupDate => (StatusCode::BAD_REQUEST, "Invalid pickup date format"),
                Self::PickupDateInPast => (
                    StatusCode::BAD_REQUEST,
                    "Pickup date cannot be in the past",
                ),
                Self::NoWasteTypes => (
                    StatusCode::BAD_REQUEST,
                    "At least one waste type must be selected",
                ),
                Self::MissingQuantity => (StatusCode::BAD_REQUEST, "Quantity is required"),
                Self::FailedToUpdateBooking => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An error occurred while updating booking",
                ),
            };

            (status, Json(json!({ "error": message }))).into_response()
        }
    }

    pub type Response = Result<Success, Error>;
}
