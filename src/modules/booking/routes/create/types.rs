pub mod request {
    pub use crate::modules::auth::middleware::Auth;
    use serde::Deserialize;

    #[derive(Deserialize, Default)]
    pub struct Body {
        pub waste_category: Option<String>,
        pub waste_types: Option<Vec<String>>,
        pub quantity: Option<String>,
        pub pickup_date: Option<String>,
        pub additional_notes: Option<String>,
        pub images: Option<Vec<String>>,
    }

    pub struct Payload {
        pub auth: Auth,
        pub body: Body,
    }
}

pub mod response {
    use crate::modules::booking::repository::FullBooking;
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        BookingCreated(FullBooking),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::BookingCreated(booking) => (
                    StatusCode::CREATED,
                    Json(json!({
                        "message": "Booking created successfully",
                        "booking": booking,
                    })),
                )
                    .into_response(),
            }
        }
    }

    #[derive(Debug, PartialEq)]
    pub enum Error {
        MissingField(&'static str),
        InvalidWasteCategory,
        NoWasteTypes,
        MissingQuantity,
        InvalidPickupDate,
        PickupDateInPast,
        InvalidImage,
        NoAddress,
        FailedToCreateBooking,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            let (status, message) = match self {
                Self::MissingField(field) => {
                    (StatusCode::BAD_REQUEST, format!("{} is required", field))
                }
                Self::InvalidWasteCategory => (
                    StatusCode::BAD_REQUEST,
                    "Valid waste category is required".to_string(),
                ),
                Self::NoWasteTypes => (
                    StatusCode::BAD_REQUEST,
                    "At least one waste type must be selected".to_string(),
                ),
                Self::MissingQuantity => {
                    (StatusCode::BAD_REQUEST, "Quantity is required".to_string())
                }
                Self::InvalidPickupDate => (
                    StatusCode::BAD_REQUEST,
                    "Invalid pickup date format".to_string(),
                ),
                Self::PickupDateInPast => (
                    StatusCode::BAD_REQUEST,
                    "Pickup date cannot be in the past".to_string(),
                ),
                Self::InvalidImage => (StatusCode::BAD_REQUEST, "Invalid image format".to_string()),
                Self::NoAddress => (
                    StatusCode::BAD_REQUEST,
                    "Please add an address before booking pickup".to_string(),
                ),
                Self::FailedToCreateBooking => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An error occurred while creating booking".to_string(),
                ),
            };

            (status, Json(json!({ "error": message }))).into_response()
        }
    }

    pub type Response = Result<Success, Error>;
}
