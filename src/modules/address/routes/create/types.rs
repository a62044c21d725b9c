pub mod request {
    pub use crate::modules::auth::middleware::Auth;
    use crate::utils::validation::{validate_not_blank, validate_pincode};
    use serde::Deserialize;
    use validator::Validate;

    #[derive(Deserialize, Validate)]
    pub struct Body {
        #[validate(
            custom(function = "validate_not_blank"),
            length(max = 250, message = "Address is too long")
        )]
        pub address: Option<String>,
        #[validate(custom(function = "validate_pincode"))]
        pub pincode: Option<String>,
        #[validate(length(max = 500, message = "Maps link is too long"))]
        pub maps_link: Option<String>,
        #[validate(length(max = 50))]
        pub city: Option<String>,
        #[validate(length(max = 50))]
        pub state: Option<String>,
    }

    pub struct Payload {
        pub auth: Auth,
        pub body: Body,
    }
}

pub mod response {
    use crate::{modules::address::repository::Address, utils};
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;
    use validator::ValidationErrors;

    pub enum Success {
        AddressCreated(Address),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::AddressCreated(address) => (
                    StatusCode::CREATED,
                    Json(json!({
                        "message": "Address added successfully",
                        "address": address,
                    })),
                )
                    .into_response(),
            }
        }
    }

    pub enum Error {
        MissingField(&'static str),
        FailedToValidate(ValidationErrors),
        FailedToCreateAddress,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::MissingField(field) => (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": format!("{} is required", field) })),
                )
                    .into_response(),
                Self::FailedToValidate(errors) => {
                    utils::validation::into_response(errors).into_response()
                }
                Self::FailedToCreateAddress => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to add address" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
