pub mod request {
    use serde::Deserialize;
    use validator::Validate;

    #[derive(Deserialize, Validate)]
    pub struct Payload {
        #[validate(email(code = "INVALID_USER_EMAIL", message = "Invalid email address"))]
        pub email: Option<String>,
    }
}

pub mod response {
    use crate::utils;
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;
    use validator::ValidationErrors;

    pub enum Success {
        OtpSent,
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::OtpSent => (
                    StatusCode::OK,
                    Json(json!({"message": "OTP sent successfully"})),
                )
                    .into_response(),
            }
        }
    }

    pub enum Error {
        MissingEmail,
        FailedToValidate(ValidationErrors),
        FailedToFetchUser,
        FailedToCreateUser,
        FailedToStoreOtp,
        FailedToSendOtp,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::MissingEmail => (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": "Email is required" })),
                )
                    .into_response(),
                Self::FailedToValidate(errors) => {
                    utils::validation::into_response(errors).into_response()
                }
                Self::FailedToFetchUser => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to fetch user" })),
                )
                    .into_response(),
                Self::FailedToCreateUser => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to create user" })),
                )
                    .into_response(),
                Self::FailedToStoreOtp => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to store OTP" })),
                )
                    .into_response(),
                Self::FailedToSendOtp => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to send OTP email" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
