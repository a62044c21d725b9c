pub mod request {
    use crate::utils::validation::validate_not_blank;
    use serde::Deserialize;
    use validator::Validate;

    #[derive(Deserialize, Validate)]
    pub struct Payload {
        #[validate(email(code = "INVALID_USER_EMAIL", message = "Invalid email address"))]
        pub email: Option<String>,
        #[validate(custom(function = "validate_not_blank"))]
        pub otp: Option<String>,
    }
}

pub mod response {
    use crate::{
        modules::user::repository::{PublicUser, User},
        utils,
    };
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use axum_extra::extract::{cookie::Cookie, CookieJar};
    use serde_json::json;
    use validator::ValidationErrors;

    pub enum Success {
        LoggedIn {
            user: User,
            is_new_user: bool,
            token: String,
            cookie: Cookie<'static>,
        },
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::LoggedIn {
                    user,
                    is_new_user,
                    token,
                    cookie,
                } => (
                    StatusCode::OK,
                    CookieJar::new().add(cookie),
                    Json(json!({
                        "message": "Login successful",
                        "user": PublicUser::from(user),
                        "is_new_user": is_new_user,
                        "token": token,
                    })),
                )
                    .into_response(),
            }
        }
    }

    pub enum Error {
        MissingCredentials,
        FailedToValidate(ValidationErrors),
        FailedToFetchUser,
        UserNotFound,
        InvalidOtp,
        FailedToCreateSession,
        UnexpectedError,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::MissingCredentials => (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": "Email and OTP are required" })),
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
                Self::UserNotFound => (
                    StatusCode::NOT_FOUND,
                    Json(json!({ "error": "User not found" })),
                )
                    .into_response(),
                Self::InvalidOtp => (
                    StatusCode::UNAUTHORIZED,
                    Json(json!({ "error": "Invalid OTP" })),
                )
                    .into_response(),
                Self::FailedToCreateSession => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to create session" })),
                )
                    .into_response(),
                Self::UnexpectedError => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Sorry an error occurred" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
