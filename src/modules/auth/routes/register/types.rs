pub mod request {
    use crate::utils::validation::{validate_not_blank, validate_phone};
    use serde::Deserialize;
    use validator::Validate;

    #[derive(Deserialize, Validate)]
    pub struct Payload {
        #[validate(email(code = "INVALID_USER_EMAIL", message = "Invalid email address"))]
        pub email: Option<String>,
        #[validate(custom(function = "validate_not_blank"))]
        pub name: Option<String>,
        #[validate(custom(function = "validate_phone"))]
        pub phone: Option<String>,
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
        Registered {
            user: User,
            token: String,
            cookie: Cookie<'static>,
        },
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::Registered {
                    user,
                    token,
                    cookie,
                } => (
                    StatusCode::CREATED,
                    CookieJar::new().add(cookie),
                    Json(json!({
                        "message": "Registration successful",
                        "user": PublicUser::from(user),
                        "token": token,
                    })),
                )
                    .into_response(),
            }
        }
    }

    pub enum Error {
        MissingFields,
        FailedToValidate(ValidationErrors),
        FailedToFetchUser,
        UserAlreadyExists,
        SignupFailed,
        FailedToCreateSession,
        UnexpectedError,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::MissingFields => (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": "Email and name are required" })),
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
                Self::UserAlreadyExists => (
                    StatusCode::CONFLICT,
                    Json(json!({ "error": "User already exists" })),
                )
                    .into_response(),
                Self::SignupFailed => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Sign up failed!" })),
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
