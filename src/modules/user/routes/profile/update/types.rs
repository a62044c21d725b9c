pub mod request {
    pub use crate::modules::auth::middleware::Auth;
    use crate::utils::validation::{validate_not_blank, validate_phone};
    use serde::Deserialize;
    use validator::Validate;

    #[derive(Deserialize, Validate)]
    pub struct Body {
        #[validate(custom(function = "validate_not_blank"))]
        pub name: Option<String>,
        #[validate(custom(function = "validate_phone"))]
        pub phone: Option<String>,
    }

    pub struct Payload {
        pub auth: Auth,
        pub body: Body,
    }
}

pub mod response {
    use crate::{
        modules::user::repository::{PublicUser, User},
        utils,
    };
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;
    use validator::ValidationErrors;

    pub enum Success {
        ProfileUpdated(User),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::ProfileUpdated(user) => (
                    StatusCode::OK,
                    Json(json!({
                        "message": "Profile updated successfully",
                        "user": PublicUser::from(user),
                    })),
                )
                    .into_response(),
            }
        }
    }

    pub enum Error {
        FailedToValidate(ValidationErrors),
        FailedToUpdateUser,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::FailedToValidate(errors) => {
                    utils::validation::into_response(errors).into_response()
                }
                Self::FailedToUpdateUser => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to update profile" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
