pub mod request {
    pub use crate::modules::auth::middleware::Auth;

    pub struct Payload {
        pub auth: Auth,
    }
}

pub mod response {
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use axum_extra::extract::{cookie::Cookie, CookieJar};
    use serde_json::json;

    pub enum Success {
        LoggedOut(Cookie<'static>),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::LoggedOut(cookie) => (
                    StatusCode::OK,
                    CookieJar::new().add(cookie),
                    Json(json!({"message": "Logged out successfully"})),
                )
                    .into_response(),
            }
        }
    }

    pub enum Error {
        FailedToLogout,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::FailedToLogout => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to log out" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
