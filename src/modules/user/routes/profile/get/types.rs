pub mod request {
    pub use crate::modules::auth::middleware::Auth;

    pub struct Payload {
        pub auth: Auth,
    }
}

pub mod response {
    use crate::modules::{address::repository::Address, user::repository::User};
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        Profile {
            user: User,
            address: Option<Address>,
        },
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::Profile { user, address } => (
                    StatusCode::OK,
                    Json(json!({
                        "id": user.id,
                        "email": user.email,
                        "name": user.name,
                        "phone": user.phone,
                        "address": address,
                    })),
                )
                    .into_response(),
            }
        }
    }

    pub enum Error {
        FailedToFetchAddress,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::FailedToFetchAddress => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to fetch address" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
