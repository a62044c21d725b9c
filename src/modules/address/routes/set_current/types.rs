pub mod request {
    pub use crate::modules::auth::middleware::Auth;

    pub struct Payload {
        pub auth: Auth,
        pub id: String,
    }
}

pub mod response {
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        CurrentAddressSet,
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::CurrentAddressSet => (
                    StatusCode::OK,
                    Json(json!({ "message": "Address set as current successfully" })),
                )
                    .into_response(),
            }
        }
    }

    pub enum Error {
        AddressNotFound,
        FailedToSetCurrentAddress,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::AddressNotFound => (
                    StatusCode::NOT_FOUND,
                    Json(json!({ "error": "Address not found" })),
                )
                    .into_response(),
                Self::FailedToSetCurrentAddress => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to set current address" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
