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
        AddressDeleted,
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::AddressDeleted => (
                    StatusCode::OK,
                    Json(json!({ "message": "Address deleted successfully" })),
                )
                    .into_response(),
            }
        }
    }

    pub enum Error {
        AddressNotFound,
        OnlyAddress,
        FailedToDeleteAddress,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::AddressNotFound => (
                    StatusCode::NOT_FOUND,
                    Json(json!({ "error": "Address not found" })),
                )
                    .into_response(),
                Self::OnlyAddress => (
                    StatusCode::BAD_REQUEST,
                    Json(json!({
                        "error": "Cannot delete the only address. Please add another address first."
                    })),
                )
                    .into_response(),
                Self::FailedToDeleteAddress => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "An error occurred while deleting address" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
