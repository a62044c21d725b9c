pub mod request {
    pub use crate::modules::auth::middleware::Auth;

    pub struct Payload {
        pub auth: Auth,
    }
}

pub mod response {
    use crate::modules::address::repository::Address;
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        Addresses(Vec<Address>),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::Addresses(addresses) => (
                    StatusCode::OK,
                    Json(json!({ "total": addresses.len(), "addresses": addresses })),
                )
                    .into_response(),
            }
        }
    }

    pub enum Error {
        FailedToFetchAddresses,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::FailedToFetchAddresses => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to fetch addresses" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
