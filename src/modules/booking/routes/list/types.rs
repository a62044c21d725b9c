pub mod request {
    pub use crate::modules::auth::middleware::Auth;
    pub use crate::modules::booking::repository::Filters;
    use crate::utils::pagination::Pagination;

    pub struct Payload {
        pub auth: Auth,
        pub pagination: Pagination,
        pub filters: Filters,
    }
}

pub mod response {
    use crate::{modules::booking::repository::FullBooking, utils::pagination::Paginated};
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        Bookings(Paginated<FullBooking>),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::Bookings(bookings) => {
                    let mut body = json!({
                        "bookings": bookings.items,
                        "total": bookings.total,
                    });
                    if let Some(meta) = bookings.meta {
                        body["meta"] = json!(meta);
                    }
                    (StatusCode::OK, Json(body)).into_response()
                }
            }
        }
    }

    pub enum Error {
        FailedToFetchBookings,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::FailedToFetchBookings => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "An error occurred while fetching bookings" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
