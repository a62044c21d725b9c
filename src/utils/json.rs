use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// `axum::Json` with rejections rendered as `400 {"error": ...}` instead of
/// axum's plain-text 415/422 responses.
pub struct Json<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for Json<T>
where
    axum::Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match axum::Json::<T>::from_request(req, state).await {
            Ok(axum::Json(value)) => Ok(Self(value)),
            Err(rejection) => {
                let message = rejection.body_text();
                tracing::warn!("Rejected request body: {}", message);
                Err((StatusCode::BAD_REQUEST, axum::Json(json!({ "error": message }))).into_response())
            }
        }
    }
}
