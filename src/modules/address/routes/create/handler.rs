use super::{service::service, types::request};
use crate::types::Context;
use crate::utils::json::Json;
use axum::{extract::State, response::IntoResponse};
use std::sync::Arc;

pub async fn handler(
    auth: request::Auth,
    State(ctx): State<Arc<Context>>,
    Json(body): Json<request::Body>,
) -> impl IntoResponse {
    service(ctx, request::Payload { auth, body }).await
}
