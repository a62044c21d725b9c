use super::{service::service, types::request};
use crate::{types::Context, utils::json::Json};
use axum::{
    extract::{Path, State},
    response::IntoResponse,
};
use std::sync::Arc;

pub async fn handler(
    auth: request::Auth,
    Path(id): Path<String>,
    State(ctx): State<Arc<Context>>,
    Json(body): Json<request::Body>,
) -> impl IntoResponse {
    service(ctx, request::Payload { auth, id, body }).await
}
