use axum::{http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde_json::json;

use super::{auth, booking, user};
use crate::types::Context;
use std::sync::Arc;

pub async fn health_check() -> impl IntoResponse {
    tracing::debug!("Health check endpoint called");

    (
        StatusCode::OK,
        Json(json!({ "status": "healthy", "message": "Waste Collection API is running" })),
    )
}

pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "Not found" })))
}

pub fn get_router() -> Router<Arc<Context>> {
    Router::new()
        .route("/health", get(health_check))
        .nest("/auth", auth::routes::get_router())
        .nest("/users", user::routes::get_router())
        .nest("/bookings", booking::routes::get_router())
        .fallback(not_found)
}
