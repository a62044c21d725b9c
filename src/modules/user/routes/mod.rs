mod profile;
mod stats;

use crate::{modules::address, types::Context};
use axum::routing::Router;
use std::sync::Arc;

pub fn get_router() -> Router<Arc<Context>> {
    Router::new()
        .nest("/profile", profile::get_router())
        .nest("/stats", stats::get_router())
        .nest("/addresses", address::routes::get_router())
}
