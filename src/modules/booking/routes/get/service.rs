use super::types::{request, response};
use crate::{modules::booking::repository, types::Context};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let user_id = payload.auth.user.id;

    repository::find_by_id_and_user_id(&ctx.db_conn.pool, payload.id.clone(), user_id.clone())
        .await
        .map_err(|_| response::Error::FailedToFetchBooking)?
        .map(response::Success::Booking)
        .ok_or_else(|| {
            tracing::warn!("Booking {} not found for user {}", payload.id, user_id);
            response::Error::BookingNotFound
        })
}
