use super::types::{request, response};
use crate::{modules::booking::repository, types::Context};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let user_id = payload.auth.user.id;

    let booking =
        repository::find_by_id_and_user_id(&ctx.db_conn.pool, payload.id.clone(), user_id.clone())
            .await
            .map_err(|_| response::Error::FailedToCancelBooking)?
            .ok_or_else(|| {
                tracing::warn!("Booking {} not found for user {}", payload.id, user_id);
                response::Error::BookingNotFound
            })?;

    if !booking.booking.status.is_editable() {
        return Err(response::Error::NotPending);
    }

    let cancelled = repository::cancel_pending_by_id(&ctx.db_conn.pool, payload.id)
        .await
        .map_err(|_| response::Error::FailedToCancelBooking)?
        .ok_or(response::Error::NotPending)?;

    tracing::info!("Booking {} cancelled by user {}", cancelled.id, user_id);

    Ok(response::Success::BookingCancelled(cancelled.into()))
}
