use super::types::{request, response};
use crate::{modules::booking::repository, types::Context};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    repository::find_many_by_user_id(
        &ctx.db_conn.pool,
        payload.auth.user.id,
        payload.pagination.0,
        payload.filters,
    )
    .await
    .map(response::Success::Bookings)
    .map_err(|_| response::Error::FailedToFetchBookings)
}
