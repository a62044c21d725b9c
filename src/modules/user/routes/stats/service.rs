use super::types::{request, response};
use crate::{
    modules::{address, booking},
    types::Context,
};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let user_id = payload.auth.user.id.clone();

    let bookings = booking::repository::stats_by_user_id(&ctx.db_conn.pool, user_id.clone())
        .await
        .map_err(|_| response::Error::FailedToFetchStats)?;

    let total_addresses = address::repository::count_by_user_id(&ctx.db_conn.pool, user_id)
        .await
        .map_err(|_| response::Error::FailedToFetchStats)?;

    Ok(response::Success::Stats {
        total_bookings: bookings.total_bookings,
        completed_bookings: bookings.completed_bookings,
        total_addresses,
    })
}
