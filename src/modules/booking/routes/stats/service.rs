use super::types::{request, response};
use crate::{modules::booking::repository, types::Context};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    repository::stats_by_user_id(&ctx.db_conn.pool, payload.auth.user.id)
        .await
        .map(response::Success::Stats)
        .map_err(|_| response::Error::FailedToFetchStats)
}
