use super::types::{request, response};
use crate::{modules::address, types::Context};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let address = address::repository::find_flagged_current_by_user_id(
        &ctx.db_conn.pool,
        payload.auth.user.id.clone(),
    )
    .await
    .map_err(|_| response::Error::FailedToFetchAddress)?;

    Ok(response::Success::Profile {
        user: payload.auth.user,
        address,
    })
}
