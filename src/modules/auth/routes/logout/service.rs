use super::types::{request, response};
use crate::{modules::auth::service, types::Context};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let user_id = payload.auth.user.id.clone();

    service::auth::revoke(ctx, payload.auth.session)
        .await
        .map_err(|_| response::Error::FailedToLogout)?;

    tracing::info!("User {} logged out", user_id);

    Ok(response::Success::LoggedOut(service::auth::removal_cookie()))
}
