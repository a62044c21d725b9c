use super::types::{request, response};
use crate::{modules::user::repository, types::Context};
use std::sync::Arc;
use validator::Validate;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let body = request::Body {
        name: payload.body.name.map(|name| name.trim().to_string()),
        phone: payload.body.phone.map(|phone| phone.trim().to_string()),
    };

    body.validate().map_err(|errors| {
        tracing::warn!("Failed to validate payload: {errors}");
        response::Error::FailedToValidate(errors)
    })?;

    let user = repository::update_by_id(
        &ctx.db_conn.pool,
        payload.auth.user.id.clone(),
        repository::UpdateUserPayload {
            name: body.name,
            phone: body.phone,
        },
    )
    .await
    .map_err(|_| response::Error::FailedToUpdateUser)?;

    tracing::info!("Profile updated for user {}", user.id);

    Ok(response::Success::ProfileUpdated(user))
}
