use super::types::{request, response};
use crate::{modules::address::repository, types::Context};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let user_id = payload.auth.user.id;

    let mut tx = ctx.db_conn.clone().pool.begin().await.map_err(|err| {
        tracing::error!("Failed to start database transaction: {}", err);
        response::Error::FailedToSetCurrentAddress
    })?;

    let address = repository::find_by_id_and_user_id(&mut *tx, payload.id.clone(), user_id.clone())
        .await
        .map_err(|_| response::Error::FailedToSetCurrentAddress)?
        .ok_or_else(|| {
            tracing::warn!("Address {} not found for user {}", payload.id, user_id);
            response::Error::AddressNotFound
        })?;

    repository::clear_current_by_user_id(&mut *tx, user_id.clone())
        .await
        .map_err(|_| response::Error::FailedToSetCurrentAddress)?;

    repository::mark_current_by_id(&mut *tx, address.id.clone())
        .await
        .map_err(|_| response::Error::FailedToSetCurrentAddress)?;

    tx.commit().await.map_err(|err| {
        tracing::error!("Failed to commit database transaction: {}", err);
        response::Error::FailedToSetCurrentAddress
    })?;

    tracing::info!("Address {} set as current for user {}", address.id, user_id);

    Ok(response::Success::CurrentAddressSet)
}
