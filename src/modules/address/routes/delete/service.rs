use super::types::{request, response};
use crate::{modules::address::repository, types::Context};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let user_id = payload.auth.user.id;

    let mut tx = ctx.db_conn.clone().pool.begin().await.map_err(|err| {
        tracing::error!("Failed to start database transaction: {}", err);
        response::Error::FailedToDeleteAddress
    })?;

    let address = repository::find_by_id_and_user_id(&mut *tx, payload.id.clone(), user_id.clone())
        .await
        .map_err(|_| response::Error::FailedToDeleteAddress)?
        .ok_or_else(|| {
            tracing::warn!("Address {} not found for user {}", payload.id, user_id);
            response::Error::AddressNotFound
        })?;

    let count = repository::count_by_user_id(&mut *tx, user_id.clone())
        .await
        .map_err(|_| response::Error::FailedToDeleteAddress)?;

    if count <= 1 {
        return Err(response::Error::OnlyAddress);
    }

    let replacement = match address.is_current {
        true => repository::find_replacement(&mut *tx, user_id.clone(), address.id.clone())
            .await
            .map_err(|_| response::Error::FailedToDeleteAddress)?,
        false => None,
    };

    repository::delete_by_id(&mut *tx, address.id.clone())
        .await
        .map_err(|_| response::Error::FailedToDeleteAddress)?;

    if let Some(replacement) = replacement {
        repository::mark_current_by_id(&mut *tx, replacement.id)
            .await
            .map_err(|_| response::Error::FailedToDeleteAddress)?;
    }

    tx.commit().await.map_err(|err| {
        tracing::error!("Failed to commit database transaction: {}", err);
        response::Error::FailedToDeleteAddress
    })?;

    tracing::info!("Address {} deleted for user {}", address.id, user_id);

    Ok(response::Success::AddressDeleted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::testing;
    use sqlx::PgPool;

    async fn add(ctx: &Context, user_id: &str, address: &str, is_current: bool) -> repository::Address {
        repository::create(
            &ctx.db_conn.pool,
            repository::CreateAddressPayload {
                user_id: user_id.to_string(),
                address: address.to_string(),
                pincode: "560001".to_string(),
                city: None,
                state: None,
                maps_link: None,
                is_current,
            },
        )
        .await
        .unwrap()
    }

    #[sqlx::test]
    #[ignore = "needs a Postgres DATABASE_URL"]
    async fn refuses_to_delete_the_only_address(pool: PgPool) {
        let ctx = testing::context_with_pool(pool);
        let auth = testing::signed_in(ctx.clone(), "asha@example.com").await;
        let only = add(&ctx, &auth.user.id, "12 Church Street", true).await;

        let result = service(
            ctx.clone(),
            request::Payload {
                auth: auth.clone(),
                id: only.id,
            },
        )
        .await;

        assert!(matches!(result, Err(response::Error::OnlyAddress)));
        assert_eq!(
            repository::count_by_user_id(&ctx.db_conn.pool, auth.user.id)
                .await
                .unwrap(),
            1
        );
    }

    #[sqlx::test]
    #[ignore = "needs a Postgres DATABASE_URL"]
    async fn deleting_the_current_address_promotes_another(pool: PgPool) {
        let ctx = testing::context_with_pool(pool);
        let auth = testing::signed_in(ctx.clone(), "asha@example.com").await;
        let current = add(&ctx, &auth.user.id, "12 Church Street", true).await;
        add(&ctx, &auth.user.id, "4 Brigade Road", false).await;
        add(&ctx, &auth.user.id, "9 Residency Road", false).await;

        let result = service(
            ctx.clone(),
            request::Payload {
                auth: auth.clone(),
                id: current.id.clone(),
            },
        )
        .await;
        assert!(matches!(result, Ok(response::Success::AddressDeleted)));

        let remaining = repository::find_many_by_user_id(&ctx.db_conn.pool, auth.user.id)
            .await
            .unwrap();

        assert_eq!(remaining.len(), 2);
        assert!(remaining.iter().all(|address| address.id != current.id));
        assert_eq!(remaining.iter().filter(|address| address.is_current).count(), 1);
    }

    #[sqlx::test]
    #[ignore = "needs a Postgres DATABASE_URL"]
    async fn addresses_of_other_users_are_not_found(pool: PgPool) {
        let ctx = testing::context_with_pool(pool);
        let owner = testing::signed_in(ctx.clone(), "asha@example.com").await;
        let other = testing::signed_in(ctx.clone(), "ravi@example.com").await;
        let address = add(&ctx, &owner.user.id, "12 Church Street", true).await;
        add(&ctx, &owner.user.id, "4 Brigade Road", false).await;

        let result = service(
            ctx,
            request::Payload {
                auth: other,
                id: address.id,
            },
        )
        .await;

        assert!(matches!(result, Err(response::Error::AddressNotFound)));
    }
}
