use super::types::{request, response};
use crate::{modules::address::repository, types::Context};
use std::sync::Arc;
use validator::Validate;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let body = request::Body {
        address: payload.body.address.map(|address| address.trim().to_string()),
        pincode: payload.body.pincode.map(|pincode| pincode.trim().to_string()),
        maps_link: payload.body.maps_link.map(|link| link.trim().to_string()),
        city: payload.body.city.map(|city| city.trim().to_string()),
        state: payload.body.state.map(|state| state.trim().to_string()),
    };

    body.validate().map_err(|errors| {
        tracing::warn!("Failed to validate payload: {errors}");
        response::Error::FailedToValidate(errors)
    })?;

    let user_id = payload.auth.user.id;

    repository::find_by_id_and_user_id(&ctx.db_conn.pool, payload.id.clone(), user_id.clone())
        .await
        .map_err(|_| response::Error::FailedToUpdateAddress)?
        .ok_or_else(|| {
            tracing::warn!("Address {} not found for user {}", payload.id, user_id);
            response::Error::AddressNotFound
        })?;

    let address = repository::update_by_id(
        &ctx.db_conn.pool,
        payload.id,
        repository::UpdateAddressPayload {
            address: body.address,
            pincode: body.pincode,
            city: body.city,
            state: body.state,
            maps_link: body.maps_link,
        },
    )
    .await
    .map_err(|_| response::Error::FailedToUpdateAddress)?;

    tracing::info!("Address {} updated for user {}", address.id, user_id);

    Ok(response::Success::AddressUpdated(address))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::testing;
    use sqlx::PgPool;

    fn body() -> request::Body {
        request::Body {
            address: None,
            pincode: None,
            maps_link: None,
            city: None,
            state: None,
        }
    }

    #[sqlx::test]
    #[ignore = "needs a Postgres DATABASE_URL"]
    async fn blank_maps_link_clears_it_and_absent_fields_are_kept(pool: PgPool) {
        let ctx = testing::context_with_pool(pool);
        let auth = testing::signed_in(ctx.clone(), "asha@example.com").await;
        let address = repository::create(
            &ctx.db_conn.pool,
            repository::CreateAddressPayload {
                user_id: auth.user.id.clone(),
                address: "12 Church Street".to_string(),
                pincode: "560001".to_string(),
                city: None,
                state: None,
                maps_link: Some("https://maps.example.com/church-street".to_string()),
                is_current: true,
            },
        )
        .await
        .unwrap();

        let updated = match service(
            ctx,
            request::Payload {
                auth,
                id: address.id,
                body: request::Body {
                    maps_link: Some("  ".to_string()),
                    pincode: Some("560034".to_string()),
                    ..body()
                },
            },
        )
        .await
        {
            Ok(response::Success::AddressUpdated(address)) => address,
            Err(_) => panic!("address was not updated"),
        };

        assert_eq!(updated.maps_link, None);
        assert_eq!(updated.pincode, "560034");
        assert_eq!(updated.address, "12 Church Street");
    }
}
