use super::types::{request, response};
use crate::{modules::address::repository, types::Context};
use std::sync::Arc;
use validator::Validate;

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let address =
        non_empty(payload.body.address).ok_or(response::Error::MissingField("address"))?;
    let pincode =
        non_empty(payload.body.pincode).ok_or(response::Error::MissingField("pincode"))?;

    let body = request::Body {
        address: Some(address.clone()),
        pincode: Some(pincode.clone()),
        maps_link: non_empty(payload.body.maps_link),
        city: non_empty(payload.body.city),
        state: non_empty(payload.body.state),
    };

    body.validate().map_err(|errors| {
        tracing::warn!("Failed to validate payload: {errors}");
        response::Error::FailedToValidate(errors)
    })?;

    let user_id = payload.auth.user.id.clone();

    let mut tx = ctx.db_conn.clone().pool.begin().await.map_err(|err| {
        tracing::error!("Failed to start database transaction: {}", err);
        response::Error::FailedToCreateAddress
    })?;

    let existing = repository::count_by_user_id(&mut *tx, user_id.clone())
        .await
        .map_err(|_| response::Error::FailedToCreateAddress)?;

    let address = repository::create(
        &mut *tx,
        repository::CreateAddressPayload {
            user_id: user_id.clone(),
            address,
            pincode,
            city: body.city,
            state: body.state,
            maps_link: body.maps_link,
            is_current: existing == 0,
        },
    )
    .await
    .map_err(|_| response::Error::FailedToCreateAddress)?;

    tx.commit().await.map_err(|err| {
        tracing::error!("Failed to commit database transaction: {}", err);
        response::Error::FailedToCreateAddress
    })?;

    tracing::info!("Address {} added for user {}", address.id, user_id);

    Ok(response::Success::AddressCreated(address))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::{auth::repository::session, user};
    use crate::types::testing;
    use sqlx::PgPool;

    fn body(address: &str) -> request::Body {
        request::Body {
            address: Some(address.to_string()),
            pincode: Some("560034".to_string()),
            maps_link: None,
            city: None,
            state: None,
        }
    }

    #[sqlx::test]
    #[ignore = "needs a Postgres DATABASE_URL"]
    async fn only_the_first_address_becomes_current(pool: PgPool) {
        let ctx = testing::context_with_pool(pool);
        let auth = testing::signed_in(ctx.clone(), "asha@example.com").await;

        let first = match service(
            ctx.clone(),
            request::Payload {
                auth: auth.clone(),
                body: body("12 Church Street"),
            },
        )
        .await
        {
            Ok(response::Success::AddressCreated(address)) => address,
            Err(_) => panic!("first address was not created"),
        };
        let second = match service(
            ctx.clone(),
            request::Payload {
                auth,
                body: body("4 Brigade Road"),
            },
        )
        .await
        {
            Ok(response::Success::AddressCreated(address)) => address,
            Err(_) => panic!("second address was not created"),
        };

        assert!(first.is_current);
        assert!(!second.is_current);
        assert_eq!(first.city, repository::DEFAULT_CITY);
    }

    #[tokio::test]
    async fn blank_required_fields_are_reported_by_name() {
        let ctx = testing::context();
        let auth = request::Auth {
            user: user::repository::fixtures::user("asha@example.com", "Asha", ""),
            session: session::fixtures::session(),
        };

        let result = service(
            ctx,
            request::Payload {
                auth,
                body: request::Body {
                    pincode: Some("  ".to_string()),
                    ..body("12 Church Street")
                },
            },
        )
        .await;

        assert!(matches!(result, Err(response::Error::MissingField("pincode"))));
    }
}
