use super::types::{request, response};
use crate::{
    modules::{auth::service, user},
    types::Context,
    utils::validation::normalize_email,
};
use std::sync::Arc;
use validator::Validate;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let (email, name) = match (
        payload.email.as_deref().map(normalize_email),
        payload.name.map(|name| name.trim().to_string()),
    ) {
        (Some(email), Some(name)) if !email.is_empty() && !name.is_empty() => (email, name),
        _ => return Err(response::Error::MissingFields),
    };

    let payload = request::Payload {
        email: Some(email.clone()),
        name: Some(name.clone()),
        phone: payload.phone.map(|phone| phone.trim().to_string()),
    };

    payload.validate().map_err(|errors| {
        tracing::warn!("Failed to validate payload: {errors}");
        response::Error::FailedToValidate(errors)
    })?;

    let mut tx = ctx.db_conn.clone().pool.begin().await.map_err(|err| {
        tracing::error!("Failed to start database transaction: {}", err);
        response::Error::UnexpectedError
    })?;

    if user::repository::find_by_email(&mut *tx, email.clone())
        .await
        .map_err(|_| response::Error::FailedToFetchUser)?
        .is_some()
    {
        tracing::warn!("Registration attempt for existing email {}", email);
        return Err(response::Error::UserAlreadyExists);
    }

    let user = user::repository::create(
        &mut *tx,
        user::repository::CreateUserPayload {
            email,
            name,
            phone: payload.phone.unwrap_or_default(),
        },
    )
    .await
    .map_err(|_| response::Error::SignupFailed)?;

    let token = service::auth::create_session(ctx.clone(), &mut *tx, user.id.clone())
        .await
        .map_err(|_| response::Error::FailedToCreateSession)?;

    tx.commit().await.map_err(|err| {
        tracing::error!("Failed to commit database transaction: {}", err);
        response::Error::UnexpectedError
    })?;

    tracing::info!("Registered user {}", user.id);

    let cookie = service::auth::session_cookie(ctx.clone(), token.clone());
    Ok(response::Success::Registered {
        user,
        token,
        cookie,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::testing;
    use axum::{http::StatusCode, response::IntoResponse};
    use sqlx::PgPool;

    fn payload(email: &str) -> request::Payload {
        request::Payload {
            email: Some(email.to_string()),
            name: Some("Asha Rao".to_string()),
            phone: Some("9876543210".to_string()),
        }
    }

    #[sqlx::test]
    #[ignore = "needs a Postgres DATABASE_URL"]
    async fn registering_an_existing_email_conflicts(pool: PgPool) {
        let ctx = testing::context_with_pool(pool);

        let first = service(ctx.clone(), payload("asha@example.com")).await;
        assert_eq!(first.into_response().status(), StatusCode::CREATED);

        let second = service(ctx, payload("  ASHA@example.com ")).await;
        assert!(matches!(second, Err(response::Error::UserAlreadyExists)));
        assert_eq!(second.into_response().status(), StatusCode::CONFLICT);
    }
}
