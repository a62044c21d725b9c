use super::types::{request, response};
use crate::{
    modules::{auth::service, user},
    types::Context,
    utils::validation::normalize_email,
};
use std::sync::Arc;
use validator::Validate;

fn present(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let (email, otp) = match (
        present(payload.email).map(|email| normalize_email(&email)),
        present(payload.otp),
    ) {
        (Some(email), Some(otp)) => (email, otp),
        _ => return Err(response::Error::MissingCredentials),
    };

    let payload = request::Payload {
        email: Some(email.clone()),
        otp: Some(otp.clone()),
    };

    payload.validate().map_err(|errors| {
        tracing::warn!("Failed to validate payload: {errors}");
        response::Error::FailedToValidate(errors)
    })?;

    let user = user::repository::find_by_email(&ctx.db_conn.pool, email)
        .await
        .map_err(|_| response::Error::FailedToFetchUser)?
        .ok_or(response::Error::UserNotFound)?;

    let mut tx = ctx.db_conn.clone().pool.begin().await.map_err(|err| {
        tracing::error!("Failed to start database transaction: {}", err);
        response::Error::UnexpectedError
    })?;

    let logged_in = user::repository::record_login(&mut *tx, user.id.clone())
        .await
        .map_err(|_| response::Error::UnexpectedError)?;

    let token = service::auth::create_session(ctx.clone(), &mut *tx, user.id.clone())
        .await
        .map_err(|_| response::Error::FailedToCreateSession)?;

    // consumed last so a failed write above leaves the code usable
    service::otp::verify(ctx.clone(), &user, otp.clone())
        .await
        .map_err(|err| match err {
            service::otp::VerificationError::UnexpectedError => response::Error::UnexpectedError,
            _ => {
                tracing::warn!("Invalid OTP for user {}", user.id);
                response::Error::InvalidOtp
            }
        })?;

    if let Err(err) = tx.commit().await {
        tracing::error!("Failed to commit database transaction: {}", err);
        service::otp::restore(ctx.clone(), &user, &otp).await;
        return Err(response::Error::UnexpectedError);
    }

    tracing::info!("User {} logged in", logged_in.id);

    let cookie = service::auth::session_cookie(ctx.clone(), token.clone());
    Ok(response::Success::LoggedIn {
        is_new_user: logged_in.is_new(),
        user: logged_in,
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

    async fn session_count(pool: &PgPool, user_id: &str) -> i64 {
        sqlx::query_scalar("SELECT COUNT(id) FROM sessions WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(pool)
            .await
            .unwrap()
    }

    fn payload(otp: &str) -> request::Payload {
        request::Payload {
            email: Some("asha@example.com".to_string()),
            otp: Some(otp.to_string()),
        }
    }

    #[sqlx::test]
    #[ignore = "needs a Postgres DATABASE_URL"]
    async fn wrong_code_leaves_no_session_and_keeps_the_code(pool: PgPool) {
        let ctx = testing::context_with_pool(pool.clone());
        let user = user::repository::create(
            &pool,
            user::repository::CreateUserPayload {
                email: "asha@example.com".to_string(),
                name: "asha".to_string(),
                phone: String::new(),
            },
        )
        .await
        .unwrap();
        let code = service::otp::issue(ctx.clone(), &user).await.unwrap();
        let wrong = if code == "000000" { "111111" } else { "000000" };

        let rejected = service(ctx.clone(), payload(wrong)).await;
        assert_eq!(rejected.into_response().status(), StatusCode::UNAUTHORIZED);
        assert_eq!(session_count(&pool, &user.id).await, 0);

        match service(ctx.clone(), payload(&code)).await {
            Ok(response::Success::LoggedIn {
                user: logged_in,
                is_new_user,
                ..
            }) => {
                assert!(is_new_user);
                assert!(logged_in.last_login_at.is_some());
            }
            Err(_) => panic!("valid code was rejected"),
        }
        assert_eq!(session_count(&pool, &user.id).await, 1);

        let reused = service(ctx, payload(&code)).await;
        assert!(matches!(reused, Err(response::Error::InvalidOtp)));
        assert_eq!(session_count(&pool, &user.id).await, 1);
    }
}
