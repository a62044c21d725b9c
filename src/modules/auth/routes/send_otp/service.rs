use super::types::{request, response};
use crate::{
    modules::{auth::service, user},
    types::Context,
    utils::validation::normalize_email,
};
use std::sync::Arc;
use validator::Validate;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let email = payload
        .email
        .as_deref()
        .map(normalize_email)
        .filter(|email| !email.is_empty())
        .ok_or(response::Error::MissingEmail)?;

    let payload = request::Payload { email: Some(email) };

    payload.validate().map_err(|errors| {
        tracing::warn!("Failed to validate payload: {errors}");
        response::Error::FailedToValidate(errors)
    })?;

    let email = payload.email.unwrap_or_default();

    let user = match user::repository::find_by_email(&ctx.db_conn.pool, email.clone())
        .await
        .map_err(|_| response::Error::FailedToFetchUser)?
    {
        Some(user) => user,
        None => {
            let name = email.split('@').next().unwrap_or_default().to_string();
            let user = user::repository::create(
                &ctx.db_conn.pool,
                user::repository::CreateUserPayload {
                    email: email.clone(),
                    name,
                    phone: String::new(),
                },
            )
            .await
            .map_err(|_| response::Error::FailedToCreateUser)?;

            tracing::info!("Created user {} for {}", user.id, user.email);
            user
        }
    };

    service::otp::send(ctx.clone(), user)
        .await
        .map(|_| response::Success::OtpSent)
        .map_err(|err| match err {
            service::otp::SendError::NotStored => response::Error::FailedToStoreOtp,
            service::otp::SendError::NotSent => response::Error::FailedToSendOtp,
        })
}
