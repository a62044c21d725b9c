use rand::{rngs::OsRng, Rng};
use sha2::Digest;
use std::sync::Arc;

use crate::{
    modules::{notification, user::repository::User},
    types::Context,
    utils::otp::Consumed,
};

#[derive(Eq, PartialEq, Debug)]
pub enum SendError {
    NotStored,
    NotSent,
}

#[derive(Eq, PartialEq, Debug)]
pub enum VerificationError {
    InvalidOtp,
    ExpiredOrMissing,
    UnexpectedError,
}

pub fn generate(length: usize) -> String {
    (0..length)
        .map(|_| char::from(b'0' + OsRng.gen_range(0..10u8)))
        .collect()
}

fn generate_hash(user: &User, code: &str) -> String {
    let mut hasher = sha2::Sha256::new();
    hasher.update(format!("{}-{}", user.id, code.trim()));
    base16ct::lower::encode_string(&hasher.finalize())
}

fn key(user: &User) -> String {
    format!("otp:{}", user.id)
}

/// Stores a fresh code for `user`, replacing any code issued before.
pub async fn issue(ctx: Arc<Context>, user: &User) -> Result<String, SendError> {
    let code = generate(ctx.otp.length);

    ctx.otp_store
        .put(&key(user), &generate_hash(user, &code), ctx.otp.ttl)
        .await
        .map_err(|_| SendError::NotStored)?;

    Ok(code)
}

/// Puts back a code that was consumed by a login that then failed, so the
/// user can retry with the same code.
pub async fn restore(ctx: Arc<Context>, user: &User, code: &str) {
    if ctx
        .otp_store
        .put(&key(user), &generate_hash(user, code), ctx.otp.ttl)
        .await
        .is_err()
    {
        tracing::warn!("Failed to restore OTP for user {}", user.id);
    }
}

pub async fn send(ctx: Arc<Context>, user: User) -> Result<(), SendError> {
    let code = issue(ctx.clone(), &user).await?;

    notification::service::send(
        ctx.clone(),
        notification::service::Notification::otp_requested(user, code, ctx.otp.ttl_minutes()),
        notification::service::Backend::Email,
    )
    .await
    .map_err(|_| SendError::NotSent)
}

pub async fn verify(ctx: Arc<Context>, user: &User, code: String) -> Result<(), VerificationError> {
    let consumed = ctx
        .otp_store
        .consume(&key(user), &generate_hash(user, &code))
        .await
        .map_err(|_| VerificationError::UnexpectedError)?;

    match consumed {
        Consumed::Verified => Ok(()),
        Consumed::Mismatch => Err(VerificationError::InvalidOtp),
        Consumed::Missing => Err(VerificationError::ExpiredOrMissing),
    }
}
