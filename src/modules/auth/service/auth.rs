use axum_extra::extract::cookie::{Cookie, SameSite};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use rand::{rngs::OsRng, RngCore};
use sha2::Digest;
use sqlx::PgExecutor;
use std::sync::Arc;

use super::super::repository;
use crate::{
    modules::auth::repository::session::Session,
    types::{AppEnvironment, Context},
};

pub const SESSION_COOKIE: &str = "session";

#[derive(Debug)]
pub enum Error {
    UnexpectedError,
    InvalidSession,
    ExpiredToken,
}

type Result<T> = std::result::Result<T, Error>;

pub fn generate_token() -> String {
    let mut bytes = [0u8; 32];
    OsRng.fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

pub fn hash_token(token: &str) -> String {
    let mut hasher = sha2::Sha256::new();
    hasher.update(token.as_bytes());
    base16ct::lower::encode_string(&hasher.finalize())
}

/// Persists a new session and returns the raw token. Only its digest is
/// stored.
pub async fn create_session<'e, E: PgExecutor<'e>>(
    ctx: Arc<Context>,
    e: E,
    user_id: String,
) -> Result<String> {
    let token = generate_token();

    repository::session::create(
        e,
        repository::session::CreateSessionPayload {
            user_id,
            token_hash: hash_token(&token),
            ttl: ctx.session.ttl,
        },
    )
    .await
    .map_err(|_| Error::UnexpectedError)?;

    Ok(token)
}

pub async fn verify_token(ctx: Arc<Context>, token: String) -> Result<Session> {
    let session = repository::session::find_by_token_hash(&ctx.db_conn.pool, hash_token(&token))
        .await
        .map_err(|_| Error::UnexpectedError)?
        .ok_or(Error::InvalidSession)?;

    if session.is_expired() {
        let _ = repository::session::delete_by_id(&ctx.db_conn.pool, session.id).await;
        return Err(Error::ExpiredToken);
    }

    Ok(session)
}

pub async fn revoke(ctx: Arc<Context>, session: Session) -> Result<()> {
    repository::session::delete_by_id(&ctx.db_conn.pool, session.id)
        .await
        .map_err(|_| Error::UnexpectedError)
}

pub fn session_cookie(ctx: Arc<Context>, token: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(ctx.app.environment == AppEnvironment::Production)
        .build()
}

/// Expired, empty session cookie that makes the browser drop its copy.
pub fn removal_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::build((SESSION_COOKIE, "")).path("/").build();
    cookie.make_removal();
    cookie
}
