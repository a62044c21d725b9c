use super::{repository::session::Session, service};
use crate::modules::user;
use crate::modules::user::repository::User;
use crate::types::Context;
use axum::extract::{Extension, FromRequestParts};
use axum::http::{request::Parts, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::RequestPartsExt;
use axum::{async_trait, Json};
use axum_extra::{extract::CookieJar, TypedHeader};
use headers::{authorization::Bearer, Authorization};
use serde_json::json;
use std::sync::Arc;

enum Error {
    MissingToken,
    InvalidSession,
    Unexpected,
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"error": "Authentication required"})),
    )
        .into_response()
}

fn unexpected() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({"error": "Sorry an error occurred"})),
    )
        .into_response()
}

/// Pulls the session token from the `Authorization: Bearer` header, falling
/// back to the session cookie.
async fn get_token_from_request(parts: &mut Parts) -> Result<String, Error> {
    if let Ok(TypedHeader(Authorization(bearer))) =
        parts.extract::<TypedHeader<Authorization<Bearer>>>().await
    {
        return Ok(bearer.token().to_string());
    }

    let jar = parts
        .extract::<CookieJar>()
        .await
        .map_err(|_| Error::MissingToken)?;

    jar.get(service::auth::SESSION_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .filter(|token| !token.is_empty())
        .ok_or(Error::MissingToken)
}

async fn get_user_from_token(ctx: Arc<Context>, token: String) -> Result<(User, Session), Error> {
    let session = service::auth::verify_token(ctx.clone(), token)
        .await
        .map_err(|err| match err {
            service::auth::Error::UnexpectedError => Error::Unexpected,
            _ => Error::InvalidSession,
        })?;

    let user = user::repository::find_by_id(&ctx.db_conn.pool, session.user_id.clone())
        .await
        .map_err(|_| Error::Unexpected)?
        .ok_or(Error::InvalidSession)?;

    if !user.is_active {
        return Err(Error::InvalidSession);
    }

    Ok((user, session))
}

#[derive(Clone)]
pub struct Auth {
    pub user: User,
    pub session: Session,
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for Auth {
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Extension(ctx) = parts
            .extract::<Extension<Arc<Context>>>()
            .await
            .map_err(|err| {
                tracing::error!("Context missing from request extensions: {}", err);
                err.into_response()
            })?;

        let token = get_token_from_request(parts).await.map_err(|_| {
            tracing::warn!("Request without session token");
            unauthorized()
        })?;

        get_user_from_token(ctx, token)
            .await
            .map(|(user, session)| Self { user, session })
            .map_err(|err| match err {
                Error::Unexpected => {
                    tracing::error!("Failed to look up session");
                    unexpected()
                }
                _ => {
                    tracing::warn!("Request with invalid or expired session");
                    unauthorized()
                }
            })
    }
}
