use chrono::{NaiveDateTime, Utc};
use serde::Serialize;
use sqlx::PgExecutor;
use std::time::Duration;
use ulid::Ulid;

#[derive(Serialize, Clone, Debug, sqlx::FromRow)]
pub struct Session {
    pub id: String,
    pub user_id: String,
    #[serde(skip_serializing)]
    pub token_hash: String,
    pub expires_at: NaiveDateTime,
    pub created_at: NaiveDateTime,
}

impl Session {
    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now().naive_utc()
    }
}

#[derive(Debug)]
pub enum Error {
    UnexpectedError,
}

type Result<T> = std::result::Result<T, Error>;

pub struct CreateSessionPayload {
    pub user_id: String,
    pub token_hash: String,
    pub ttl: Duration,
}

pub async fn create<'e, E: PgExecutor<'e>>(e: E, payload: CreateSessionPayload) -> Result<Session> {
    let ttl = chrono::Duration::from_std(payload.ttl).map_err(|err| {
        tracing::error!("Invalid session lifetime: {}", err);
        Error::UnexpectedError
    })?;

    sqlx::query_as::<_, Session>(
        "
        INSERT INTO sessions (id, user_id, token_hash, expires_at)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        ",
    )
    .bind(Ulid::new().to_string())
    .bind(payload.user_id.clone())
    .bind(payload.token_hash)
    .bind(Utc::now().naive_utc() + ttl)
    .fetch_one(e)
    .await
    .map_err(|err| {
        tracing::error!(
            "Error occurred while creating a new session for user with id {}: {}",
            payload.user_id,
            err
        );
        Error::UnexpectedError
    })
}

pub async fn find_by_token_hash<'e, E: PgExecutor<'e>>(
    e: E,
    token_hash: String,
) -> Result<Option<Session>> {
    sqlx::query_as::<_, Session>("SELECT * FROM sessions WHERE token_hash = $1")
        .bind(token_hash)
        .fetch_optional(e)
        .await
        .map_err(|err| {
            tracing::error!("Error occurred while fetching session by token: {}", err);
            Error::UnexpectedError
        })
}

pub async fn delete_by_id<'e, E: PgExecutor<'e>>(e: E, id: String) -> Result<()> {
    sqlx::query("DELETE FROM sessions WHERE id = $1")
        .bind(id.clone())
        .execute(e)
        .await
        .map(|_| ())
        .map_err(|err| {
            tracing::error!("Error occurred while deleting session {}: {}", id, err);
            Error::UnexpectedError
        })
}

pub async fn delete_expired<'e, E: PgExecutor<'e>>(e: E) -> Result<u64> {
    sqlx::query("DELETE FROM sessions WHERE expires_at <= $1")
        .bind(Utc::now().naive_utc())
        .execute(e)
        .await
        .map(|result| result.rows_affected())
        .map_err(|err| {
            tracing::error!("Error occurred while deleting expired sessions: {}", err);
            Error::UnexpectedError
        })
}

#[cfg(test)]
pub mod fixtures {
    use super::Session;
    use chrono::{Duration, Utc};

    pub fn session() -> Session {
        let now = Utc::now().naive_utc();

        Session {
            id: "01J0B7RA3C5E7G9J1L3N5Q7S9U".to_string(),
            user_id: "01HZX3J5B9E2T6K8M4Q7R1S0VW".to_string(),
            token_hash: String::new(),
            expires_at: now + Duration::hours(1),
            created_at: now,
        }
    }
}
