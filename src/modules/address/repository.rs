use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::PgExecutor;
use ulid::Ulid;

pub const DEFAULT_CITY: &str = "Bangalore";
pub const DEFAULT_STATE: &str = "Karnataka";

#[derive(Serialize, Deserialize, Clone, Debug, sqlx::FromRow)]
pub struct Address {
    pub id: String,
    pub user_id: String,
    pub address: String,
    pub pincode: String,
    pub city: String,
    pub state: String,
    pub maps_link: Option<String>,
    pub is_current: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
}

#[derive(Debug)]
pub enum Error {
    UnexpectedError,
}

type Result<T> = std::result::Result<T, Error>;

pub struct CreateAddressPayload {
    pub user_id: String,
    pub address: String,
    pub pincode: String,
    pub city: Option<String>,
    pub state: Option<String>,
    pub maps_link: Option<String>,
    pub is_current: bool,
}

pub async fn create<'e, E: PgExecutor<'e>>(e: E, payload: CreateAddressPayload) -> Result<Address> {
    sqlx::query_as::<_, Address>(
        "
        INSERT INTO addresses
            (id, user_id, address, pincode, city, state, maps_link, is_current)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING *
        ",
    )
    .bind(Ulid::new().to_string())
    .bind(payload.user_id)
    .bind(payload.address)
    .bind(payload.pincode)
    .bind(payload.city.unwrap_or_else(|| DEFAULT_CITY.to_string()))
    .bind(payload.state.unwrap_or_else(|| DEFAULT_STATE.to_string()))
    .bind(payload.maps_link)
    .bind(payload.is_current)
    .fetch_one(e)
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while creating an address: {}", err);
        Error::UnexpectedError
    })
}

pub async fn find_many_by_user_id<'e, E: PgExecutor<'e>>(
    e: E,
    user_id: String,
) -> Result<Vec<Address>> {
    sqlx::query_as::<_, Address>(
        "SELECT * FROM addresses WHERE user_id = $1 ORDER BY created_at ASC",
    )
    .bind(user_id.clone())
    .fetch_all(e)
    .await
    .map_err(|err| {
        tracing::error!(
            "Error occurred while fetching addresses of user {}: {}",
            user_id,
            err
        );
        Error::UnexpectedError
    })
}

pub async fn find_by_id_and_user_id<'e, E: PgExecutor<'e>>(
    e: E,
    id: String,
    user_id: String,
) -> Result<Option<Address>> {
    sqlx::query_as::<_, Address>("SELECT * FROM addresses WHERE id = $1 AND user_id = $2")
        .bind(id.clone())
        .bind(user_id)
        .fetch_optional(e)
        .await
        .map_err(|err| {
            tracing::error!("Error occurred while fetching address {}: {}", id, err);
            Error::UnexpectedError
        })
}

/// The address flagged current, or the most recently added one.
pub async fn find_current_by_user_id<'e, E: PgExecutor<'e>>(
    e: E,
    user_id: String,
) -> Result<Option<Address>> {
    sqlx::query_as::<_, Address>(
        "
        SELECT * FROM addresses
        WHERE user_id = $1
        ORDER BY is_current DESC, created_at DESC
        LIMIT 1
        ",
    )
    .bind(user_id.clone())
    .fetch_optional(e)
    .await
    .map_err(|err| {
        tracing::error!(
            "Error occurred while fetching current address of user {}: {}",
            user_id,
            err
        );
        Error::UnexpectedError
    })
}

/// Strictly the address flagged current.
pub async fn find_flagged_current_by_user_id<'e, E: PgExecutor<'e>>(
    e: E,
    user_id: String,
) -> Result<Option<Address>> {
    sqlx::query_as::<_, Address>(
        "SELECT * FROM addresses WHERE user_id = $1 AND is_current = TRUE",
    )
    .bind(user_id.clone())
    .fetch_optional(e)
    .await
    .map_err(|err| {
        tracing::error!(
            "Error occurred while fetching flagged address of user {}: {}",
            user_id,
            err
        );
        Error::UnexpectedError
    })
}

pub async fn count_by_user_id<'e, E: PgExecutor<'e>>(e: E, user_id: String) -> Result<i64> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(id) FROM addresses WHERE user_id = $1")
        .bind(user_id.clone())
        .fetch_one(e)
        .await
        .map_err(|err| {
            tracing::error!(
                "Error occurred while counting addresses of user {}: {}",
                user_id,
                err
            );
            Error::UnexpectedError
        })
}

/// `None` leaves a column untouched. An empty `maps_link` clears it.
pub struct UpdateAddressPayload {
    pub address: Option<String>,
    pub pincode: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub maps_link: Option<String>,
}

pub async fn update_by_id<'e, E: PgExecutor<'e>>(
    e: E,
    id: String,
    payload: UpdateAddressPayload,
) -> Result<Address> {
    sqlx::query_as::<_, Address>(
        "
            UPDATE addresses SET
                address = COALESCE($1, address),
                pincode = COALESCE($2, pincode),
                city = COALESCE($3, city),
                state = COALESCE($4, state),
                maps_link = CASE WHEN $5::text IS NULL THEN maps_link ELSE NULLIF($5, '') END,
                updated_at = NOW()
            WHERE
                id = $6
            RETURNING *
        ",
    )
    .bind(payload.address)
    .bind(payload.pincode)
    .bind(payload.city)
    .bind(payload.state)
    .bind(payload.maps_link)
    .bind(id.clone())
    .fetch_one(e)
    .await
    .map_err(|err| {
        tracing::error!(
            "Error occurred while trying to update address {}: {}",
            id,
            err
        );
        Error::UnexpectedError
    })
}

pub async fn clear_current_by_user_id<'e, E: PgExecutor<'e>>(e: E, user_id: String) -> Result<()> {
    sqlx::query("UPDATE addresses SET is_current = FALSE WHERE user_id = $1 AND is_current")
        .bind(user_id.clone())
        .execute(e)
        .await
        .map(|_| ())
        .map_err(|err| {
            tracing::error!(
                "Error occurred while clearing current address of user {}: {}",
                user_id,
                err
            );
            Error::UnexpectedError
        })
}

pub async fn mark_current_by_id<'e, E: PgExecutor<'e>>(e: E, id: String) -> Result<()> {
    sqlx::query("UPDATE addresses SET is_current = TRUE, updated_at = NOW() WHERE id = $1")
        .bind(id.clone())
        .execute(e)
        .await
        .map(|_| ())
        .map_err(|err| {
            tracing::error!(
                "Error occurred while marking address {} as current: {}",
                id,
                err
            );
            Error::UnexpectedError
        })
}

/// Most recently added address of the user other than `excluded_id`.
pub async fn find_replacement<'e, E: PgExecutor<'e>>(
    e: E,
    user_id: String,
    excluded_id: String,
) -> Result<Option<Address>> {
    sqlx::query_as::<_, Address>(
        "
        SELECT * FROM addresses
        WHERE user_id = $1 AND id <> $2
        ORDER BY created_at DESC
        LIMIT 1
        ",
    )
    .bind(user_id)
    .bind(excluded_id.clone())
    .fetch_optional(e)
    .await
    .map_err(|err| {
        tracing::error!(
            "Error occurred while looking for a replacement of address {}: {}",
            excluded_id,
            err
        );
        Error::UnexpectedError
    })
}

pub async fn delete_by_id<'e, E: PgExecutor<'e>>(e: E, id: String) -> Result<()> {
    sqlx::query("DELETE FROM addresses WHERE id = $1")
        .bind(id.clone())
        .execute(e)
        .await
        .map(|_| ())
        .map_err(|err| {
            tracing::error!(
                "Error occurred while trying to delete address {}: {}",
                id,
                err
            );
            Error::UnexpectedError
        })
}
