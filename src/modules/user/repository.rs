use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::PgExecutor;
use ulid::Ulid;

type Result<T> = std::result::Result<T, Error>;

#[derive(Serialize, Deserialize, Clone, Debug, sqlx::FromRow)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    pub phone: String,
    pub is_active: bool,
    pub last_login_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
}

impl User {
    /// The part of the email before `@`, used as the placeholder name for
    /// accounts created through OTP sign-in.
    pub fn email_local_part(&self) -> &str {
        self.email.split('@').next().unwrap_or_default()
    }

    /// A user still has to complete their profile when the name is the
    /// placeholder or no phone number is on file.
    pub fn is_new(&self) -> bool {
        self.name.trim().is_empty()
            || self.name == self.email_local_part()
            || self.phone.trim().is_empty()
    }
}

#[derive(Serialize, Clone, Debug)]
pub struct PublicUser {
    pub id: String,
    pub email: String,
    pub name: String,
    pub phone: String,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            phone: user.phone,
        }
    }
}

pub struct CreateUserPayload {
    pub email: String,
    pub name: String,
    pub phone: String,
}

#[derive(Debug)]
pub enum Error {
    UnexpectedError,
}

pub async fn create<'e, E>(e: E, payload: CreateUserPayload) -> Result<User>
where
    E: PgExecutor<'e>,
{
    sqlx::query_as::<_, User>(
        "
        INSERT INTO users (id, email, name, phone)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        ",
    )
    .bind(Ulid::new().to_string())
    .bind(payload.email)
    .bind(payload.name)
    .bind(payload.phone)
    .fetch_one(e)
    .await
    .map_err(|err| {
        tracing::error!("Error occured while creating a user account: {}", err);
        Error::UnexpectedError
    })
}

pub async fn find_by_id<'e, E: PgExecutor<'e>>(e: E, id: String) -> Result<Option<User>> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
        .bind(id.clone())
        .fetch_optional(e)
        .await
        .map_err(|err| {
            tracing::error!("Error occurred while fetching user with id {}: {}", id, err);
            Error::UnexpectedError
        })
}

pub async fn find_by_email<'e, E: PgExecutor<'e>>(e: E, email: String) -> Result<Option<User>> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
        .bind(email)
        .fetch_optional(e)
        .await
        .map_err(|err| {
            tracing::error!("Error occurred in find_by_email: {}", err);
            Error::UnexpectedError
        })
}

pub struct UpdateUserPayload {
    pub name: Option<String>,
    pub phone: Option<String>,
}

pub async fn update_by_id<'e, E: PgExecutor<'e>>(
    e: E,
    id: String,
    payload: UpdateUserPayload,
) -> Result<User> {
    sqlx::query_as::<_, User>(
        "
            UPDATE users SET
                name = COALESCE($1, name),
                phone = COALESCE($2, phone),
                updated_at = NOW()
            WHERE
                id = $3
            RETURNING *
        ",
    )
    .bind(payload.name)
    .bind(payload.phone)
    .bind(id.clone())
    .fetch_one(e)
    .await
    .map_err(|err| {
        tracing::error!(
            "Error occurred while trying to update a user by id {}: {}",
            id,
            err
        );
        Error::UnexpectedError
    })
}

pub async fn record_login<'e, E: PgExecutor<'e>>(e: E, id: String) -> Result<User> {
    sqlx::query_as::<_, User>(
        "UPDATE users SET last_login_at = NOW() WHERE id = $1 RETURNING *",
    )
    .bind(id.clone())
    .fetch_one(e)
    .await
    .map_err(|err| {
        tracing::error!("Failed to record login for user {}: {}", id, err);
        Error::UnexpectedError
    })
}

#[cfg(test)]
pub mod fixtures {
    use super::User;
    use chrono::NaiveDate;

    pub fn user(email: &str, name: &str, phone: &str) -> User {
        let created_at = NaiveDate::from_ymd_opt(2024, 1, 1)
            .and_then(|date| date.and_hms_opt(9, 0, 0))
            .expect("valid timestamp");

        User {
            id: "01HZX3J5B9E2T6K8M4Q7R1S0VW".to_string(),
            email: email.to_string(),
            name: name.to_string(),
            phone: phone.to_string(),
            is_active: true,
            last_login_at: None,
            created_at,
            updated_at: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::user;

    #[test]
    fn placeholder_name_marks_user_as_new() {
        assert!(user("jane@example.com", "jane", "9876543210").is_new());
    }

    #[test]
    fn missing_phone_marks_user_as_new() {
        assert!(user("jane@example.com", "Jane Doe", "").is_new());
    }

    #[test]
    fn completed_profile_is_not_new() {
        assert!(!user("jane@example.com", "Jane Doe", "9876543210").is_new());
    }
}
