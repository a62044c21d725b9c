use chrono::{NaiveDate, NaiveDateTime};
use serde::{de, Deserialize, Deserializer, Serialize};
use sqlx::postgres::PgRow;
use sqlx::types::Json;
use sqlx::{FromRow, PgExecutor, Row};
use std::fmt;
use std::str::FromStr;
use ulid::Ulid;

use crate::{
    modules::address::repository::Address,
    utils::pagination::{Page, Paginated},
};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum WasteCategory {
    #[serde(rename = "ewaste")]
    Ewaste,
    #[serde(rename = "biomedical")]
    Biomedical,
}

impl WasteCategory {
    pub fn label(&self) -> &'static str {
        match self {
            WasteCategory::Ewaste => "E-Waste",
            WasteCategory::Biomedical => "Biomedical",
        }
    }
}

impl fmt::Display for WasteCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WasteCategory::Ewaste => write!(f, "ewaste"),
            WasteCategory::Biomedical => write!(f, "biomedical"),
        }
    }
}

impl FromStr for WasteCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ewaste" => Ok(WasteCategory::Ewaste),
            "biomedical" => Ok(WasteCategory::Biomedical),
            _ => Err(format!("'{}' is not a valid WasteCategory", s)),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum BookingStatus {
    #[serde(rename = "pending")]
    Pending,
    #[serde(rename = "confirmed")]
    Confirmed,
    #[serde(rename = "completed")]
    Completed,
    #[serde(rename = "cancelled")]
    Cancelled,
}

impl BookingStatus {
    /// Users may only edit or cancel a booking nobody has acted on yet.
    pub fn is_editable(&self) -> bool {
        *self == BookingStatus::Pending
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookingStatus::Pending => write!(f, "pending"),
            BookingStatus::Confirmed => write!(f, "confirmed"),
            BookingStatus::Completed => write!(f, "completed"),
            BookingStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl FromStr for BookingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(BookingStatus::Pending),
            "confirmed" => Ok(BookingStatus::Confirmed),
            "completed" => Ok(BookingStatus::Completed),
            "cancelled" => Ok(BookingStatus::Cancelled),
            _ => Err(format!("'{}' is not a valid BookingStatus", s)),
        }
    }
}

#[derive(Serialize, Clone, Debug)]
pub struct Booking {
    pub id: String,
    pub user_id: String,
    pub address_id: Option<String>,
    pub waste_category: WasteCategory,
    pub waste_types: Vec<String>,
    pub quantity: String,
    pub pickup_date: NaiveDate,
    pub additional_notes: Option<String>,
    pub status: BookingStatus,
    #[serde(skip_serializing)]
    pub images: Option<Vec<String>>,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
}

impl Booking {
    pub fn images_count(&self) -> usize {
        self.images.as_ref().map(Vec::len).unwrap_or(0)
    }
}

fn decode_column<T: FromStr<Err = String>>(row: &PgRow, column: &str) -> Result<T, sqlx::Error> {
    let raw: String = row.try_get(column)?;
    raw.parse::<T>().map_err(|err| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: err.into(),
    })
}

impl<'r> FromRow<'r, PgRow> for Booking {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        let waste_types: Json<Vec<String>> = row.try_get("waste_types")?;
        let images: Option<Json<Vec<String>>> = row.try_get("images")?;

        Ok(Booking {
            id: row.try_get("id")?,
            user_id: row.try_get("user_id")?,
            address_id: row.try_get("address_id")?,
            waste_category: decode_column(row, "waste_category")?,
            waste_types: waste_types.0,
            quantity: row.try_get("quantity")?,
            pickup_date: row.try_get("pickup_date")?,
            additional_notes: row.try_get("additional_notes")?,
            status: decode_column(row, "status")?,
            images: images.map(|images| images.0),
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

/// Booking as returned to clients, with the pickup address inlined.
#[derive(Serialize, Clone, Debug)]
pub struct FullBooking {
    #[serde(flatten)]
    pub booking: Booking,
    pub images_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
}

impl From<Booking> for FullBooking {
    fn from(booking: Booking) -> Self {
        FullBooking::from((booking, None))
    }
}

impl From<(Booking, Option<Address>)> for FullBooking {
    fn from((booking, address): (Booking, Option<Address>)) -> Self {
        Self {
            images_count: booking.images_count(),
            booking,
            address,
        }
    }
}

impl<'r> FromRow<'r, PgRow> for FullBooking {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        let booking = Booking::from_row(row)?;
        let address: Option<Json<Address>> = row.try_get("address")?;
        Ok(FullBooking::from((booking, address.map(|address| address.0))))
    }
}

#[derive(Serialize, Clone, Debug, Default, FromRow)]
pub struct BookingStats {
    pub total_bookings: i64,
    pub pending_bookings: i64,
    pub completed_bookings: i64,
    pub cancelled_bookings: i64,
    pub ewaste_bookings: i64,
    pub biomedical_bookings: i64,
}

#[derive(Debug)]
pub enum Error {
    UnexpectedError,
}

pub struct CreateBookingPayload {
    pub user_id: String,
    pub address_id: String,
    pub waste_category: WasteCategory,
    pub waste_types: Vec<String>,
    pub quantity: String,
    pub pickup_date: NaiveDate,
    pub additional_notes: Option<String>,
    pub images: Option<Vec<String>>,
}

pub async fn create<'e, E: PgExecutor<'e>>(
    e: E,
    payload: CreateBookingPayload,
) -> Result<Booking, Error> {
    sqlx::query_as::<_, Booking>(
        "
        INSERT INTO bookings
            (id, user_id, address_id, waste_category, waste_types, quantity,
             pickup_date, additional_notes, images)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING *
        ",
    )
    .bind(Ulid::new().to_string())
    .bind(payload.user_id)
    .bind(payload.address_id)
    .bind(payload.waste_category.to_string())
    .bind(Json(payload.waste_types))
    .bind(payload.quantity)
    .bind(payload.pickup_date)
    .bind(payload.additional_notes)
    .bind(payload.images.map(Json))
    .fetch_one(e)
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while creating a booking: {}", err);
        Error::UnexpectedError
    })
}

const FULL_BOOKING_SELECT: &str = "
    SELECT bookings.*, ROW_TO_JSON(addresses.*) AS address
    FROM bookings
    LEFT JOIN addresses ON addresses.id = bookings.address_id
";

pub async fn find_by_id_and_user_id<'e, E: PgExecutor<'e>>(
    e: E,
    id: String,
    user_id: String,
) -> Result<Option<FullBooking>, Error> {
    sqlx::query_as::<_, FullBooking>(&format!(
        "{} WHERE bookings.id = $1 AND bookings.user_id = $2",
        FULL_BOOKING_SELECT
    ))
    .bind(id.clone())
    .bind(user_id)
    .fetch_optional(e)
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while fetching booking {}: {}", id, err);
        Error::UnexpectedError
    })
}

/// Query filters. Blank values are treated as absent.
#[derive(Deserialize, Default, Debug)]
pub struct Filters {
    #[serde(default, deserialize_with = "blank_as_none")]
    pub status: Option<BookingStatus>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub waste_category: Option<WasteCategory>,
}

fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr<Err = String>,
{
    match Option::<String>::deserialize(deserializer)?.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => raw.parse::<T>().map(Some).map_err(de::Error::custom),
    }
}

pub async fn find_many_by_user_id<'e, E>(
    e: E,
    user_id: String,
    page: Option<Page>,
    filters: Filters,
) -> Result<Paginated<FullBooking>, Error>
where
    E: PgExecutor<'e> + Copy,
{
    let status = filters.status.map(|status| status.to_string());
    let waste_category = filters.waste_category.map(|category| category.to_string());

    let total = sqlx::query_scalar::<_, i64>(
        "
        SELECT COUNT(id) FROM bookings
        WHERE
            user_id = $1
            AND ($2::text IS NULL OR status = $2)
            AND ($3::text IS NULL OR waste_category = $3)
        ",
    )
    .bind(user_id.clone())
    .bind(status.clone())
    .bind(waste_category.clone())
    .fetch_one(e)
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while counting bookings: {}", err);
        Error::UnexpectedError
    })?;

    let items = sqlx::query_as::<_, FullBooking>(&format!(
        "
        {}
        WHERE
            bookings.user_id = $1
            AND ($2::text IS NULL OR bookings.status = $2)
            AND ($3::text IS NULL OR bookings.waste_category = $3)
        ORDER BY bookings.created_at DESC
        LIMIT $4::bigint
        OFFSET $5::bigint
        ",
        FULL_BOOKING_SELECT
    ))
    .bind(user_id)
    .bind(status)
    .bind(waste_category)
    .bind(page.as_ref().map(Page::limit))
    .bind(page.as_ref().map(Page::offset))
    .fetch_all(e)
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while trying to fetch many bookings: {}", err);
        Error::UnexpectedError
    })?;

    Ok(Paginated::new(items, total as u32, page.as_ref()))
}

pub struct UpdateBookingPayload {
    pub pickup_date: Option<NaiveDate>,
    pub additional_notes: Option<String>,
    pub waste_types: Option<Vec<String>>,
    pub quantity: Option<String>,
}

/// Only touches bookings that are still pending. Returns `None` when the
/// booking changed status in the meantime.
pub async fn update_pending_by_id<'e, E: PgExecutor<'e>>(
    e: E,
    id: String,
    payload: UpdateBookingPayload,
) -> Result<Option<Booking>, Error> {
    sqlx::query_as::<_, Booking>(
        "
            UPDATE bookings SET
                pickup_date = COALESCE($1, pickup_date),
                additional_notes = COALESCE($2, additional_notes),
                waste_types = COALESCE($3, waste_types),
                quantity = COALESCE($4, quantity),
                updated_at = NOW()
            WHERE
                id = $5
                AND status = 'pending'
            RETURNING *
        ",
    )
    .bind(payload.pickup_date)
    .bind(payload.additional_notes)
    .bind(payload.waste_types.map(Json))
    .bind(payload.quantity)
    .bind(id.clone())
    .fetch_optional(e)
    .await
    .map_err(|err| {
        tracing::error!(
            "Error occurred while trying to update booking {}: {}",
            id,
            err
        );
        Error::UnexpectedError
    })
}

pub async fn cancel_pending_by_id<'e, E: PgExecutor<'e>>(
    e: E,
    id: String,
) -> Result<Option<Booking>, Error> {
    sqlx::query_as::<_, Booking>(
        "
            UPDATE bookings SET
                status = 'cancelled',
                updated_at = NOW()
            WHERE
                id = $1
                AND status = 'pending'
            RETURNING *
        ",
    )
    .bind(id.clone())
    .fetch_optional(e)
    .await
    .map_err(|err| {
        tracing::error!(
            "Error occurred while trying to cancel booking {}: {}",
            id,
            err
        );
        Error::UnexpectedError
    })
}

pub async fn stats_by_user_id<'e, E: PgExecutor<'e>>(
    e: E,
    user_id: String,
) -> Result<BookingStats, Error> {
    sqlx::query_as::<_, BookingStats>(
        "
        SELECT
            COUNT(id) AS total_bookings,
            COUNT(id) FILTER (WHERE status = 'pending') AS pending_bookings,
            COUNT(id) FILTER (WHERE status = 'completed') AS completed_bookings,
            COUNT(id) FILTER (WHERE status = 'cancelled') AS cancelled_bookings,
            COUNT(id) FILTER (WHERE waste_category = 'ewaste') AS ewaste_bookings,
            COUNT(id) FILTER (WHERE waste_category = 'biomedical') AS biomedical_bookings
        FROM bookings
        WHERE user_id = $1
        ",
    )
    .bind(user_id.clone())
    .fetch_one(e)
    .await
    .map_err(|err| {
        tracing::error!(
            "Error occurred while computing booking stats for user {}: {}",
            user_id,
            err
        );
        Error::UnexpectedError
    })
}

#[cfg(test)]
pub mod fixtures {
    use super::{Booking, BookingStatus, WasteCategory};
    use chrono::NaiveDate;

    pub fn booking() -> Booking {
        let created_at = NaiveDate::from_ymd_opt(2030, 3, 1)
            .and_then(|date| date.and_hms_opt(10, 30, 0))
            .expect("valid timestamp");

        Booking {
            id: "01J0B7Q9W2K4M6N8P0R2T4V6X8".to_string(),
            user_id: "01HZX3J5B9E2T6K8M4Q7R1S0VW".to_string(),
            address_id: None,
            waste_category: WasteCategory::Ewaste,
            waste_types: vec!["Laptops".to_string(), "Batteries".to_string()],
            quantity: "2 bags".to_string(),
            pickup_date: NaiveDate::from_ymd_opt(2030, 3, 5).expect("valid date"),
            additional_notes: None,
            status: BookingStatus::Pending,
            images: None,
            created_at,
            updated_at: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_its_column_value() {
        for status in [
            BookingStatus::Pending,
            BookingStatus::Confirmed,
            BookingStatus::Completed,
            BookingStatus::Cancelled,
        ] {
            assert_eq!(status.to_string().parse::<BookingStatus>(), Ok(status));
        }
        assert!("shipped".parse::<BookingStatus>().is_err());
    }

    #[test]
    fn only_pending_bookings_are_editable() {
        assert!(BookingStatus::Pending.is_editable());
        assert!(!BookingStatus::Confirmed.is_editable());
        assert!(!BookingStatus::Completed.is_editable());
        assert!(!BookingStatus::Cancelled.is_editable());
    }

    #[test]
    fn blank_filters_are_ignored() {
        let filters: Filters =
            serde_json::from_str(r#"{"status": "", "waste_category": "ewaste"}"#).unwrap();

        assert_eq!(filters.status, None);
        assert_eq!(filters.waste_category, Some(WasteCategory::Ewaste));
        assert!(serde_json::from_str::<Filters>(r#"{"status": "lost"}"#).is_err());
    }

    #[test]
    fn waste_category_deserializes_from_lowercase() {
        let category: WasteCategory = serde_json::from_str("\"biomedical\"").unwrap();
        assert_eq!(category, WasteCategory::Biomedical);
        assert!(serde_json::from_str::<WasteCategory>("\"plastic\"").is_err());
    }

    /// Stores a user with a current address and returns both ids.
    async fn owner(pool: &sqlx::PgPool, email: &str) -> (String, String) {
        let ctx = crate::types::testing::context_with_pool(pool.clone());
        let auth = crate::types::testing::signed_in(ctx, email).await;
        let address = crate::modules::address::repository::create(
            pool,
            crate::modules::address::repository::CreateAddressPayload {
                user_id: auth.user.id.clone(),
                address: "12 Church Street".to_string(),
                pincode: "560001".to_string(),
                city: None,
                state: None,
                maps_link: None,
                is_current: true,
            },
        )
        .await
        .unwrap();

        (auth.user.id, address.id)
    }

    async fn pending_booking(
        pool: &sqlx::PgPool,
        (user_id, address_id): &(String, String),
    ) -> Booking {
        create(
            pool,
            CreateBookingPayload {
                user_id: user_id.clone(),
                address_id: address_id.clone(),
                waste_category: WasteCategory::Biomedical,
                waste_types: vec!["Syringes".to_string()],
                quantity: "1 box".to_string(),
                pickup_date: NaiveDate::from_ymd_opt(2030, 3, 5).unwrap(),
                additional_notes: None,
                images: None,
            },
        )
        .await
        .unwrap()
    }

    async fn set_status(pool: &sqlx::PgPool, id: &str, status: BookingStatus) {
        sqlx::query("UPDATE bookings SET status = $1 WHERE id = $2")
            .bind(status.to_string())
            .bind(id)
            .execute(pool)
            .await
            .unwrap();
    }

    #[sqlx::test]
    #[ignore = "needs a Postgres DATABASE_URL"]
    async fn only_pending_bookings_can_be_updated(pool: sqlx::PgPool) {
        let owner = owner(&pool, "asha@example.com").await;
        let booking = pending_booking(&pool, &owner).await;
        let changes = || UpdateBookingPayload {
            pickup_date: None,
            additional_notes: Some("Gate 2".to_string()),
            waste_types: None,
            quantity: None,
        };

        let updated = update_pending_by_id(&pool, booking.id.clone(), changes())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.additional_notes.as_deref(), Some("Gate 2"));
        assert_eq!(updated.waste_types, booking.waste_types);

        set_status(&pool, &booking.id, BookingStatus::Confirmed).await;

        assert!(update_pending_by_id(&pool, booking.id, changes())
            .await
            .unwrap()
            .is_none());
    }

    #[sqlx::test]
    #[ignore = "needs a Postgres DATABASE_URL"]
    async fn only_pending_bookings_can_be_cancelled(pool: sqlx::PgPool) {
        let owner = owner(&pool, "asha@example.com").await;
        let completed = pending_booking(&pool, &owner).await;
        set_status(&pool, &completed.id, BookingStatus::Completed).await;

        assert!(cancel_pending_by_id(&pool, completed.id)
            .await
            .unwrap()
            .is_none());

        let pending = pending_booking(&pool, &owner).await;
        let cancelled = cancel_pending_by_id(&pool, pending.id).await.unwrap().unwrap();
        assert_eq!(cancelled.status, BookingStatus::Cancelled);
    }

    #[sqlx::test]
    #[ignore = "needs a Postgres DATABASE_URL"]
    async fn listing_without_a_page_returns_every_booking(pool: sqlx::PgPool) {
        let owner = owner(&pool, "asha@example.com").await;
        let mut bookings = Vec::new();
        for _ in 0..12 {
            bookings.push(pending_booking(&pool, &owner).await);
        }
        set_status(&pool, &bookings[0].id, BookingStatus::Completed).await;
        let other = self::owner(&pool, "ravi@example.com").await;
        pending_booking(&pool, &other).await;

        let user_id = owner.0;

        let all = find_many_by_user_id(&pool, user_id.clone(), None, Filters::default())
            .await
            .unwrap();
        assert_eq!(all.items.len(), 12);
        assert_eq!(all.total, 12);
        assert!(all.meta.is_none());

        let page = Page {
            page: 2,
            per_page: 5,
        };
        let windowed =
            find_many_by_user_id(&pool, user_id.clone(), Some(page), Filters::default())
                .await
                .unwrap();
        assert_eq!(windowed.items.len(), 5);
        assert_eq!(windowed.total, 12);
        assert_eq!(windowed.meta.map(|meta| meta.page), Some(2));

        let completed = find_many_by_user_id(
            &pool,
            user_id,
            None,
            Filters {
                status: Some(BookingStatus::Completed),
                waste_category: None,
            },
        )
        .await
        .unwrap();
        assert_eq!(completed.total, 1);
    }
}
