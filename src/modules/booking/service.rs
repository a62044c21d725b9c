use base64::{engine::general_purpose::STANDARD, Engine};
use chrono::{Local, NaiveDate};
use std::sync::Arc;

use super::repository::Booking;
use crate::{
    modules::{notification, user::repository::User},
    types::Context,
};

const DATE_FORMAT: &str = "%Y-%m-%d";
const IMAGE_PREFIX: &str = "data:image/";
const BASE64_MARKER: &str = ";base64,";

#[derive(Debug, PartialEq, Eq)]
pub enum PickupDateError {
    InvalidFormat,
    InPast,
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Parses a `YYYY-MM-DD` pickup date. Today is allowed, earlier days are not.
pub fn parse_pickup_date(raw: &str, today: NaiveDate) -> Result<NaiveDate, PickupDateError> {
    let date = NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map_err(|_| PickupDateError::InvalidFormat)?;

    if date < today {
        return Err(PickupDateError::InPast);
    }

    Ok(date)
}

/// Trims waste types and drops blank entries.
pub fn clean_waste_types(waste_types: Vec<String>) -> Vec<String> {
    waste_types
        .into_iter()
        .map(|waste_type| waste_type.trim().to_string())
        .filter(|waste_type| !waste_type.is_empty())
        .collect()
}

/// An image is accepted when it is a `data:image/...;base64,` URL whose
/// payload decodes.
pub fn is_valid_image(image: &str) -> bool {
    if !image.starts_with(IMAGE_PREFIX) {
        return false;
    }

    match image.split_once(BASE64_MARKER) {
        Some((_, data)) if !data.is_empty() => STANDARD.decode(data).is_ok(),
        _ => false,
    }
}

pub async fn notify_confirmed(ctx: Arc<Context>, user: User, booking: Booking) {
    let notification = notification::service::Notification::booking_confirmed(user.clone(), booking);

    if let Err(err) = notification::service::send(
        ctx.clone(),
        notification.clone(),
        notification::service::Backend::Email,
    )
    .await
    {
        tracing::warn!("Booking confirmation email not sent: {:?}", err);
    }

    if ctx.whatsapp.is_none() || user.phone.trim().is_empty() {
        return;
    }

    if let Err(err) = notification::service::send(
        ctx.clone(),
        notification,
        notification::service::Backend::Whatsapp,
    )
    .await
    {
        tracing::warn!("Booking confirmation WhatsApp message not sent: {:?}", err);
    }
}
