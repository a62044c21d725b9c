use super::types::{request, response};
use crate::{
    modules::{
        address,
        booking::{
            repository::{self, WasteCategory},
            service::{self, PickupDateError},
        },
    },
    types::Context,
};
use chrono::NaiveDate;
use std::sync::Arc;

struct ValidatedBooking {
    waste_category: WasteCategory,
    waste_types: Vec<String>,
    quantity: String,
    pickup_date: NaiveDate,
    additional_notes: Option<String>,
    images: Option<Vec<String>>,
}

fn validate(body: request::Body, today: NaiveDate) -> Result<ValidatedBooking, response::Error> {
    let waste_category = body
        .waste_category
        .ok_or(response::Error::MissingField("waste_category"))?;
    let waste_types = body
        .waste_types
        .ok_or(response::Error::MissingField("waste_types"))?;
    let quantity = body
        .quantity
        .ok_or(response::Error::MissingField("quantity"))?;
    let pickup_date = body
        .pickup_date
        .ok_or(response::Error::MissingField("pickup_date"))?;

    let waste_category = waste_category
        .trim()
        .parse::<WasteCategory>()
        .map_err(|_| response::Error::InvalidWasteCategory)?;

    let waste_types = service::clean_waste_types(waste_types);
    if waste_types.is_empty() {
        return Err(response::Error::NoWasteTypes);
    }

    let quantity = quantity.trim().to_string();
    if quantity.is_empty() {
        return Err(response::Error::MissingQuantity);
    }

    let pickup_date = service::parse_pickup_date(&pickup_date, today).map_err(|err| match err {
        PickupDateError::InvalidFormat => response::Error::InvalidPickupDate,
        PickupDateError::InPast => response::Error::PickupDateInPast,
    })?;

    let images = body.images.filter(|images| !images.is_empty());
    if let Some(images) = &images {
        if !images.iter().all(|image| service::is_valid_image(image)) {
            return Err(response::Error::InvalidImage);
        }
    }

    Ok(ValidatedBooking {
        waste_category,
        waste_types,
        quantity,
        pickup_date,
        additional_notes: body
            .additional_notes
            .map(|notes| notes.trim().to_string())
            .filter(|notes| !notes.is_empty()),
        images,
    })
}

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let booking = validate(payload.body, service::today()).map_err(|err| {
        tracing::warn!("Rejected booking request: {:?}", err);
        err
    })?;

    let user = payload.auth.user;

    let mut tx = ctx.db_conn.clone().pool.begin().await.map_err(|err| {
        tracing::error!("Failed to start database transaction: {}", err);
        response::Error::FailedToCreateBooking
    })?;

    let address = address::repository::find_flagged_current_by_user_id(&mut *tx, user.id.clone())
        .await
        .map_err(|_| response::Error::FailedToCreateBooking)?
        .ok_or(response::Error::NoAddress)?;

    let created = repository::create(
        &mut *tx,
        repository::CreateBookingPayload {
            user_id: user.id.clone(),
            address_id: address.id,
            waste_category: booking.waste_category,
            waste_types: booking.waste_types,
            quantity: booking.quantity,
            pickup_date: booking.pickup_date,
            additional_notes: booking.additional_notes,
            images: booking.images,
        },
    )
    .await
    .map_err(|_| response::Error::FailedToCreateBooking)?;

    tx.commit().await.map_err(|err| {
        tracing::error!("Failed to commit database transaction: {}", err);
        response::Error::FailedToCreateBooking
    })?;

    tracing::info!("Booking {} created for user {}", created.id, user.email);

    tokio::spawn(service::notify_confirmed(ctx.clone(), user, created.clone()));

    Ok(response::Success::BookingCreated(created.into()))
}
