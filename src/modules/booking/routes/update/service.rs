use super::types::{request, response};
use crate::{
    modules::booking::{
        repository,
        service::{self, PickupDateError},
    },
    types::Context,
};
use chrono::NaiveDate;
use std::sync::Arc;

fn validate(
    body: request::Body,
    today: NaiveDate,
) -> Result<repository::UpdateBookingPayload, response::Error> {
    let pickup_date = body
        .pickup_date
        .map(|raw| service::parse_pickup_date(&raw, today))
        .transpose()
        .map_err(|err| match err {
            PickupDateError::InvalidFormat => response::Error::InvalidPickupDate,
            PickupDateError::InPast => response::Error::PickupDateInPast,
        })?;

    let waste_types = body.waste_types.map(service::clean_waste_types);
    if waste_types.as_ref().is_some_and(|types| types.is_empty()) {
        return Err(response::Error::NoWasteTypes);
    }

    let quantity = body.quantity.map(|quantity| quantity.trim().to_string());
    if quantity.as_ref().is_some_and(|quantity| quantity.is_empty()) {
        return Err(response::Error::MissingQuantity);
    }

    Ok(repository::UpdateBookingPayload {
        pickup_date,
        additional_notes: body.additional_notes.map(|notes| notes.trim().to_string()),
        waste_types,
        quantity,
    })
}

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let user_id = payload.auth.user.id;

    let booking =
        repository::find_by_id_and_user_id(&ctx.db_conn.pool, payload.id.clone(), user_id.clone())
            .await
            .map_err(|_| response::Error::FailedToUpdateBooking)?
            .ok_or_else(|| {
                tracing::warn!("Booking {} not found for user {}", payload.id, user_id);
                response::Error::BookingNotFound
            })?;

    if !booking.booking.status.is_editable() {
        return Err(response::Error::NotPending);
    }

    let changes = validate(payload.body, service::today())?;

    let updated = repository::update_pending_by_id(&ctx.db_conn.pool, payload.id, changes)
        .await
        .map_err(|_| response::Error::FailedToUpdateBooking)?
        .ok_or(response::Error::NotPending)?;

    tracing::info!("Booking {} updated by user {}", updated.id, user_id);

    Ok(response::Success::BookingUpdated(updated.into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2030, 3, 5).unwrap()
    }

    #[test]
    fn empty_body_changes_nothing() {
        let changes = validate(request::Body::default(), today()).unwrap();

        assert!(changes.pickup_date.is_none());
        assert!(changes.waste_types.is_none());
        assert!(changes.quantity.is_none());
        assert!(changes.additional_notes.is_none());
    }

    #[test]
    fn rejects_malformed_pickup_date() {
        let body = request::Body {
            pickup_date: Some("tomorrow".to_string()),
            ..Default::default()
        };

        assert!(matches!(
            validate(body, today()),
            Err(response::Error::InvalidPickupDate)
        ));
    }

    #[test]
    fn rejects_emptying_waste_types() {
        let body = request::Body {
            waste_types: Some(vec![]),
            ..Default::default()
        };

        assert!(matches!(
            validate(body, today()),
            Err(response::Error::NoWasteTypes)
        ));
    }
}
