use crate::{
    modules::user::repository::User,
    types::{Context, WhatsappContext},
};
use hyper::StatusCode;
use reqwest::Client;
use std::sync::Arc;

use super::{types, Error, Notification, Result};

const DEFAULT_COUNTRY_CODE: &str = "+91";

/// Twilio expects `whatsapp:+<country><number>`. Local numbers are assumed
/// to be Indian.
pub fn whatsapp_address(phone: &str) -> Option<String> {
    let phone: String = phone.chars().filter(|c| !c.is_whitespace()).collect();

    match phone.as_str() {
        "" => None,
        p if p.starts_with("whatsapp:") => Some(p.to_string()),
        p if p.starts_with('+') => Some(format!("whatsapp:{}", p)),
        p => Some(format!("whatsapp:{}{}", DEFAULT_COUNTRY_CODE, p)),
    }
}

fn sender_address(from: &str) -> String {
    match from.starts_with("whatsapp:") {
        true => from.to_string(),
        false => format!("whatsapp:{}", from),
    }
}

pub async fn send(ctx: Arc<Context>, notification: Notification) -> Result<()> {
    let config = ctx.whatsapp.as_ref().ok_or(Error::NotConfigured)?;

    match notification {
        Notification::BookingConfirmed(n) => {
            let body = booking_confirmed_message(&n);
            send_message(config, &n.user, body).await
        }
        Notification::OtpRequested(_) => Err(Error::InvalidNotification),
    }
}

async fn send_message(config: &WhatsappContext, user: &User, body: String) -> Result<()> {
    let to = whatsapp_address(&user.phone).ok_or(Error::InvalidRecipient)?;
    let endpoint = format!(
        "{}/Accounts/{}/Messages.json",
        config.api_endpoint.trim_end_matches('/'),
        config.account_sid
    );
    let params = [
        ("From", sender_address(&config.from)),
        ("To", to.clone()),
        ("Body", body),
    ];

    let res = Client::new()
        .post(endpoint)
        .basic_auth(&config.account_sid, Some(&config.auth_token))
        .form(&params)
        .send()
        .await
        .map_err(|err| {
            tracing::error!("Failed to send WhatsApp message: {}", err);
            Error::NotSent
        })?;

    match res.status() {
        StatusCode::OK | StatusCode::CREATED => (),
        status => {
            let text = res.text().await.unwrap_or_default();
            tracing::error!("Twilio rejected WhatsApp message ({}): {}", status, text);
            return Err(Error::NotSent);
        }
    }

    tracing::info!("WhatsApp message sent to {}", to);
    Ok(())
}

fn booking_confirmed_message(n: &types::BookingConfirmed) -> String {
    let booking = &n.booking;
    format!(
        "Hello {}! Your {} pickup is confirmed.\n\
         Booking ID: #{}\n\
         Waste Types: {}\n\
         Quantity: {}\n\
         Pickup Date: {}\n\
         Our team will contact you before the visit.",
        match n.user.name.trim() {
            "" => "there",
            name => name,
        },
        booking.waste_category.label(),
        booking.id,
        booking.waste_types.join(", "),
        booking.quantity,
        booking.pickup_date.format("%B %d, %Y"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        modules::{booking::repository::fixtures::booking, user::repository::fixtures::user},
        types::testing,
    };

    #[test]
    fn local_numbers_get_indian_country_code() {
        assert_eq!(
            whatsapp_address("98765 43210"),
            Some("whatsapp:+919876543210".to_string())
        );
        assert_eq!(
            whatsapp_address("+14155238886"),
            Some("whatsapp:+14155238886".to_string())
        );
        assert_eq!(whatsapp_address("  "), None);
    }

    #[test]
    fn booking_message_mentions_category_and_date() {
        let message = booking_confirmed_message(&types::BookingConfirmed {
            user: user("jane@example.com", "Jane Doe", "9876543210"),
            booking: booking(),
        });

        assert!(message.starts_with("Hello Jane Doe! Your E-Waste pickup is confirmed."));
        assert!(message.contains("Pickup Date: March 05, 2030"));
    }

    #[tokio::test]
    async fn unconfigured_whatsapp_is_reported() {
        let notification = Notification::booking_confirmed(
            user("jane@example.com", "Jane Doe", "9876543210"),
            booking(),
        );

        assert_eq!(
            send(testing::context(), notification).await,
            Err(Error::NotConfigured)
        );
    }
}
