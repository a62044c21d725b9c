use crate::{modules::user::repository::User, types::Context};
use lettre::{
    message::{Mailbox, MultiPart},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use std::sync::Arc;

use super::{types, Error, Notification, Result};

const STARTTLS_PORT: u16 = 587;

pub async fn send(ctx: Arc<Context>, notification: Notification) -> Result<()> {
    let payload = match notification {
        Notification::OtpRequested(n) => otp_requested_email(n),
        Notification::BookingConfirmed(n) => booking_confirmed_email(n),
    };

    send_email(ctx, payload).await
}

struct SendEmailPayload {
    user: User,
    subject: String,
    text: String,
    html: String,
}

fn recipient(user: &User) -> Result<Mailbox> {
    let address = user.email.parse::<lettre::Address>().map_err(|err| {
        tracing::error!("Invalid recipient address {}: {}", user.email, err);
        Error::InvalidRecipient
    })?;

    let name = Some(user.name.trim().to_string()).filter(|name| !name.is_empty());
    Ok(Mailbox::new(name, address))
}

fn transport(ctx: &Context) -> Result<AsyncSmtpTransport<Tokio1Executor>> {
    let builder = match ctx.mail.port {
        Some(STARTTLS_PORT) => AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&ctx.mail.host),
        _ => AsyncSmtpTransport::<Tokio1Executor>::relay(&ctx.mail.host),
    }
    .map_err(|err| {
        tracing::error!("Failed to create mail transport: {}", err);
        Error::NotSent
    })?;

    let builder = match ctx.mail.port {
        Some(port) => builder.port(port),
        None => builder,
    };

    Ok(builder
        .credentials(Credentials::new(
            ctx.mail.user.clone(),
            ctx.mail.password.clone(),
        ))
        .build())
}

async fn send_email(ctx: Arc<Context>, payload: SendEmailPayload) -> Result<()> {
    let from = ctx.mail.sender.parse::<Mailbox>().map_err(|err| {
        tracing::error!("Invalid sender address {}: {}", ctx.mail.sender, err);
        Error::NotSent
    })?;

    let email = Message::builder()
        .from(from)
        .to(recipient(&payload.user)?)
        .subject(payload.subject)
        .multipart(MultiPart::alternative_plain_html(payload.text, payload.html))
        .map_err(|err| {
            tracing::error!("Failed to build email: {}", err);
            Error::NotSent
        })?;

    transport(&ctx)?
        .send(email)
        .await
        .map(|_| tracing::info!("Email sent to {}", payload.user.email))
        .map_err(|err| {
            tracing::error!("Failed to send email to {}: {}", payload.user.email, err);
            Error::NotSent
        })
}

fn escape(raw: &str) -> String {
    raw.chars()
        .map(|c| match c {
            '&' => "&amp;".to_string(),
            '<' => "&lt;".to_string(),
            '>' => "&gt;".to_string(),
            '"' => "&quot;".to_string(),
            '\'' => "&#39;".to_string(),
            c => c.to_string(),
        })
        .collect()
}

fn layout(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<body style="font-family: Arial, sans-serif; line-height: 1.6; color: #333;">
  <div style="max-width: 600px; margin: 0 auto; padding: 20px;">
    <div style="background-color: #10b981; color: white; padding: 20px; text-align: center; border-radius: 8px 8px 0 0;">
      <h1>{title}</h1>
    </div>
    <div style="background-color: #f8f9fa; padding: 30px; border-radius: 0 0 8px 8px;">
      {content}
      <p>Thank you for choosing our eco-friendly waste collection service!</p>
    </div>
    <div style="text-align: center; margin-top: 30px; color: #666; font-size: 14px;">
      <p>Best regards,<br>Waste Collection Service Team</p>
    </div>
  </div>
</body>
</html>"#
    )
}

fn otp_requested_email(n: types::OtpRequested) -> SendEmailPayload {
    let expiry = match n.ttl_minutes {
        1 => "1 minute".to_string(),
        minutes => format!("{} minutes", minutes),
    };

    let html = layout(
        "Waste Collection Service",
        &format!(
            r#"<h2>Your OTP Code</h2>
      <p>Hello!</p>
      <p>You requested an OTP to access your waste collection service account.</p>
      <div style="background-color: #ffffff; border: 2px solid #10b981; border-radius: 8px; padding: 20px; text-align: center; font-size: 32px; font-weight: bold; color: #10b981; letter-spacing: 4px;">{code}</div>
      <p>This code will expire in <strong>{expiry}</strong>.</p>
      <p><strong>Security Notice:</strong> If you didn't request this code, please ignore this email.</p>"#,
            code = escape(&n.code),
            expiry = expiry,
        ),
    );

    let text = format!(
        "Hello!\n\n\
         You requested an OTP to access your waste collection service account.\n\n\
         Your OTP code is: {}\n\n\
         This code will expire in {}.\n\n\
         If you didn't request this code, please ignore this email.\n\n\
         Best regards,\n\
         Waste Collection Service Team\n",
        n.code, expiry
    );

    SendEmailPayload {
        user: n.user,
        subject: String::from("Your OTP Code - Waste Collection Service"),
        text,
        html,
    }
}

fn booking_confirmed_email(n: types::BookingConfirmed) -> SendEmailPayload {
    let booking = &n.booking;
    let category = booking.waste_category.label();
    let greeting = match n.user.name.trim() {
        "" => "there".to_string(),
        name => name.to_string(),
    };
    let waste_types = booking.waste_types.join(", ");
    let pickup_date = booking.pickup_date.format("%B %d, %Y").to_string();
    let status = booking.status.to_string();

    let html = layout(
        "Booking Confirmed",
        &format!(
            r#"<h2>Your {category} Pickup is Scheduled</h2>
      <p>Hello {greeting}!</p>
      <p>Your waste pickup has been successfully scheduled. Here are the details:</p>
      <div style="background-color: #ffffff; padding: 20px; border-radius: 8px; margin: 20px 0;">
        <p><strong>Booking ID:</strong> #{id}</p>
        <p><strong>Waste Category:</strong> {category}</p>
        <p><strong>Waste Types:</strong> {waste_types}</p>
        <p><strong>Quantity:</strong> {quantity}</p>
        <p><strong>Pickup Date:</strong> {pickup_date}</p>
        <p><strong>Status:</strong> {status}</p>
      </div>
      <p>Our team will contact you before the scheduled pickup time to confirm the visit.</p>"#,
            category = category,
            greeting = escape(&greeting),
            id = escape(&booking.id),
            waste_types = escape(&waste_types),
            quantity = escape(&booking.quantity),
            pickup_date = pickup_date,
            status = status,
        ),
    );

    let text = format!(
        "Hello {}!\n\n\
         Your waste pickup has been successfully scheduled.\n\n\
         Booking ID: #{}\n\
         Waste Category: {}\n\
         Waste Types: {}\n\
         Quantity: {}\n\
         Pickup Date: {}\n\
         Status: {}\n\n\
         Our team will contact you before the scheduled pickup time to confirm the visit.\n",
        greeting, booking.id, category, waste_types, booking.quantity, pickup_date, status
    );

    SendEmailPayload {
        subject: format!("Booking Confirmed - {} Pickup", category),
        user: n.user,
        text,
        html,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::{booking::repository::fixtures::booking, user::repository::fixtures::user};

    #[test]
    fn otp_email_carries_code_and_expiry() {
        let email = otp_requested_email(types::OtpRequested {
            user: user("jane@example.com", "jane", ""),
            code: "042913".to_string(),
            ttl_minutes: 5,
        });

        assert_eq!(email.subject, "Your OTP Code - Waste Collection Service");
        assert!(email.text.contains("Your OTP code is: 042913"));
        assert!(email.text.contains("expire in 5 minutes"));
        assert!(email.html.contains("042913"));
    }

    #[test]
    fn booking_email_escapes_user_supplied_text() {
        let mut booking = booking();
        booking.quantity = "<b>2 bags</b>".to_string();

        let email = booking_confirmed_email(types::BookingConfirmed {
            user: user("jane@example.com", "Jane Doe", "9876543210"),
            booking,
        });

        assert_eq!(email.subject, "Booking Confirmed - E-Waste Pickup");
        assert!(email.html.contains("&lt;b&gt;2 bags&lt;/b&gt;"));
        assert!(email.html.contains("Hello Jane Doe!"));
        assert!(email.text.contains("Pickup Date: March 05, 2030"));
    }

    #[test]
    fn recipient_without_name_uses_bare_address() {
        let mailbox = recipient(&user("jane@example.com", "", "")).unwrap();
        assert_eq!(mailbox.to_string(), "jane@example.com");
    }
}
