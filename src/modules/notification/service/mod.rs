pub mod email;
pub mod whatsapp;

use crate::{
    modules::{booking::repository::Booking, user::repository::User},
    types::Context,
};
use std::sync::Arc;

pub enum Backend {
    Email,
    Whatsapp,
}

pub mod types {
    use super::{Booking, User};

    #[derive(Clone)]
    pub struct OtpRequested {
        pub user: User,
        pub code: String,
        pub ttl_minutes: u64,
    }

    #[derive(Clone)]
    pub struct BookingConfirmed {
        pub user: User,
        pub booking: Booking,
    }
}

#[derive(Clone)]
pub enum Notification {
    OtpRequested(types::OtpRequested),
    BookingConfirmed(types::BookingConfirmed),
}

impl Notification {
    pub fn otp_requested(user: User, code: String, ttl_minutes: u64) -> Self {
        Notification::OtpRequested(types::OtpRequested {
            user,
            code,
            ttl_minutes,
        })
    }

    pub fn booking_confirmed(user: User, booking: Booking) -> Self {
        Notification::BookingConfirmed(types::BookingConfirmed { user, booking })
    }
}

#[derive(Debug, PartialEq)]
pub enum Error {
    NotSent,
    NotConfigured,
    InvalidNotification,
    InvalidRecipient,
}

pub type Result<T> = std::result::Result<T, Error>;

pub async fn send(ctx: Arc<Context>, notification: Notification, backend: Backend) -> Result<()> {
    match backend {
        Backend::Email => email::send(ctx, notification).await,
        Backend::Whatsapp => whatsapp::send(ctx, notification).await,
    }
}
