pub mod auth;
pub mod otp;
