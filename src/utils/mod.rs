pub mod database;
pub mod json;
pub mod otp;
pub mod pagination;
pub mod validation;
