pub mod address;
pub mod auth;
pub mod booking;
pub mod notification;
pub mod user;

mod router;
pub use router::{get_router, health_check, not_found};
