pub mod auth;
pub mod machines;
pub mod products;
pub mod reviews;
pub mod uploads;
