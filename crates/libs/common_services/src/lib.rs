#![deny(clippy::unwrap_used)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

pub mod api;
pub mod database;
mod utils;

pub use utils::*;
