//! Diesel row types and their conversions into domain entities.

pub mod category;
#[cfg(feature = "server")]
pub mod config;
pub mod page;
pub mod user;
