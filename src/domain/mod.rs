//! Domain entities shared between the persistence and service layers.

pub mod auth;
pub mod category;
pub mod page;
pub mod types;
pub mod user;
pub mod visit;
