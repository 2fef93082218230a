//! Core library exports for the Rango catalog.
//!
//! The `data` feature exposes the domain types, Diesel models and
//! repositories on their own. The `server` feature adds the forms, services
//! and actix-web routes used by the web application.

#[cfg(feature = "data")]
pub mod db;
#[cfg(feature = "data")]
pub mod domain;
#[cfg(feature = "server")]
pub mod dto;
#[cfg(feature = "server")]
pub mod forms;
#[cfg(feature = "data")]
pub mod models;
#[cfg(feature = "data")]
pub mod repository;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "data")]
pub mod schema;
#[cfg(feature = "data")]
pub mod seed;
#[cfg(feature = "server")]
pub mod services;
