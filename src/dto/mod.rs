//! Flat records handed to templates.

pub mod categories;
pub mod pages;
