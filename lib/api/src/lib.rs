//! # Concierge API
//!
//! actix-web layer for the concierge webhook: the five voice-agent routes,
//! health reporting and the static landing/details pages.

pub mod pages;
pub mod rest;

pub use rest::{ApiError, RestApi};
