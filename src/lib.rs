//! Outfit Matrix - deterministic outfit matching service for Praxis
//!
//! This library provides the matching engine behind the Praxis stylist.
//! Given a style profile and an occasion it picks one outfit per tier
//! (safe, sharp, relaxed) from a static catalog; identical inputs always
//! produce identical picks.

pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod routes;

// Re-export commonly used types
pub use core::{Catalog, CatalogStore, MatchOutcome, Matcher, ProfileDefaults};
pub use error::{CatalogError, InvalidWeight, MatchError, ValidationError};
pub use models::{MatchMode, MatchRequest, MatchResult, Occasion, StyleProfile, Tier};
