//! Copeplan core data models.
//!
//! This crate defines the catalog entries and the per-request user
//! constraints that the coping-strategy selector works on.

#![warn(missing_docs)]

// Identities
mod id;

// Catalog
mod exercise;
mod catalog;

// Request context
mod constraints;

mod error;

// Re-exports
pub use id::ExerciseId;
pub use exercise::{Exercise, Difficulty, MAX_BENEFIT_RATING};
pub use catalog::{starter_catalog, validate_catalog};
pub use constraints::{UserConstraints, MIN_LEVEL, MAX_LEVEL};
pub use error::{ValidationError, Result};
