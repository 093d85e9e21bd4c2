//! Selector error types.

use copeplan_core::ValidationError;

/// Error type for selector operations.
pub type Result<T> = std::result::Result<T, SelectorError>;

/// Errors raised when checked entry points reject their input.
#[derive(Debug, thiserror::Error)]
pub enum SelectorError {
    /// Catalog or constraints violate their invariants
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A scoring weight is negative or not finite
    #[error("scoring weight '{name}' must be finite and non-negative, got {value}")]
    InvalidWeight {
        /// Field name
        name: &'static str,
        /// Value as configured
        value: f64,
    },
}
