//! Validation errors for catalog entries and constraints.

/// Result alias for validation.
pub type Result<T> = std::result::Result<T, ValidationError>;

/// Caller contract violations detected at the boundary.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// Exercise takes no time at all
    #[error("exercise '{id}' has a non-positive duration")]
    NonPositiveDuration {
        /// Offending exercise
        id: String,
    },

    /// Benefit rating outside [0, 5] or NaN
    #[error("exercise '{id}' has benefit rating {rating} outside [0, 5]")]
    RatingOutOfRange {
        /// Offending exercise
        id: String,
        /// Rating as supplied
        rating: f64,
    },

    /// Same id appears twice in one catalog
    #[error("duplicate exercise id '{0}'")]
    DuplicateId(String),

    /// Energy level outside 1..=10
    #[error("energy level {0} outside 1..=10")]
    EnergyOutOfRange(u8),

    /// Stress level outside 1..=10
    #[error("stress level {0} outside 1..=10")]
    StressOutOfRange(u8),

    /// Unknown difficulty label
    #[error("unknown difficulty '{0}' (expected easy, medium or hard)")]
    UnknownDifficulty(String),
}
