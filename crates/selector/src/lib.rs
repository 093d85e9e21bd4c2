//! Constrained coping-strategy selection.
//!
//! Scores exercises against the user's current time, energy, mood and
//! stress, greedily picks a subset that fits the time budget, and explains
//! the pick. Everything here is pure and synchronous.

#![warn(missing_docs)]

pub mod scoring;
pub mod budget;
pub mod selector;
pub mod explain;
pub mod stats;
pub mod engine;
pub mod error;

pub use scoring::{ScoringWeights, ScoreBreakdown};
pub use budget::TimeBudget;
pub use selector::{StrategySelector, GreedySelector, SelectorStrategy, RankedExercise};
pub use explain::explain_selection;
pub use stats::{AlgorithmStats, calculate_total_benefit, calculate_total_time, validate_constraints};
pub use engine::{SelectionEngine, EngineConfig, SelectionReport};
pub use error::{SelectorError, Result};
