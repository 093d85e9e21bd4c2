//! The selection engine - one call from (catalog, constraints) to a report.

use copeplan_core::{validate_catalog, Exercise, UserConstraints};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use crate::error::Result;
use crate::scoring::ScoringWeights;
use crate::selector::{GreedySelector, SelectorStrategy, StrategySelector};
use crate::stats::AlgorithmStats;

/// Configuration for the selection engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Scoring weights for the default selector
    #[serde(default)]
    pub weights: ScoringWeights,

    /// How many advisory picks to include in each report
    #[serde(default = "default_top_n")]
    pub top_n: usize,
}

/// Explanation when nothing in the catalog can be ranked at all.
const NO_USABLE_EXERCISES: &str =
    "No exercise could be chosen: the catalog has no usable exercises.";

fn default_top_n() -> usize {
    3
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            weights: ScoringWeights::default(),
            top_n: default_top_n(),
        }
    }
}

/// Everything a caller needs to present one plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionReport {
    /// Exercises to do, in acceptance order
    pub selection: Vec<Exercise>,
    /// Why they were chosen
    pub explanation: String,
    /// Run statistics
    pub stats: AlgorithmStats,
    /// Best-ranked exercises regardless of time
    pub top: Vec<Exercise>,
}

/// Runs the selector and assembles its outputs.
///
/// Holds no state between calls; the catalog and constraints are borrowed
/// for the duration of [`plan`](Self::plan) only.
pub struct SelectionEngine {
    selector: Box<dyn StrategySelector>,
    config: EngineConfig,
    // False once a caller-supplied selector replaces the one built from `config.weights`.
    uses_config_weights: bool,
}

impl SelectionEngine {
    /// Create an engine with the default configuration.
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Create an engine whose greedy selector uses `config.weights`.
    pub fn with_config(config: EngineConfig) -> Self {
        let greedy = GreedySelector::new().with_weights(config.weights.clone());
        Self {
            selector: Box::new(SelectorStrategy::Greedy(greedy)),
            config,
            uses_config_weights: true,
        }
    }

    /// Set the selector strategy.
    ///
    /// The new selector brings its own scoring, so `config.weights` no longer
    /// applies and [`plan_checked`](Self::plan_checked) stops validating it.
    /// Validate the replacement's weights before handing it over.
    pub fn with_selector(mut self, selector: Box<dyn StrategySelector>) -> Self {
        self.selector = selector;
        self.uses_config_weights = false;
        self
    }

    /// Current configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Selector in use.
    pub fn selector(&self) -> &dyn StrategySelector {
        self.selector.as_ref()
    }

    /// Build a plan. Total over any input; malformed catalog entries are
    /// left out of ranking.
    pub fn plan(&self, catalog: &[Exercise], constraints: &UserConstraints) -> SelectionReport {
        debug!(
            "Planning over {} exercises with {} min, energy {}, stress {}, mood '{}'",
            catalog.len(),
            constraints.available_time_minutes,
            constraints.current_energy_level,
            constraints.stress_level,
            constraints.current_mood
        );

        let selection = self.selector.select(catalog, constraints);
        let explanation = if catalog.iter().any(Exercise::is_well_formed) {
            self.selector.explain(&selection, constraints)
        } else {
            NO_USABLE_EXERCISES.to_string()
        };
        let stats = AlgorithmStats::collect(catalog, constraints, &selection, |e| {
            self.selector.score(e, constraints)
        });
        let top = self.selector.top_recommendations(catalog, constraints, self.config.top_n);

        info!(
            "Selected {}/{} exercises using {}/{} min",
            stats.exercises_selected,
            stats.total_exercises_evaluated,
            stats.total_time_minutes,
            stats.available_time_minutes
        );

        SelectionReport {
            selection,
            explanation,
            stats,
            top,
        }
    }

    /// Like [`plan`](Self::plan), but rejects malformed input instead of
    /// skipping it.
    pub fn plan_checked(
        &self,
        catalog: &[Exercise],
        constraints: &UserConstraints,
    ) -> Result<SelectionReport> {
        if self.uses_config_weights {
            self.config.weights.validate()?;
        }
        constraints.validate()?;
        validate_catalog(catalog)?;
        Ok(self.plan(catalog, constraints))
    }
}

impl Default for SelectionEngine {
    fn default() -> Self {
        Self::new()
    }
}
