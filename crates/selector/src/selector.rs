//! Coping-strategy selection.
//!
//! Ranking uses benefit-density (`score / duration_minutes`), the
//! fractional-knapsack key, with a total order for ties:
//! higher score, then shorter duration, then smaller id.

use std::cmp::Ordering;
use copeplan_core::{Exercise, UserConstraints};
use tracing::{debug, warn};
use crate::budget::TimeBudget;
use crate::error::Result;
use crate::explain;
use crate::scoring::{ScoreBreakdown, ScoringWeights};
use crate::stats::AlgorithmStats;

/// An exercise with its ranking keys.
#[derive(Debug, Clone)]
pub struct RankedExercise<'a> {
    /// The catalog entry
    pub exercise: &'a Exercise,
    /// Score contributions
    pub breakdown: ScoreBreakdown,
    /// Composite score
    pub score: f64,
    /// `score / duration_minutes`
    pub density: f64,
}

impl RankedExercise<'_> {
    fn rank_order(&self, other: &Self) -> Ordering {
        other.density.total_cmp(&self.density)
            .then_with(|| other.score.total_cmp(&self.score))
            .then_with(|| self.exercise.duration_minutes.cmp(&other.exercise.duration_minutes))
            .then_with(|| self.exercise.id.cmp(&other.exercise.id))
    }
}

/// Strategy for choosing exercises under the user's constraints.
pub trait StrategySelector: Send + Sync {
    /// Per-signal contributions to an exercise's score.
    fn score_breakdown(&self, exercise: &Exercise, constraints: &UserConstraints) -> ScoreBreakdown;

    /// Composite score of one exercise.
    fn score(&self, exercise: &Exercise, constraints: &UserConstraints) -> f64 {
        self.score_breakdown(exercise, constraints).total()
    }

    /// Exercises to do, in acceptance order, fitting the time budget.
    fn select(&self, catalog: &[Exercise], constraints: &UserConstraints) -> Vec<Exercise>;

    /// At most `n` best-ranked exercises, ignoring the time budget.
    fn top_recommendations(
        &self,
        catalog: &[Exercise],
        constraints: &UserConstraints,
        n: usize,
    ) -> Vec<Exercise>;

    /// Human-readable justification of `selection`.
    fn explain(&self, selection: &[Exercise], constraints: &UserConstraints) -> String;
}

/// Greedy bounded-knapsack approximation over benefit-density.
///
/// Not globally optimal, but `O(n log n)`, deterministic and easy to explain.
#[derive(Debug, Clone, Default)]
pub struct GreedySelector {
    weights: ScoringWeights,
}

impl GreedySelector {
    /// Create a selector with the default weights.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the scoring weights.
    ///
    /// Not checked: negative or NaN weights break the monotonicity of the
    /// score. Run [`ScoringWeights::validate`] first, or use
    /// [`try_with_weights`](Self::try_with_weights).
    pub fn with_weights(mut self, weights: ScoringWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Set the scoring weights after validating them.
    pub fn try_with_weights(self, weights: ScoringWeights) -> Result<Self> {
        weights.validate()?;
        Ok(self.with_weights(weights))
    }

    /// Scoring weights in use.
    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Per-signal score contributions for one exercise.
    pub fn score_breakdown(&self, exercise: &Exercise, constraints: &UserConstraints) -> ScoreBreakdown {
        self.weights.breakdown(exercise, constraints)
    }

    /// Rank the well-formed part of `catalog`, best first.
    ///
    /// Entries with a zero duration or a rating outside [0, 5] are left out.
    pub fn rank<'a>(
        &self,
        catalog: &'a [Exercise],
        constraints: &UserConstraints,
    ) -> Vec<RankedExercise<'a>> {
        let mut ranked: Vec<_> = catalog
            .iter()
            .filter(|exercise| match exercise.validate() {
                Ok(()) => true,
                Err(e) => {
                    warn!("Excluding malformed exercise from ranking: {}", e);
                    false
                }
            })
            .map(|exercise| {
                let breakdown = self.weights.breakdown(exercise, constraints);
                let score = breakdown.total();
                RankedExercise {
                    exercise,
                    density: score / f64::from(exercise.duration_minutes),
                    score,
                    breakdown,
                }
            })
            .collect();

        ranked.sort_by(|a, b| a.rank_order(b));
        ranked
    }

    /// Pick exercises that fit the time budget, best density first.
    ///
    /// An exercise that does not fit the remaining time is skipped and the
    /// walk carries on, so a shorter one further down can still get in.
    pub fn select_optimal_strategies(
        &self,
        catalog: &[Exercise],
        constraints: &UserConstraints,
    ) -> Vec<Exercise> {
        let mut budget = TimeBudget::new(constraints.available_time_minutes);
        if budget.is_exhausted() {
            debug!("No time available, nothing to select");
            return Vec::new();
        }

        let mut selected = Vec::new();
        for candidate in self.rank(catalog, constraints) {
            let duration = candidate.exercise.duration_minutes;
            if budget.consume(duration) {
                debug!(
                    "Accepted {} ({} min, density {:.3}), {} min left",
                    candidate.exercise.id,
                    duration,
                    candidate.density,
                    budget.remaining()
                );
                selected.push(candidate.exercise.clone());
            } else {
                debug!(
                    "Skipped {} ({} min), only {} min left",
                    candidate.exercise.id,
                    duration,
                    budget.remaining()
                );
            }

            if budget.is_exhausted() {
                break;
            }
        }

        selected
    }

    /// The `n` best-ranked exercises regardless of time.
    pub fn get_top_recommendations(
        &self,
        catalog: &[Exercise],
        constraints: &UserConstraints,
        n: usize,
    ) -> Vec<Exercise> {
        if n == 0 {
            return Vec::new();
        }
        self.rank(catalog, constraints)
            .into_iter()
            .take(n)
            .map(|ranked| ranked.exercise.clone())
            .collect()
    }

    /// Justify `selection` signal by signal.
    pub fn explain_selection(&self, selection: &[Exercise], constraints: &UserConstraints) -> String {
        explain::explain_selection(&self.weights, selection, constraints)
    }

    /// Statistics for a selection drawn from `catalog`.
    pub fn algorithm_stats(
        &self,
        catalog: &[Exercise],
        constraints: &UserConstraints,
        selection: &[Exercise],
    ) -> AlgorithmStats {
        AlgorithmStats::collect(catalog, constraints, selection, |e| self.weights.score(e, constraints))
    }
}

impl StrategySelector for GreedySelector {
    fn score_breakdown(&self, exercise: &Exercise, constraints: &UserConstraints) -> ScoreBreakdown {
        self.weights.breakdown(exercise, constraints)
    }

    fn select(&self, catalog: &[Exercise], constraints: &UserConstraints) -> Vec<Exercise> {
        self.select_optimal_strategies(catalog, constraints)
    }

    fn top_recommendations(
        &self,
        catalog: &[Exercise],
        constraints: &UserConstraints,
        n: usize,
    ) -> Vec<Exercise> {
        self.get_top_recommendations(catalog, constraints, n)
    }

    fn explain(&self, selection: &[Exercise], constraints: &UserConstraints) -> String {
        self.explain_selection(selection, constraints)
    }
}

/// Selector strategies available.
#[derive(Debug, Clone)]
pub enum SelectorStrategy {
    /// Greedy benefit-density selector
    Greedy(GreedySelector),
}

impl Default for SelectorStrategy {
    fn default() -> Self {
        Self::Greedy(GreedySelector::default())
    }
}

impl StrategySelector for SelectorStrategy {
    fn score_breakdown(&self, exercise: &Exercise, constraints: &UserConstraints) -> ScoreBreakdown {
        match self {
            Self::Greedy(s) => StrategySelector::score_breakdown(s, exercise, constraints),
        }
    }

    fn select(&self, catalog: &[Exercise], constraints: &UserConstraints) -> Vec<Exercise> {
        match self {
            Self::Greedy(s) => s.select(catalog, constraints),
        }
    }

    fn top_recommendations(
        &self,
        catalog: &[Exercise],
        constraints: &UserConstraints,
        n: usize,
    ) -> Vec<Exercise> {
        match self {
            Self::Greedy(s) => s.top_recommendations(catalog, constraints, n),
        }
    }

    fn explain(&self, selection: &[Exercise], constraints: &UserConstraints) -> String {
        match self {
            Self::Greedy(s) => s.explain(selection, constraints),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::{calculate_total_time, validate_constraints};
    use copeplan_core::{starter_catalog, Difficulty};

    fn scenario_catalog() -> Vec<Exercise> {
        vec![
            Exercise::new("A", "Box breathing", 5, 4.5).with_mood_tags(["Anxious"]),
            Exercise::new("B", "Brain dump", 10, 4.8).with_mood_tags(["Stressed"]),
            Exercise::new("C", "Body scan", 20, 4.2).with_mood_tags(["Stressed"]),
        ]
    }

    fn scenario_constraints(time: u32) -> UserConstraints {
        UserConstraints::new(time, 7, "Anxious", 6).unwrap()
    }

    fn ids(selection: &[Exercise]) -> Vec<&str> {
        selection.iter().map(|e| e.id.as_str()).collect()
    }

    #[test]
    fn test_scenario_selects_a_then_b() {
        let selector = GreedySelector::new();
        let constraints = scenario_constraints(15);
        let selection = selector.select_optimal_strategies(&scenario_catalog(), &constraints);

        assert_eq!(ids(&selection), vec!["A", "B"]);
        assert_eq!(calculate_total_time(&selection), 15);
        assert!(validate_constraints(&selection, &constraints));
    }

    #[test]
    fn test_zero_budget_selects_nothing() {
        let selector = GreedySelector::new();
        let selection = selector.select_optimal_strategies(&scenario_catalog(), &scenario_constraints(0));
        assert!(selection.is_empty());
    }

    #[test]
    fn test_empty_catalog_selects_nothing() {
        let selector = GreedySelector::new();
        assert!(selector.select_optimal_strategies(&[], &scenario_constraints(60)).is_empty());
    }

    #[test]
    fn test_oversized_exercise_is_never_selected() {
        let selector = GreedySelector::new();
        let catalog = vec![Exercise::new("long", "Long hike", 90, 5.0).with_recommended(true)];
        assert!(selector.select_optimal_strategies(&catalog, &scenario_constraints(60)).is_empty());
    }

    #[test]
    fn test_walk_continues_past_a_miss() {
        let selector = GreedySelector::new();
        // "big" has the best density but only "small" fits after "first".
        let catalog = vec![
            Exercise::new("first", "First", 10, 5.0).with_recommended(true),
            Exercise::new("big", "Big", 12, 5.0),
            Exercise::new("small", "Small", 5, 1.0),
        ];
        let constraints = UserConstraints::new(16, 5, "Calm", 5).unwrap();
        let ranked: Vec<_> = selector.rank(&catalog, &constraints)
            .iter()
            .map(|r| r.exercise.id.to_string())
            .collect();
        assert_eq!(ranked, vec!["first", "big", "small"]);

        let selection = selector.select_optimal_strategies(&catalog, &constraints);
        assert_eq!(ids(&selection), vec!["first", "small"]);
    }

    #[test]
    fn test_budget_invariant_over_many_budgets() {
        let selector = GreedySelector::new();
        let catalog = starter_catalog();
        for time in 0..=120 {
            for energy in [1u8, 4, 7, 10] {
                let constraints = UserConstraints::new(time, energy, "Stressed", 8).unwrap();
                let selection = selector.select_optimal_strategies(&catalog, &constraints);
                assert!(validate_constraints(&selection, &constraints));
            }
        }
    }

    #[test]
    fn test_selection_is_deterministic() {
        let selector = GreedySelector::new();
        let constraints = UserConstraints::new(45, 6, "Anxious", 7).unwrap();
        let catalog = starter_catalog();
        let first = selector.select_optimal_strategies(&catalog, &constraints);
        for _ in 0..10 {
            assert_eq!(selector.select_optimal_strategies(&catalog, &constraints), first);
        }

        let mut reversed = catalog.clone();
        reversed.reverse();
        assert_eq!(selector.select_optimal_strategies(&reversed, &constraints), first);
    }

    #[test]
    fn test_ties_break_on_duration_then_id() {
        let selector = GreedySelector::new();
        let constraints = UserConstraints::new(60, 5, "Calm", 5).unwrap();
        // Identical score and duration, so only the id decides.
        let catalog = vec![
            Exercise::new("zeta", "Zeta", 10, 3.0),
            Exercise::new("alpha", "Alpha", 10, 3.0),
        ];
        let top = selector.get_top_recommendations(&catalog, &constraints, 2);
        assert_eq!(ids(&top), vec!["alpha", "zeta"]);
    }

    #[test]
    fn test_ties_on_density_prefer_higher_score() {
        let w = ScoringWeights {
            mood_match_bonus: 0.0,
            low_energy_easy_bonus: 0.0,
            ..Default::default()
        };
        let selector = GreedySelector::new().with_weights(w);
        let constraints = UserConstraints::new(60, 5, "Calm", 5).unwrap();
        // Both have density 0.8.
        let catalog = vec![
            Exercise::new("short", "Short", 5, 2.0),
            Exercise::new("long", "Long", 10, 4.0),
        ];
        let top = selector.get_top_recommendations(&catalog, &constraints, 2);
        assert_eq!(ids(&top), vec!["long", "short"]);
    }

    #[test]
    fn test_raising_benefit_never_lowers_rank() {
        let selector = GreedySelector::new();
        let constraints = UserConstraints::new(60, 5, "Calm", 5).unwrap();
        let base = starter_catalog();
        let position = |catalog: &[Exercise]| {
            selector
                .rank(catalog, &constraints)
                .iter()
                .position(|r| r.exercise.id.as_str() == "desk-stretch")
                .unwrap()
        };

        let mut previous = position(&base[..]);
        for rating in [3.5, 4.0, 4.5, 5.0] {
            let catalog: Vec<_> = base
                .iter()
                .cloned()
                .map(|mut e| {
                    if e.id.as_str() == "desk-stretch" {
                        e.benefit_rating = rating;
                    }
                    e
                })
                .collect();
            let current = position(&catalog[..]);
            assert!(current <= previous);
            previous = current;
        }
    }

    #[test]
    fn test_top_recommendations_bounds() {
        let selector = GreedySelector::new();
        let constraints = scenario_constraints(15);
        let catalog = scenario_catalog();

        assert!(selector.get_top_recommendations(&catalog, &constraints, 0).is_empty());
        assert_eq!(selector.get_top_recommendations(&catalog, &constraints, 2).len(), 2);
        assert_eq!(selector.get_top_recommendations(&catalog[..2], &constraints, 3).len(), 2);
    }

    #[test]
    fn test_top_recommendations_ignore_budget() {
        let selector = GreedySelector::new();
        let top = selector.get_top_recommendations(&scenario_catalog(), &scenario_constraints(0), 3);
        assert_eq!(ids(&top), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_malformed_entries_are_excluded() {
        let selector = GreedySelector::new();
        let catalog = vec![
            Exercise::new("zero", "Zero", 0, 5.0),
            Exercise::new("overrated", "Overrated", 5, 9.0),
            Exercise::new("fine", "Fine", 5, 3.0),
        ];
        let constraints = UserConstraints::new(30, 5, "Calm", 5).unwrap();
        assert_eq!(ids(&selector.select_optimal_strategies(&catalog, &constraints)), vec!["fine"]);
        assert_eq!(selector.get_top_recommendations(&catalog, &constraints, 5).len(), 1);
    }

    #[test]
    fn test_low_energy_prefers_easy_exercises() {
        let selector = GreedySelector::new();
        let catalog = vec![
            Exercise::new("sprint", "Sprint intervals", 10, 4.5).with_difficulty(Difficulty::Hard),
            Exercise::new("breathe", "Breathing", 10, 4.0),
        ];
        let constraints = UserConstraints::new(10, 2, "Tired", 5).unwrap();
        assert_eq!(ids(&selector.select_optimal_strategies(&catalog, &constraints)), vec!["breathe"]);
    }

    #[test]
    fn test_algorithm_stats_for_scenario() {
        let selector = GreedySelector::new();
        let catalog = scenario_catalog();
        let constraints = scenario_constraints(15);
        let selection = selector.select_optimal_strategies(&catalog, &constraints);
        let stats = selector.algorithm_stats(&catalog, &constraints, &selection);

        assert_eq!(stats.total_exercises_evaluated, 3);
        assert_eq!(stats.exercises_selected, 2);
        assert_eq!(stats.total_time_minutes, 15);
        // A: 2 * 4.5 + 1.5 mood bonus, B: 2 * 4.8
        assert!((stats.total_score - 20.1).abs() < 1e-9);
    }

    #[test]
    fn test_empty_catalog_stats() {
        let selector = GreedySelector::new();
        let constraints = scenario_constraints(15);
        let selection = selector.select_optimal_strategies(&[], &constraints);
        assert_eq!(selector.algorithm_stats(&[], &constraints, &selection).total_exercises_evaluated, 0);
    }

    #[test]
    fn test_zero_budget_explanation() {
        let selector = GreedySelector::new();
        let constraints = scenario_constraints(0);
        let selection = selector.select_optimal_strategies(&scenario_catalog(), &constraints);
        assert!(selector.explain_selection(&selection, &constraints).contains("No exercise fit within the time budget"));
    }

    #[test]
    fn test_try_with_weights_rejects_negative_mood_bonus() {
        let bad = ScoringWeights { mood_match_bonus: -1.0, ..Default::default() };
        assert!(matches!(
            GreedySelector::new().try_with_weights(bad),
            Err(crate::error::SelectorError::InvalidWeight { name: "mood_match_bonus", .. })
        ));

        let good = ScoringWeights { mood_match_bonus: 2.0, ..Default::default() };
        let selector = GreedySelector::new().try_with_weights(good).unwrap();
        assert_eq!(selector.weights().mood_match_bonus, 2.0);
    }

    #[test]
    fn test_trait_score_matches_breakdown_total() {
        let strategy = SelectorStrategy::default();
        let constraints = scenario_constraints(15);
        let catalog = scenario_catalog();
        let breakdown = StrategySelector::score_breakdown(&strategy, &catalog[0], &constraints);
        assert!((strategy.score(&catalog[0], &constraints) - breakdown.total()).abs() < 1e-9);
        assert!((breakdown.total() - 10.5).abs() < 1e-9);
    }

    #[test]
    fn test_strategy_enum_dispatches() {
        let strategy = SelectorStrategy::default();
        let constraints = scenario_constraints(15);
        let selection = strategy.select(&scenario_catalog(), &constraints);
        assert_eq!(ids(&selection), vec!["A", "B"]);
        assert!(!strategy.explain(&selection, &constraints).trim().is_empty());
    }
}
