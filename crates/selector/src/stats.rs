//! Aggregates over a selection and the per-run statistics.

use copeplan_core::{Exercise, UserConstraints};
use serde::{Deserialize, Serialize};
use crate::budget::utilization;

/// Sum of raw `benefit_rating` over the selection.
///
/// Reporting uses the raw rating so totals stay on the catalog's 0-5 scale
/// per item; the composite score total is reported separately in
/// [`AlgorithmStats::total_score`].
pub fn calculate_total_benefit(selection: &[Exercise]) -> f64 {
    selection.iter().map(|e| e.benefit_rating).sum()
}

/// Sum of `duration_minutes` over the selection.
pub fn calculate_total_time(selection: &[Exercise]) -> u64 {
    selection.iter().map(|e| u64::from(e.duration_minutes)).sum()
}

/// Whether the selection fits in the constraints' time budget.
///
/// Works for any selection, not just ones produced by the selector.
pub fn validate_constraints(selection: &[Exercise], constraints: &UserConstraints) -> bool {
    calculate_total_time(selection) <= u64::from(constraints.available_time_minutes)
}

/// Statistics for one selection run.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AlgorithmStats {
    /// Catalog size
    pub total_exercises_evaluated: usize,
    /// Selection size
    pub exercises_selected: usize,
    /// Catalog entries not selected
    pub exercises_skipped: usize,
    /// Sum of raw benefit ratings of the selection
    pub total_benefit: f64,
    /// Sum of composite scores of the selection
    pub total_score: f64,
    /// Minutes used by the selection
    pub total_time_minutes: u64,
    /// Minutes in the budget
    pub available_time_minutes: u32,
    /// `total_time_minutes / available_time_minutes`, 0 for an empty budget
    pub budget_utilization: f64,
}

impl AlgorithmStats {
    /// Gather statistics for `selection` drawn from `catalog`.
    ///
    /// `score` is the scoring function the selection was ranked with.
    pub fn collect<F>(
        catalog: &[Exercise],
        constraints: &UserConstraints,
        selection: &[Exercise],
        score: F,
    ) -> Self
    where
        F: Fn(&Exercise) -> f64,
    {
        let total_time_minutes = calculate_total_time(selection);
        Self {
            total_exercises_evaluated: catalog.len(),
            exercises_selected: selection.len(),
            exercises_skipped: catalog.len().saturating_sub(selection.len()),
            total_benefit: calculate_total_benefit(selection),
            total_score: selection.iter().map(score).sum(),
            total_time_minutes,
            available_time_minutes: constraints.available_time_minutes,
            budget_utilization: utilization(total_time_minutes, constraints.available_time_minutes),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selection() -> Vec<Exercise> {
        vec![
            Exercise::new("a", "A", 5, 4.5),
            Exercise::new("b", "B", 10, 4.8),
        ]
    }

    #[test]
    fn test_totals() {
        let s = selection();
        assert!((calculate_total_benefit(&s) - 9.3).abs() < 1e-9);
        assert_eq!(calculate_total_time(&s), 15);
    }

    #[test]
    fn test_totals_of_empty_selection() {
        assert_eq!(calculate_total_benefit(&[]), 0.0);
        assert_eq!(calculate_total_time(&[]), 0);
    }

    #[test]
    fn test_validate_constraints_on_external_selection() {
        let s = selection();
        let fits = UserConstraints::new(15, 5, "Calm", 5).unwrap();
        let tight = UserConstraints::new(14, 5, "Calm", 5).unwrap();
        assert!(validate_constraints(&s, &fits));
        assert!(!validate_constraints(&s, &tight));
        assert!(validate_constraints(&[], &UserConstraints::new(0, 5, "Calm", 5).unwrap()));
    }

    #[test]
    fn test_collect() {
        let catalog = vec![
            Exercise::new("a", "A", 5, 4.5),
            Exercise::new("b", "B", 10, 4.8),
            Exercise::new("c", "C", 20, 4.2),
        ];
        let s = selection();
        let c = UserConstraints::new(20, 5, "Calm", 5).unwrap();
        let stats = AlgorithmStats::collect(&catalog, &c, &s, |e| e.benefit_rating * 2.0);

        assert_eq!(stats.total_exercises_evaluated, 3);
        assert_eq!(stats.exercises_selected, 2);
        assert_eq!(stats.exercises_skipped, 1);
        assert_eq!(stats.total_time_minutes, 15);
        assert!((stats.total_score - 18.6).abs() < 1e-9);
        assert!((stats.budget_utilization - 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_collect_with_zero_budget() {
        let c = UserConstraints::new(0, 5, "Calm", 5).unwrap();
        let stats = AlgorithmStats::collect(&[], &c, &[], |_| 0.0);
        assert_eq!(stats.total_exercises_evaluated, 0);
        assert_eq!(stats.budget_utilization, 0.0);
    }
}
