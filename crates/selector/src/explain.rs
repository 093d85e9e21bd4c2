//! Human-readable justification of a selection.

use copeplan_core::{Exercise, UserConstraints};
use crate::budget::TimeBudget;
use crate::scoring::{ScoreBreakdown, ScoringWeights};
use crate::stats::calculate_total_time;

/// Ratings at or above this read as "high".
const HIGH_BENEFIT: f64 = 4.0;
/// Ratings at or above this read as "moderate".
const MODERATE_BENEFIT: f64 = 2.5;

/// Explain why each exercise in `selection` is there, then summarize
/// budget use.
///
/// Never blank: an empty selection gets a sentence saying nothing fit the
/// time budget. Only the selection is seen here, so an empty or entirely
/// malformed catalog reads the same way; `SelectionEngine::plan` reports
/// that case separately.
pub fn explain_selection(
    weights: &ScoringWeights,
    selection: &[Exercise],
    constraints: &UserConstraints,
) -> String {
    let available = constraints.available_time_minutes;

    if selection.is_empty() {
        return if available == 0 {
            "No exercise fit within the time budget: there are 0 minutes available right now.".to_string()
        } else {
            format!("No exercise fit within the time budget of {} minutes.", available)
        };
    }

    let mut lines = vec![format!(
        "Selected {} exercise{} for mood '{}' (energy {}/10, stress {}/10):",
        selection.len(),
        if selection.len() == 1 { "" } else { "s" },
        constraints.current_mood,
        constraints.energy(),
        constraints.stress(),
    )];

    let mut budget = TimeBudget::new(available);
    for (i, exercise) in selection.iter().enumerate() {
        let remaining_before = budget.remaining();
        let fitted = budget.consume(exercise.duration_minutes);
        let breakdown = weights.breakdown(exercise, constraints);
        let reasons = reasons(exercise, &breakdown, constraints, remaining_before, fitted);

        lines.push(format!(
            "{}. {} ({} min): {}",
            i + 1,
            exercise.title,
            exercise.duration_minutes,
            reasons.join("; ")
        ));
    }

    lines.push(summary(calculate_total_time(selection), available));
    lines.join("\n")
}

fn reasons(
    exercise: &Exercise,
    breakdown: &ScoreBreakdown,
    constraints: &UserConstraints,
    remaining_before: u64,
    fitted: bool,
) -> Vec<String> {
    let mut reasons = vec![format!(
        "{} benefit rating ({:.1}/5)",
        benefit_level(exercise.benefit_rating),
        exercise.benefit_rating
    )];

    if exercise.is_tagged_for(&constraints.current_mood) {
        reasons.push(format!("matches your current mood ({})", constraints.current_mood));
    } else if breakdown.mood_matched {
        reasons.push("suits any mood".to_string());
    }

    if !breakdown.within_capacity {
        reasons.push(format!("{} difficulty is above your current energy", exercise.difficulty));
    } else if breakdown.energy_adjustment > 0.0 {
        reasons.push(format!("{} difficulty suits your current energy", exercise.difficulty));
    }

    if exercise.recommended {
        reasons.push("editor's pick".to_string());
    }

    if fitted {
        reasons.push(format!("fits the {} minutes that were left", remaining_before));
    } else {
        reasons.push(format!("does not fit the {} minutes that were left", remaining_before));
    }

    reasons
}

fn benefit_level(rating: f64) -> &'static str {
    if rating >= HIGH_BENEFIT {
        "high"
    } else if rating >= MODERATE_BENEFIT {
        "moderate"
    } else {
        "low"
    }
}

fn summary(total: u64, available: u32) -> String {
    let available_wide = u64::from(available);
    if total > available_wide {
        return format!(
            "Uses {} of {} available minutes, exceeding the time budget by {} minutes.",
            total,
            available,
            total - available_wide
        );
    }

    format!(
        "Uses {} of {} available minutes ({:.0}% of the time budget).",
        total,
        available,
        crate::budget::utilization(total, available) * 100.0
    )
}
