//! Composite scoring of an exercise against the user's constraints.
//!
//! Four signals feed the score:
//! - base benefit (`benefit_rating` scaled by `benefit_weight`)
//! - mood match bonus (tagged for the mood, or untagged)
//! - energy/difficulty compatibility
//! - editorial and popularity boosts
//!
//! The weights are tunable; the shape of each term is what keeps the score
//! monotone in benefit, mood match and energy capacity.

use copeplan_core::{Difficulty, Exercise, UserConstraints};
use serde::{Deserialize, Serialize};
use crate::error::{Result, SelectorError};

/// Tunable constants for the scoring function.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    /// Multiplier on `benefit_rating`
    #[serde(default = "default_benefit_weight")]
    pub benefit_weight: f64,

    /// Flat bonus when the exercise suits the current mood
    #[serde(default = "default_mood_match_bonus")]
    pub mood_match_bonus: f64,

    /// Penalty per energy level missing for the exercise's difficulty
    #[serde(default = "default_overexertion_penalty")]
    pub overexertion_penalty: f64,

    /// Energy at or below which easy exercises get a bonus
    #[serde(default = "default_low_energy_threshold")]
    pub low_energy_threshold: u8,

    /// Bonus for easy exercises when energy is low
    #[serde(default = "default_low_energy_easy_bonus")]
    pub low_energy_easy_bonus: f64,

    /// Energy and stress at or above which harder exercises are favoured
    #[serde(default = "default_high_drive_threshold")]
    pub high_drive_threshold: u8,

    /// Bonus per difficulty step above Easy when energy and stress are both high
    #[serde(default = "default_intensity_bonus")]
    pub intensity_bonus: f64,

    /// Flat bonus for editorial picks
    #[serde(default = "default_recommended_bonus")]
    pub recommended_bonus: f64,

    /// Multiplier on `ln(1 + times_used)`
    #[serde(default = "default_popularity_weight")]
    pub popularity_weight: f64,

    /// Upper bound of the popularity term
    #[serde(default = "default_popularity_cap")]
    pub popularity_cap: f64,
}

fn default_benefit_weight() -> f64 {
    2.0
}

fn default_mood_match_bonus() -> f64 {
    1.5
}

fn default_overexertion_penalty() -> f64 {
    2.0
}

fn default_low_energy_threshold() -> u8 {
    4
}

fn default_low_energy_easy_bonus() -> f64 {
    0.5
}

fn default_high_drive_threshold() -> u8 {
    7
}

fn default_intensity_bonus() -> f64 {
    0.5
}

fn default_recommended_bonus() -> f64 {
    0.5
}

fn default_popularity_weight() -> f64 {
    0.1
}

fn default_popularity_cap() -> f64 {
    0.3
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            benefit_weight: default_benefit_weight(),
            mood_match_bonus: default_mood_match_bonus(),
            overexertion_penalty: default_overexertion_penalty(),
            low_energy_threshold: default_low_energy_threshold(),
            low_energy_easy_bonus: default_low_energy_easy_bonus(),
            high_drive_threshold: default_high_drive_threshold(),
            intensity_bonus: default_intensity_bonus(),
            recommended_bonus: default_recommended_bonus(),
            popularity_weight: default_popularity_weight(),
            popularity_cap: default_popularity_cap(),
        }
    }
}

impl ScoringWeights {
    /// Reject negative or non-finite weights, which would break monotonicity.
    pub fn validate(&self) -> Result<()> {
        let weights = [
            ("benefit_weight", self.benefit_weight),
            ("mood_match_bonus", self.mood_match_bonus),
            ("overexertion_penalty", self.overexertion_penalty),
            ("low_energy_easy_bonus", self.low_energy_easy_bonus),
            ("intensity_bonus", self.intensity_bonus),
            ("recommended_bonus", self.recommended_bonus),
            ("popularity_weight", self.popularity_weight),
            ("popularity_cap", self.popularity_cap),
        ];
        for (name, value) in weights {
            if !value.is_finite() || value < 0.0 {
                return Err(SelectorError::InvalidWeight { name, value });
            }
        }
        Ok(())
    }

    /// Score breakdown of `exercise` under `constraints`.
    pub fn breakdown(&self, exercise: &Exercise, constraints: &UserConstraints) -> ScoreBreakdown {
        let energy = constraints.energy();
        let stress = constraints.stress();
        let mood_matched = exercise.matches_mood(&constraints.current_mood);
        let within_capacity = energy >= exercise.difficulty.min_energy();

        ScoreBreakdown {
            base_benefit: self.benefit_weight * exercise.benefit_rating,
            mood_bonus: if mood_matched { self.mood_match_bonus } else { 0.0 },
            energy_adjustment: self.energy_adjustment(exercise.difficulty, energy, stress),
            editorial_bonus: if exercise.recommended { self.recommended_bonus } else { 0.0 },
            popularity_bonus: self.popularity_bonus(exercise.times_used),
            mood_matched,
            within_capacity,
        }
    }

    /// Composite score of `exercise` under `constraints`.
    pub fn score(&self, exercise: &Exercise, constraints: &UserConstraints) -> f64 {
        self.breakdown(exercise, constraints).total()
    }

    // Negative only when the difficulty is out of reach; otherwise >= 0.
    fn energy_adjustment(&self, difficulty: Difficulty, energy: u8, stress: u8) -> f64 {
        let required = difficulty.min_energy();
        if energy < required {
            return -self.overexertion_penalty * f64::from(required - energy);
        }

        if difficulty == Difficulty::Easy && energy <= self.low_energy_threshold {
            return self.low_energy_easy_bonus;
        }

        if energy >= self.high_drive_threshold && stress >= self.high_drive_threshold {
            let steps = f64::from(difficulty.level() - 1);
            let drive = f64::from(energy + stress) / 20.0;
            return self.intensity_bonus * steps * drive;
        }

        0.0
    }

    fn popularity_bonus(&self, times_used: u32) -> f64 {
        (self.popularity_weight * f64::from(times_used).ln_1p()).min(self.popularity_cap)
    }
}

/// Per-signal contributions to an exercise's score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// Weighted benefit rating
    pub base_benefit: f64,
    /// Mood match bonus (0 when the mood does not match)
    pub mood_bonus: f64,
    /// Energy/difficulty compatibility, negative when over capacity
    pub energy_adjustment: f64,
    /// Editorial pick bonus
    pub editorial_bonus: f64,
    /// Capped popularity term
    pub popularity_bonus: f64,
    /// Whether the exercise suits the current mood
    pub mood_matched: bool,
    /// Whether the current energy can carry the difficulty
    pub within_capacity: bool,
}

impl ScoreBreakdown {
    /// Sum of all contributions.
    pub fn total(&self) -> f64 {
        self.base_benefit
            + self.mood_bonus
            + self.energy_adjustment
            + self.editorial_bonus
            + self.popularity_bonus
    }
}
