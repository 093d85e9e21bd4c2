//! Exercise model - one entry of the coping-strategy catalog.

use serde::{Deserialize, Serialize};
use crate::error::{Result, ValidationError};
use crate::id::ExerciseId;

/// Highest benefit rating an exercise may carry.
pub const MAX_BENEFIT_RATING: f64 = 5.0;

/// A coping or wellness exercise.
///
/// Catalog entries are immutable from the selector's point of view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    /// Unique identifier
    pub id: ExerciseId,

    /// Display title
    pub title: String,

    /// Free-text description
    #[serde(default)]
    pub description: String,

    /// Free-text category (breathing, movement, ...)
    #[serde(default)]
    pub category: String,

    /// Time needed to do the exercise once
    pub duration_minutes: u32,

    /// How demanding the exercise is
    #[serde(default)]
    pub difficulty: Difficulty,

    /// Moods this exercise suits; empty means it suits any mood
    #[serde(default)]
    pub mood_tags: Vec<String>,

    /// Prior expected effectiveness in [0, 5]
    pub benefit_rating: f64,

    /// Editorial boost
    #[serde(default)]
    pub recommended: bool,

    /// Historical usage counter
    #[serde(default)]
    pub times_used: u32,
}

impl Exercise {
    /// Create a new exercise with the fields the selector cannot do without.
    pub fn new(
        id: impl Into<ExerciseId>,
        title: impl Into<String>,
        duration_minutes: u32,
        benefit_rating: f64,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            category: String::new(),
            duration_minutes,
            difficulty: Difficulty::default(),
            mood_tags: Vec::new(),
            benefit_rating,
            recommended: false,
            times_used: 0,
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Set the difficulty.
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    /// Set the mood tags.
    pub fn with_mood_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.mood_tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Mark as an editorial pick.
    pub fn with_recommended(mut self, recommended: bool) -> Self {
        self.recommended = recommended;
        self
    }

    /// Set the usage counter.
    pub fn with_times_used(mut self, times_used: u32) -> Self {
        self.times_used = times_used;
        self
    }

    /// Whether this exercise suits `mood`.
    ///
    /// Untagged exercises suit every mood. Labels compare ASCII
    /// case-insensitively.
    pub fn matches_mood(&self, mood: &str) -> bool {
        self.mood_tags.is_empty()
            || self.mood_tags.iter().any(|tag| tag.trim().eq_ignore_ascii_case(mood.trim()))
    }

    /// Whether the mood match comes from an explicit tag rather than
    /// the universal (untagged) fallback.
    pub fn is_tagged_for(&self, mood: &str) -> bool {
        !self.mood_tags.is_empty() && self.matches_mood(mood)
    }

    /// Check the catalog invariants for this entry.
    pub fn validate(&self) -> Result<()> {
        if self.duration_minutes == 0 {
            return Err(ValidationError::NonPositiveDuration { id: self.id.to_string() });
        }
        if !(0.0..=MAX_BENEFIT_RATING).contains(&self.benefit_rating) {
            return Err(ValidationError::RatingOutOfRange {
                id: self.id.to_string(),
                rating: self.benefit_rating,
            });
        }
        Ok(())
    }

    /// Shorthand for `validate().is_ok()`.
    pub fn is_well_formed(&self) -> bool {
        self.validate().is_ok()
    }
}

/// Ordinal difficulty of an exercise.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Doable at any energy level
    #[default]
    Easy,

    /// Needs some energy
    Medium,

    /// Needs plenty of energy
    Hard,
}

impl Difficulty {
    /// Ordinal level, 1 for Easy up to 3 for Hard.
    pub fn level(self) -> u8 {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Medium => 2,
            Difficulty::Hard => 3,
        }
    }

    /// Lowest energy level (1..=10) that can carry this difficulty.
    pub fn min_energy(self) -> u8 {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Medium => 3,
            Difficulty::Hard => 4,
        }
    }

    /// Get string representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Difficulty {
    type Err = ValidationError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(ValidationError::UnknownDifficulty(s.to_string())),
        }
    }
}
