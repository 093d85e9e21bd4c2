//! User constraints - the situational snapshot for one selection request.

use serde::{Deserialize, Serialize};
use crate::error::{Result, ValidationError};

/// Lowest energy/stress level.
pub const MIN_LEVEL: u8 = 1;
/// Highest energy/stress level.
pub const MAX_LEVEL: u8 = 10;

/// What the user can afford right now.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserConstraints {
    /// Total time budget in minutes
    pub available_time_minutes: u32,

    /// Current energy, 1..=10
    pub current_energy_level: u8,

    /// Current mood label, compared against exercise mood tags
    pub current_mood: String,

    /// Current stress, 1..=10
    pub stress_level: u8,
}

impl UserConstraints {
    /// Create validated constraints.
    pub fn new(
        available_time_minutes: u32,
        current_energy_level: u8,
        current_mood: impl Into<String>,
        stress_level: u8,
    ) -> Result<Self> {
        let constraints = Self {
            available_time_minutes,
            current_energy_level,
            current_mood: current_mood.into(),
            stress_level,
        };
        constraints.validate()?;
        Ok(constraints)
    }

    /// Check that energy and stress are on the 1..=10 scale.
    pub fn validate(&self) -> Result<()> {
        if !(MIN_LEVEL..=MAX_LEVEL).contains(&self.current_energy_level) {
            return Err(ValidationError::EnergyOutOfRange(self.current_energy_level));
        }
        if !(MIN_LEVEL..=MAX_LEVEL).contains(&self.stress_level) {
            return Err(ValidationError::StressOutOfRange(self.stress_level));
        }
        Ok(())
    }

    /// Energy clamped onto the 1..=10 scale.
    pub fn energy(&self) -> u8 {
        self.current_energy_level.clamp(MIN_LEVEL, MAX_LEVEL)
    }

    /// Stress clamped onto the 1..=10 scale.
    pub fn stress(&self) -> u8 {
        self.stress_level.clamp(MIN_LEVEL, MAX_LEVEL)
    }
}
