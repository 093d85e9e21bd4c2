//! Catalog-level checks and the built-in starter catalog.

use std::collections::HashSet;
use crate::error::{Result, ValidationError};
use crate::exercise::{Difficulty, Exercise};

/// Validate every entry and reject duplicate ids.
///
/// Stops at the first problem found, in catalog order.
pub fn validate_catalog(catalog: &[Exercise]) -> Result<()> {
    let mut seen = HashSet::new();
    for exercise in catalog {
        exercise.validate()?;
        if !seen.insert(exercise.id.as_str()) {
            return Err(ValidationError::DuplicateId(exercise.id.to_string()));
        }
    }
    Ok(())
}

/// A small general-purpose catalog for when no catalog file is supplied.
pub fn starter_catalog() -> Vec<Exercise> {
    vec![
        Exercise::new("box-breathing", "Box breathing", 5, 4.5)
            .with_category("breathing")
            .with_description("Inhale 4s, hold 4s, exhale 4s, hold 4s. Repeat for five minutes.")
            .with_mood_tags(["Anxious", "Stressed", "Overwhelmed"])
            .with_recommended(true)
            .with_times_used(120),
        Exercise::new("breathing-478", "4-7-8 breathing", 3, 4.2)
            .with_category("breathing")
            .with_description("Inhale 4s, hold 7s, exhale 8s. Helps the body switch off before sleep.")
            .with_mood_tags(["Anxious", "Restless"])
            .with_times_used(85),
        Exercise::new("grounding-54321", "5-4-3-2-1 grounding", 5, 4.4)
            .with_category("grounding")
            .with_description("Name five things you see, four you hear, three you feel, two you smell, one you taste.")
            .with_mood_tags(["Anxious", "Panicked", "Overwhelmed"])
            .with_recommended(true)
            .with_times_used(64),
        Exercise::new("brain-dump", "Brain dump", 10, 4.0)
            .with_category("journaling")
            .with_description("Write down every worry on paper without editing, then close the notebook.")
            .with_mood_tags(["Stressed", "Overwhelmed", "Restless"])
            .with_times_used(40),
        Exercise::new("gratitude-list", "Three good things", 5, 3.6)
            .with_category("journaling")
            .with_description("Write three things that went well today and why.")
            .with_mood_tags(["Sad", "Low"])
            .with_times_used(52),
        Exercise::new("pmr", "Progressive muscle relaxation", 15, 4.3)
            .with_category("relaxation")
            .with_description("Tense and release each muscle group from feet to face.")
            .with_difficulty(Difficulty::Medium)
            .with_mood_tags(["Stressed", "Angry", "Restless"])
            .with_times_used(33),
        Exercise::new("desk-stretch", "Desk stretch", 5, 3.2)
            .with_category("movement")
            .with_description("Neck rolls, shoulder shrugs and a standing forward fold.")
            .with_times_used(71),
        Exercise::new("brisk-walk", "Brisk walk outside", 20, 4.1)
            .with_category("movement")
            .with_description("Twenty minutes outside at a pace that raises your breathing a little.")
            .with_difficulty(Difficulty::Medium)
            .with_mood_tags(["Sad", "Low", "Stressed", "Angry"])
            .with_recommended(true)
            .with_times_used(48),
        Exercise::new("hiit-burst", "Short interval workout", 15, 3.9)
            .with_category("movement")
            .with_description("Alternate 40s of effort with 20s rest to burn off tension.")
            .with_difficulty(Difficulty::Hard)
            .with_mood_tags(["Angry", "Stressed", "Restless"])
            .with_times_used(19),
        Exercise::new("body-scan", "Body scan meditation", 20, 4.0)
            .with_category("mindfulness")
            .with_description("Move attention slowly through the body, noticing without judging.")
            .with_mood_tags(["Anxious", "Stressed", "Tired"])
            .with_times_used(27),
        Exercise::new("self-compassion", "Self-compassion break", 5, 3.8)
            .with_category("mindfulness")
            .with_description("Acknowledge the difficulty, remember it is shared, offer yourself kindness.")
            .with_mood_tags(["Sad", "Ashamed", "Low"])
            .with_times_used(15),
        Exercise::new("call-a-friend", "Reach out to someone", 15, 4.2)
            .with_category("connection")
            .with_description("Message or call a person you trust, even just to say hello.")
            .with_difficulty(Difficulty::Medium)
            .with_mood_tags(["Lonely", "Sad", "Low"])
            .with_times_used(22),
    ]
}
