//! Story value objects - request configuration and planned outline shapes
//!
//! # Architectural Note
//!
//! The outline types intentionally include `serde::Serialize` and
//! `serde::Deserialize`. They describe the JSON contract the planning
//! model is instructed to fill in, so serialization is intrinsic to
//! their purpose, not an infrastructure concern.

use serde::{Deserialize, Serialize};

/// Caller request for one story generation run
///
/// Range validation (age 5-10, length 5/10/15) happens at the API
/// boundary before a config is constructed; the pipeline trusts it.
#[derive(Debug, Clone)]
pub struct StoryConfig {
    /// Age of the listening child, 5-10
    pub age: u8,
    /// Read-aloud length in minutes: 5, 10 or 15
    pub length_minutes: u32,
    /// Free-text description of what the story should be about
    pub themes: String,
    /// Optional moral/lesson requested by the caller
    pub moral: Option<String>,
}

/// Broad story category derived from the requested themes
///
/// Used to tailor the outline prompt; derived purely from keywords,
/// no model call involved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoryCategory {
    MedicalComfort,
    SpaceAdventure,
    AnimalFriendship,
    Generic,
}

impl StoryCategory {
    /// Categorize a free-text theme request by keyword
    pub fn from_themes(themes: &str) -> Self {
        let text = themes.to_lowercase();
        if ["doctor", "hospital", "nurse"].iter().any(|k| text.contains(k)) {
            return Self::MedicalComfort;
        }
        if ["space", "planet", "rocket", "star"].iter().any(|k| text.contains(k)) {
            return Self::SpaceAdventure;
        }
        if ["animal", "cat", "dog", "forest", "farm"].iter().any(|k| text.contains(k)) {
            return Self::AnimalFriendship;
        }
        Self::Generic
    }

    /// Stable label used inside prompts
    pub fn label(&self) -> &'static str {
        match self {
            Self::MedicalComfort => "medical_comfort",
            Self::SpaceAdventure => "space_adventure",
            Self::AnimalFriendship => "animal_friendship",
            Self::Generic => "generic",
        }
    }
}

/// A named character in the planned story
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacterSketch {
    pub name: String,
    pub description: String,
}

/// One planned narrative beat, not yet rendered to prose
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenePlan {
    /// 1-based position in narrative order, strictly increasing
    pub id: u32,
    /// What happens in this scene
    pub summary: String,
    /// Narrative purpose of the scene
    pub goal: String,
    /// Approximate prose length to aim for
    pub target_word_count: u32,
}

/// Full story skeleton produced by the planning stage
///
/// Scene order is final narrative order and is never reordered
/// downstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoryOutline {
    pub title: String,
    pub setting: String,
    pub main_characters: Vec<CharacterSketch>,
    pub scenes: Vec<ScenePlan>,
}
