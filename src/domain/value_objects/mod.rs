//! Value objects - Immutable objects defined by their attributes

mod moral;
mod safety;
mod story;

pub use moral::{MoralDecision, MoralVerdict, MORAL_OVERRIDE_DISCLAIMER, SAFE_MORALS};
pub use safety::{FearLevel, MedicalMisinformation, SafetyReport, SexualContent, ViolenceLevel};
pub use story::{CharacterSketch, ScenePlan, StoryCategory, StoryConfig, StoryOutline};
