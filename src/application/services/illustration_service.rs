//! Illustration Service - Sanitized image prompts for scene art
//!
//! Consumed by the surrounding application, not by the generation
//! pipeline. Scene summaries are scrubbed of medical, violence and fear
//! vocabulary before being handed to the image model; a summary with
//! nothing left after scrubbing falls back to a fixed ultra-safe
//! prompt.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, instrument};

use crate::application::ports::outbound::IllustrationPort;

/// Vocabulary never forwarded to the image model
const BLOCKED_VOCABULARY: &[&str] = &[
    // violence
    "blood", "weapon", "knife", "gun", "sword", "fight", "fighting", "attack", "hurt", "kill",
    "killed", "dead", "death", "die", "war",
    // fear
    "scary", "frightening", "terrifying", "nightmare", "monster", "monsters", "ghost", "ghosts",
    "haunted", "demon", "creepy",
    // medical
    "hospital", "surgery", "needle", "injection", "syringe", "wound", "wounded", "injury",
    "injured", "sick", "illness", "disease", "bleeding", "pain",
];

/// Prompt used when nothing safe remains after sanitizing
pub const ULTRA_SAFE_PROMPT: &str = "A soft watercolor illustration of a cozy, starlit \
     bedroom with a sleeping teddy bear, warm and peaceful, gentle storybook style";

/// Service building and dispatching illustration requests
pub struct IllustrationService {
    images: Arc<dyn IllustrationPort>,
}

impl IllustrationService {
    pub fn new(images: Arc<dyn IllustrationPort>) -> Self {
        Self { images }
    }

    /// Build a sanitized storybook illustration prompt from a scene summary
    pub fn build_prompt(summary: &str) -> String {
        let sanitized = sanitize(summary);
        if sanitized.is_empty() {
            return ULTRA_SAFE_PROMPT.to_string();
        }
        format!(
            "A soft, warm children's storybook watercolor illustration: {}. Gentle colors, \
             cozy and calming, no text in the image.",
            sanitized
        )
    }

    /// Request an illustration for a scene summary, returning its URL
    #[instrument(skip(self, summary))]
    pub async fn illustrate_scene(&self, summary: &str) -> Result<String> {
        let prompt = Self::build_prompt(summary);
        debug!(prompt = %prompt, "Requesting scene illustration");
        self.images
            .generate_image(&prompt)
            .await
            .context("Failed to generate scene illustration")
    }
}

/// Drop every blocked word, keeping the rest in order
fn sanitize(text: &str) -> String {
    text.split_whitespace()
        .filter(|word| {
            let normalized: String = word
                .chars()
                .filter(|c| c.is_alphanumeric())
                .collect::<String>()
                .to_lowercase();
            !BLOCKED_VOCABULARY.contains(&normalized.as_str())
        })
        .collect::<Vec<_>>()
        .join(" ")
}
