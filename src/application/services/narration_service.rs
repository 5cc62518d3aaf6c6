//! Narration Service - Scene text to audio
//!
//! Thin delegation to the text-to-speech port; sits outside the
//! generation pipeline.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, instrument};

use crate::application::ports::outbound::NarrationPort;

/// Service converting scene text to an audio byte stream
pub struct NarrationService {
    tts: Arc<dyn NarrationPort>,
}

impl NarrationService {
    pub fn new(tts: Arc<dyn NarrationPort>) -> Self {
        Self { tts }
    }

    /// Synthesize narration audio for a piece of scene text
    #[instrument(skip(self, text), fields(chars = text.len()))]
    pub async fn narrate(&self, text: &str) -> Result<Vec<u8>> {
        let audio = self
            .tts
            .synthesize(text)
            .await
            .context("Failed to synthesize narration audio")?;
        debug!(bytes = audio.len(), "Narration synthesized");
        Ok(audio)
    }
}
