//! Media ports - narration and illustration collaborators
//!
//! These sit outside the generation pipeline: they take a scene's text
//! or summary and return a byte stream or URL. Neither participates in
//! the safety state machine.

use anyhow::Result;
use async_trait::async_trait;

/// Port to the text-to-speech service
#[async_trait]
pub trait NarrationPort: Send + Sync {
    /// Convert text to an audio byte stream
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>>;
}

/// Port to the image generation service
#[async_trait]
pub trait IllustrationPort: Send + Sync {
    /// Render an illustration for the given prompt, returning its URL
    async fn generate_image(&self, prompt: &str) -> Result<String>;
}
