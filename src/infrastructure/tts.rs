//! Text-to-speech client for narration audio (OpenAI-compatible)

use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use crate::application::ports::outbound::NarrationPort;

/// Client for an OpenAI-compatible speech synthesis endpoint
pub struct TtsClient {
    client: Client,
    base_url: String,
    model: String,
    voice: String,
}

impl TtsClient {
    pub fn new(base_url: &str, model: &str, voice: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            voice: voice.to_string(),
        }
    }

    /// Synthesize speech for the given text, returning audio bytes
    pub async fn speech(&self, text: &str) -> Result<Vec<u8>, TtsError> {
        let request = SpeechRequest {
            model: &self.model,
            voice: &self.voice,
            input: text,
            response_format: "mp3",
        };

        let response = self
            .client
            .post(format!("{}/audio/speech", self.base_url))
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let error_text = response.text().await?;
            return Err(TtsError::ApiError(error_text));
        }

        let bytes = response.bytes().await?;
        Ok(bytes.to_vec())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TtsError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("API error: {0}")]
    ApiError(String),
}

#[derive(Debug, Serialize)]
struct SpeechRequest<'a> {
    model: &'a str,
    voice: &'a str,
    input: &'a str,
    response_format: &'static str,
}

#[async_trait]
impl NarrationPort for TtsClient {
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>> {
        let audio = self.speech(text).await?;
        Ok(audio)
    }
}
