//! Application configuration

use std::env;

use anyhow::{Context, Result};

/// Application configuration loaded from environment
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Ollama API base URL (OpenAI-compatible)
    pub ollama_base_url: String,
    /// Default model for LLM requests
    pub ollama_model: String,

    /// ComfyUI server URL for scene illustrations
    pub comfyui_base_url: String,

    /// Text-to-speech server URL (OpenAI-compatible)
    pub tts_base_url: String,
    /// Text-to-speech model
    pub tts_model: String,
    /// Narration voice
    pub tts_voice: String,

    /// HTTP server port
    pub server_port: u16,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            ollama_base_url: env::var("OLLAMA_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:11434/v1".to_string()),
            ollama_model: env::var("OLLAMA_MODEL").unwrap_or_else(|_| "llama3.2".to_string()),

            comfyui_base_url: env::var("COMFYUI_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8188".to_string()),

            tts_base_url: env::var("TTS_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8880/v1".to_string()),
            tts_model: env::var("TTS_MODEL").unwrap_or_else(|_| "kokoro".to_string()),
            tts_voice: env::var("TTS_VOICE").unwrap_or_else(|_| "af_heart".to_string()),

            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .context("SERVER_PORT must be a valid port number")?,
        })
    }
}
