//! Infrastructure layer - External adapters and implementations
//!
//! This layer contains:
//! - Ollama: LLM integration (OpenAI-compatible chat completions)
//! - ComfyUI: scene illustration integration
//! - TTS: narration audio integration
//! - HTTP: REST API routes
//! - Config: application configuration
//! - State: shared application state

pub mod comfyui;
pub mod config;
pub mod http;
pub mod ollama;
pub mod state;
pub mod tts;
