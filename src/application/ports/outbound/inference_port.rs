//! Inference port - Interface to the LLM text service
//!
//! The core never depends on model-specific behavior beyond "returns
//! text, optionally as JSON when asked". Providers differ in how they
//! deliver that text: some return a single string, some an ordered list
//! of typed content fragments. [`ResponsePayload`] models every
//! recognized shape explicitly so callers normalize through one rule
//! instead of duck-typing the wire format.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Role of a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

/// One role-tagged prompt message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

/// One request to the inference service
#[derive(Debug, Clone)]
pub struct InferenceRequest {
    /// Ordered prompt messages
    pub messages: Vec<ChatMessage>,
    /// Sampling temperature
    pub temperature: f32,
    /// Output token cap
    pub max_tokens: u32,
    /// Ask the provider for a JSON-shaped reply
    pub json_mode: bool,
}

impl InferenceRequest {
    pub fn new(messages: Vec<ChatMessage>) -> Self {
        Self {
            messages,
            temperature: 0.4,
            max_tokens: 1500,
            json_mode: false,
        }
    }

    /// Convenience constructor for a single user prompt
    pub fn from_user_prompt(prompt: impl Into<String>) -> Self {
        Self::new(vec![ChatMessage {
            role: MessageRole::User,
            content: prompt.into(),
        }])
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.messages.insert(
            0,
            ChatMessage {
                role: MessageRole::System,
                content: prompt.into(),
            },
        );
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_json_output(mut self) -> Self {
        self.json_mode = true;
        self
    }
}

/// Text content of a reply, in any of the recognized provider shapes
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ResponsePayload {
    /// Plain string content
    Text(String),
    /// Ordered sequence of typed content fragments
    Fragments(Vec<ResponseFragment>),
}

/// One fragment of a multi-part reply
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ResponseFragment {
    /// `"..."`
    Plain(String),
    /// `{"text": "..."}` or `{"text": {"value": "..."}}`
    Text { text: FragmentText },
    /// `{"value": "..."}`
    Value { value: String },
}

/// The `text` field of a fragment, plain or nested
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum FragmentText {
    Plain(String),
    Nested { value: String },
}

impl FragmentText {
    fn as_str(&self) -> &str {
        match self {
            Self::Plain(text) => text,
            Self::Nested { value } => value,
        }
    }
}

impl ResponseFragment {
    fn as_str(&self) -> &str {
        match self {
            Self::Plain(text) => text,
            Self::Text { text } => text.as_str(),
            Self::Value { value } => value,
        }
    }
}

impl ResponsePayload {
    /// Normalize the payload to one string: fragments are concatenated
    /// in order with single-space separation. Returns `None` when no
    /// usable text was extracted.
    pub fn collect_text(&self) -> Option<String> {
        let text = match self {
            Self::Text(text) => text.clone(),
            Self::Fragments(fragments) => fragments
                .iter()
                .map(ResponseFragment::as_str)
                .filter(|part| !part.is_empty())
                .collect::<Vec<_>>()
                .join(" "),
        };

        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

/// Reply from the inference service
#[derive(Debug, Clone)]
pub struct InferenceResponse {
    /// Text content, in whichever shape the provider used
    pub payload: ResponsePayload,
    /// Model that produced the reply
    pub model: String,
}

/// Errors from the inference transport
#[derive(Debug, thiserror::Error)]
pub enum InferenceError {
    /// The request never completed (network, timeout, TLS)
    #[error("inference request failed: {0}")]
    Transport(String),
    /// The service answered with an error (auth, quota, bad request)
    #[error("inference service returned an error: {0}")]
    Api(String),
    /// The reply could not be decoded at the transport level
    #[error("inference response had an unexpected shape: {0}")]
    Shape(String),
}

/// Port to the LLM text service
///
/// One call is one blocking request/response unit of work; the calling
/// stage suspends until the reply (or error) arrives.
#[async_trait]
pub trait InferencePort: Send + Sync {
    async fn generate(&self, request: InferenceRequest) -> Result<InferenceResponse, InferenceError>;
}
