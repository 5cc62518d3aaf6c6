//! Ollama client for LLM inference (OpenAI-compatible chat completions)

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::application::ports::outbound::{
    ChatMessage, InferenceError, InferencePort, InferenceRequest, InferenceResponse,
    ResponsePayload,
};

/// Client for an OpenAI-compatible chat completions endpoint
pub struct OllamaClient {
    client: Client,
    base_url: String,
    model: String,
}

impl OllamaClient {
    pub fn new(base_url: &str, model: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
        }
    }

    /// Submit one chat completion request
    pub async fn chat(
        &self,
        request: &InferenceRequest,
    ) -> Result<ChatCompletionResponse, OllamaError> {
        let body = ChatCompletionRequest {
            model: &self.model,
            messages: &request.messages,
            temperature: request.temperature,
            max_tokens: request.max_tokens,
            response_format: request
                .json_mode
                .then_some(ResponseFormat { r#type: "json_object" }),
            stream: false,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let message = response.text().await.unwrap_or_default();
            return Err(OllamaError::Api { status, message });
        }

        let completion: ChatCompletionResponse = response.json().await?;
        Ok(completion)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum OllamaError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("API error ({status}): {message}")]
    Api {
        status: reqwest::StatusCode,
        message: String,
    },
}

impl From<OllamaError> for InferenceError {
    fn from(error: OllamaError) -> Self {
        match error {
            OllamaError::Http(e) if e.is_decode() => InferenceError::Shape(e.to_string()),
            OllamaError::Http(e) => InferenceError::Transport(e.to_string()),
            OllamaError::Api { status, message } => {
                InferenceError::Api(format!("{}: {}", status, message))
            }
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    r#type: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    pub model: Option<String>,
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: AssistantMessage,
}

/// Assistant reply; `content` arrives as a plain string from most
/// providers but as a fragment array from some, so it deserializes
/// through the payload union.
#[derive(Debug, Deserialize)]
pub struct AssistantMessage {
    pub content: Option<ResponsePayload>,
}

#[async_trait]
impl InferencePort for OllamaClient {
    async fn generate(&self, request: InferenceRequest) -> Result<InferenceResponse, InferenceError> {
        let completion = self.chat(&request).await.map_err(InferenceError::from)?;

        let choice = completion
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| InferenceError::Shape("completion contained no choices".to_string()))?;

        // An absent content field is "no content returned", not a
        // transport failure; stages decide how to degrade.
        let payload = choice
            .message
            .content
            .unwrap_or_else(|| ResponsePayload::Text(String::new()));

        Ok(InferenceResponse {
            payload,
            model: completion.model.unwrap_or_else(|| self.model.clone()),
        })
    }
}
