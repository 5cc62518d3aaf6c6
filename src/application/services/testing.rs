//! Scripted inference doubles shared by service tests

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::application::ports::outbound::{
    InferenceError, InferencePort, InferenceRequest, InferenceResponse, ResponsePayload,
};

/// Inference port double that replays a fixed script of replies and
/// records every prompt it was sent.
pub struct ScriptedInference {
    replies: Mutex<VecDeque<Result<InferenceResponse, InferenceError>>>,
    pub seen_prompts: Mutex<Vec<String>>,
}

impl ScriptedInference {
    pub fn with_replies(replies: Vec<Result<InferenceResponse, InferenceError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().collect()),
            seen_prompts: Mutex::new(Vec::new()),
        }
    }

    /// Successful plain-text reply
    pub fn text(content: &str) -> Result<InferenceResponse, InferenceError> {
        Ok(InferenceResponse {
            payload: ResponsePayload::Text(content.to_string()),
            model: "mock".to_string(),
        })
    }

    /// Successful reply with an arbitrary payload shape
    pub fn payload(json: &str) -> Result<InferenceResponse, InferenceError> {
        Ok(InferenceResponse {
            payload: serde_json::from_str(json).unwrap(),
            model: "mock".to_string(),
        })
    }

    /// Transport-level failure
    pub fn transport_failure(message: &str) -> Result<InferenceResponse, InferenceError> {
        Err(InferenceError::Transport(message.to_string()))
    }

    /// Concatenated content of all messages in the nth request seen
    pub fn prompt(&self, index: usize) -> String {
        self.seen_prompts.lock().unwrap()[index].clone()
    }

    pub fn request_count(&self) -> usize {
        self.seen_prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl InferencePort for ScriptedInference {
    async fn generate(&self, request: InferenceRequest) -> Result<InferenceResponse, InferenceError> {
        let combined = request
            .messages
            .iter()
            .map(|m| m.content.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        self.seen_prompts.lock().unwrap().push(combined);

        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(InferenceError::Transport("scripted replies exhausted".into())))
    }
}
