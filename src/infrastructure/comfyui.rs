//! ComfyUI client for scene illustration generation

use std::collections::HashMap;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::application::ports::outbound::IllustrationPort;

const POLL_INTERVAL: Duration = Duration::from_secs(2);
const MAX_POLL_ATTEMPTS: u32 = 60;

/// Client for the ComfyUI API, driving one storybook illustration
/// workflow per request
pub struct ComfyUIClient {
    client: Client,
    base_url: String,
}

impl ComfyUIClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Queue an illustration workflow for execution
    pub async fn queue_illustration(&self, prompt: &str) -> Result<String, ComfyUIError> {
        let request = QueuePromptRequest {
            prompt: storybook_workflow(prompt),
            client_id: Uuid::new_v4().to_string(),
        };

        let response = self
            .client
            .post(format!("{}/prompt", self.base_url))
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let error_text = response.text().await?;
            return Err(ComfyUIError::ApiError(error_text));
        }

        let queued: QueueResponse = response.json().await?;
        Ok(queued.prompt_id)
    }

    /// Poll the history endpoint until the prompt completes
    pub async fn wait_for_image(&self, prompt_id: &str) -> Result<ImageOutput, ComfyUIError> {
        for attempt in 0..MAX_POLL_ATTEMPTS {
            let response = self
                .client
                .get(format!("{}/history/{}", self.base_url, prompt_id))
                .send()
                .await?;

            if !response.status().is_success() {
                let error_text = response.text().await?;
                return Err(ComfyUIError::ApiError(error_text));
            }

            let history: HistoryResponse = response.json().await?;
            if let Some(entry) = history.prompts.get(prompt_id) {
                if entry.status.completed {
                    let image = entry
                        .outputs
                        .values()
                        .filter_map(|output| output.images.as_ref())
                        .flat_map(|images| images.iter())
                        .next()
                        .cloned()
                        .ok_or(ComfyUIError::NoImageProduced)?;
                    return Ok(image);
                }
            }

            debug!(prompt_id, attempt, "Illustration not ready yet");
            tokio::time::sleep(POLL_INTERVAL).await;
        }

        Err(ComfyUIError::Timeout)
    }

    /// URL the generated image can be viewed at
    pub fn image_url(&self, image: &ImageOutput) -> String {
        format!(
            "{}/view?filename={}&subfolder={}&type={}",
            self.base_url, image.filename, image.subfolder, image.r#type
        )
    }
}

/// Minimal text-to-image graph: checkpoint, prompt encodings, sampler,
/// decode, save
fn storybook_workflow(prompt: &str) -> serde_json::Value {
    let seed = rand::random::<u32>();
    serde_json::json!({
        "4": {"class_type": "CheckpointLoaderSimple", "inputs": {"ckpt_name": "storybook.safetensors"}},
        "5": {"class_type": "EmptyLatentImage", "inputs": {"width": 768, "height": 512, "batch_size": 1}},
        "6": {"class_type": "CLIPTextEncode", "inputs": {"text": prompt, "clip": ["4", 1]}},
        "7": {"class_type": "CLIPTextEncode", "inputs": {
            "text": "photorealistic, dark, scary, text, watermark",
            "clip": ["4", 1]
        }},
        "3": {"class_type": "KSampler", "inputs": {
            "seed": seed, "steps": 20, "cfg": 7, "sampler_name": "euler",
            "scheduler": "normal", "denoise": 1,
            "model": ["4", 0], "positive": ["6", 0], "negative": ["7", 0], "latent_image": ["5", 0]
        }},
        "8": {"class_type": "VAEDecode", "inputs": {"samples": ["3", 0], "vae": ["4", 2]}},
        "9": {"class_type": "SaveImage", "inputs": {"images": ["8", 0], "filename_prefix": "storybook"}}
    })
}

#[derive(Debug, thiserror::Error)]
pub enum ComfyUIError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("API error: {0}")]
    ApiError(String),
    #[error("workflow completed without producing an image")]
    NoImageProduced,
    #[error("timed out waiting for the illustration")]
    Timeout,
}

#[derive(Debug, Serialize)]
struct QueuePromptRequest {
    prompt: serde_json::Value,
    client_id: String,
}

#[derive(Debug, Deserialize)]
struct QueueResponse {
    prompt_id: String,
}

#[derive(Debug, Deserialize)]
struct HistoryResponse {
    #[serde(flatten)]
    prompts: HashMap<String, PromptHistory>,
}

#[derive(Debug, Deserialize)]
struct PromptHistory {
    outputs: HashMap<String, NodeOutput>,
    status: PromptStatus,
}

#[derive(Debug, Deserialize)]
struct NodeOutput {
    images: Option<Vec<ImageOutput>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImageOutput {
    pub filename: String,
    pub subfolder: String,
    pub r#type: String,
}

#[derive(Debug, Deserialize)]
struct PromptStatus {
    completed: bool,
}

#[async_trait]
impl IllustrationPort for ComfyUIClient {
    async fn generate_image(&self, prompt: &str) -> Result<String> {
        let prompt_id = self.queue_illustration(prompt).await?;
        let image = self.wait_for_image(&prompt_id).await?;
        Ok(self.image_url(&image))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workflow_carries_prompt_text() {
        let workflow = storybook_workflow("a snail in a moss garden");
        assert_eq!(workflow["6"]["inputs"]["text"], "a snail in a moss garden");
        assert_eq!(workflow["9"]["class_type"], "SaveImage");
    }

    #[test]
    fn test_image_url_shape() {
        let client = ComfyUIClient::new("http://localhost:8188/");
        let image = ImageOutput {
            filename: "storybook_00001.png".to_string(),
            subfolder: "".to_string(),
            r#type: "output".to_string(),
        };
        assert_eq!(
            client.image_url(&image),
            "http://localhost:8188/view?filename=storybook_00001.png&subfolder=&type=output"
        );
    }
}
