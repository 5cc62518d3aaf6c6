//! Safety Service - Classifying rendered scene text
//!
//! One inference call per scene attempt, expecting a strict JSON
//! `SafetyReport`. A reply that cannot be parsed is substituted with
//! the conservative report, so a broken classifier drives the existing
//! retry/fallback path instead of aborting the request.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::application::ports::outbound::{InferenceError, InferencePort, InferenceRequest};
use crate::application::services::llm::{self, prompt_builder};
use crate::domain::value_objects::SafetyReport;

/// Service producing safety verdicts for scene text
pub struct SafetyService {
    inference: Arc<dyn InferencePort>,
}

impl SafetyService {
    pub fn new(inference: Arc<dyn InferencePort>) -> Self {
        Self { inference }
    }

    /// Classify one rendered scene along the four safety axes
    ///
    /// Parse failures are absorbed into a conservative report; only
    /// transport failures error.
    pub async fn safety_check_scene(
        &self,
        text: &str,
        age: u8,
    ) -> Result<SafetyReport, InferenceError> {
        let prompt = prompt_builder::build_safety_prompt(text, age);
        let request = InferenceRequest::from_user_prompt(prompt)
            .with_temperature(0.0)
            .with_max_tokens(400)
            .with_json_output();

        let response = self.inference.generate(request).await?;

        let Some(raw) = response.payload.collect_text() else {
            warn!("Safety check returned no content, substituting conservative report");
            return Ok(SafetyReport::conservative("safety check returned no content"));
        };

        match serde_json::from_str::<SafetyReport>(llm::strip_code_fences(&raw)) {
            Ok(report) => {
                debug!(safe = report.is_scene_safe(), "Scene safety verdict parsed");
                Ok(report)
            }
            Err(e) => {
                warn!(
                    error = %e,
                    raw_response = %raw,
                    "Safety report was not valid JSON, substituting conservative report"
                );
                Ok(SafetyReport::conservative(
                    "safety report could not be parsed",
                ))
            }
        }
    }
}
