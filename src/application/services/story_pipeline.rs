//! Story Pipeline - Full generation flow
//!
//! Composes moral selection, outline planning, scene rendering and
//! safety validation into one sequential run: plan the outline (fatal
//! on failure), then render each scene in narrative order through a
//! bounded draft/check/retry/fallback state machine, then assemble the
//! final story text. A scene that fails validation twice is absorbed by
//! the fallback sentence; only outline and transport failures abort the
//! request, and then with no partial result.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::application::ports::outbound::InferenceError;
use crate::application::services::outline_service::{OutlineError, OutlineService};
use crate::application::services::safety_service::SafetyService;
use crate::application::services::scene_writer_service::{SceneWriterService, FALLBACK_SCENE_TEXT};
use crate::domain::value_objects::{ScenePlan, StoryConfig, StoryOutline};

/// Final output of one pipeline run
#[derive(Debug, Serialize)]
pub struct PipelineResult {
    /// Title plus all scene texts, blank-line separated
    pub story: String,
    pub outline: StoryOutline,
    /// Rendered scene texts, 1:1 with `outline.scenes` by position
    pub scenes: Vec<String>,
    pub moral: String,
    pub moral_overridden: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub moral_disclaimer: Option<String>,
}

/// Terminal errors for a pipeline run
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Outline(#[from] OutlineError),
    #[error(transparent)]
    Inference(#[from] InferenceError),
}

/// Per-scene generation phases, bounded to two draft attempts
enum ScenePhase {
    Draft,
    Check(String),
    RetryDraft,
    RetryCheck(String),
    Fallback,
    Accepted(String),
}

/// Orchestrator wiring the generation stages together
pub struct StoryPipeline {
    outline: Arc<OutlineService>,
    writer: Arc<SceneWriterService>,
    safety: Arc<SafetyService>,
}

impl StoryPipeline {
    pub fn new(
        outline: Arc<OutlineService>,
        writer: Arc<SceneWriterService>,
        safety: Arc<SafetyService>,
    ) -> Self {
        Self {
            outline,
            writer,
            safety,
        }
    }

    /// Run the full pipeline for one request
    #[instrument(skip(self, config), fields(age = config.age, length_minutes = config.length_minutes))]
    pub async fn run(&self, config: &StoryConfig) -> Result<PipelineResult, PipelineError> {
        let mut rng = StdRng::from_entropy();
        self.run_with_rng(config, &mut rng).await
    }

    /// Run with a caller-provided randomness source (tests pin the
    /// moral pick through this)
    pub async fn run_with_rng<R: Rng + ?Sized>(
        &self,
        config: &StoryConfig,
        rng: &mut R,
    ) -> Result<PipelineResult, PipelineError> {
        let plan = self.outline.generate_outline(config, rng).await?;

        let mut scene_texts = Vec::with_capacity(plan.outline.scenes.len());
        for scene in &plan.outline.scenes {
            let text = self.render_scene(&plan.outline, scene, config).await?;
            scene_texts.push(text);
        }

        let story = format!("{}\n\n{}", plan.outline.title, scene_texts.join("\n\n"));
        info!(
            title = %plan.outline.title,
            scenes = scene_texts.len(),
            "Story assembled"
        );

        Ok(PipelineResult {
            story,
            outline: plan.outline,
            scenes: scene_texts,
            moral: plan.moral.moral,
            moral_overridden: plan.moral.overridden,
            moral_disclaimer: plan.moral_disclaimer,
        })
    }

    /// Drive one scene through the draft/check state machine
    ///
    /// Always resolves to some text: safe model output, or the fixed
    /// fallback sentence after two unsafe verdicts. Validation failures
    /// never error; transport failures do.
    async fn render_scene(
        &self,
        outline: &StoryOutline,
        scene: &ScenePlan,
        config: &StoryConfig,
    ) -> Result<String, InferenceError> {
        let mut phase = ScenePhase::Draft;
        loop {
            phase = match phase {
                ScenePhase::Draft => {
                    let text = self
                        .writer
                        .generate_scene_text(outline, scene, config, false)
                        .await?;
                    ScenePhase::Check(text)
                }
                ScenePhase::Check(text) => {
                    let report = self.safety.safety_check_scene(&text, config.age).await?;
                    if report.is_scene_safe() {
                        ScenePhase::Accepted(text)
                    } else {
                        warn!(
                            scene_id = scene.id,
                            reasons = ?report.reasons,
                            "Scene failed safety check, retrying with gentler rendering"
                        );
                        ScenePhase::RetryDraft
                    }
                }
                ScenePhase::RetryDraft => {
                    let text = self
                        .writer
                        .generate_scene_text(outline, scene, config, true)
                        .await?;
                    ScenePhase::RetryCheck(text)
                }
                ScenePhase::RetryCheck(text) => {
                    let report = self.safety.safety_check_scene(&text, config.age).await?;
                    if report.is_scene_safe() {
                        ScenePhase::Accepted(text)
                    } else {
                        warn!(
                            scene_id = scene.id,
                            reasons = ?report.reasons,
                            "Retried scene still unsafe, substituting fallback sentence"
                        );
                        ScenePhase::Fallback
                    }
                }
                ScenePhase::Fallback => ScenePhase::Accepted(FALLBACK_SCENE_TEXT.to_string()),
                ScenePhase::Accepted(text) => return Ok(text),
            };
        }
    }
}
