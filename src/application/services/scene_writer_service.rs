//! Scene Writer Service - Rendering one planned scene to prose
//!
//! One inference call per invocation. The reply may arrive as a single
//! string or as typed fragments; both normalize through the payload
//! union. Empty or malformed output degrades to the fixed calming
//! fallback sentence instead of failing - only transport failures
//! propagate.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::application::ports::outbound::{InferenceError, InferencePort, InferenceRequest};
use crate::application::services::llm::prompt_builder;
use crate::domain::value_objects::{ScenePlan, StoryConfig, StoryOutline};

/// Fixed, pre-approved calming sentence substituted whenever generation
/// or validation cannot produce safe scene text. Shared with the
/// pipeline's fallback state.
pub const FALLBACK_SCENE_TEXT: &str = "Everything grew soft and quiet, and everyone snuggled up \
     together, feeling warm, safe, and very sleepy.";

/// Service rendering scene prose from the outline
pub struct SceneWriterService {
    inference: Arc<dyn InferencePort>,
}

impl SceneWriterService {
    pub fn new(inference: Arc<dyn InferencePort>) -> Self {
        Self { inference }
    }

    /// Render one scene's prose
    ///
    /// `is_retry` demands a gentler, more comforting rendering; used
    /// after a failed safety check.
    pub async fn generate_scene_text(
        &self,
        outline: &StoryOutline,
        scene: &ScenePlan,
        config: &StoryConfig,
        is_retry: bool,
    ) -> Result<String, InferenceError> {
        let prompt = prompt_builder::build_scene_prompt(outline, scene, config, is_retry);
        let request = InferenceRequest::from_user_prompt(prompt)
            .with_system_prompt(prompt_builder::build_scene_system_prompt())
            .with_temperature(0.35)
            .with_max_tokens(1500);

        let response = self.inference.generate(request).await?;

        match response.payload.collect_text() {
            Some(text) => {
                debug!(scene_id = scene.id, is_retry, chars = text.len(), "Scene rendered");
                Ok(text.trim().to_string())
            }
            None => {
                warn!(
                    scene_id = scene.id,
                    is_retry, "Scene generation returned no usable text, using fallback sentence"
                );
                Ok(FALLBACK_SCENE_TEXT.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::testing::ScriptedInference;
    use crate::domain::value_objects::CharacterSketch;

    fn outline() -> StoryOutline {
        StoryOutline {
            title: "The Lantern Snail".to_string(),
            setting: "A mossy garden at dusk".to_string(),
            main_characters: vec![CharacterSketch {
                name: "Juni".to_string(),
                description: "A gentle snail with a glowing shell".to_string(),
            }],
            scenes: vec![ScenePlan {
                id: 1,
                summary: "Juni lights the garden path".to_string(),
                goal: "setup".to_string(),
                target_word_count: 250,
            }],
        }
    }

    fn config() -> StoryConfig {
        StoryConfig {
            age: 6,
            length_minutes: 5,
            themes: "a garden".to_string(),
            moral: None,
        }
    }

    #[tokio::test]
    async fn test_plain_text_reply_is_returned_trimmed() {
        let mock = Arc::new(ScriptedInference::with_replies(vec![ScriptedInference::text(
            "  Juni glowed softly along the path.  ",
        )]));
        let service = SceneWriterService::new(mock);
        let outline = outline();

        let text = service
            .generate_scene_text(&outline, &outline.scenes[0], &config(), false)
            .await
            .unwrap();

        assert_eq!(text, "Juni glowed softly along the path.");
    }

    #[tokio::test]
    async fn test_fragment_reply_is_normalized() {
        let mock = Arc::new(ScriptedInference::with_replies(vec![
            ScriptedInference::payload(r#"[{"text": "Once upon "}, {"text": "a time."}]"#),
        ]));
        let service = SceneWriterService::new(mock);
        let outline = outline();

        let text = service
            .generate_scene_text(&outline, &outline.scenes[0], &config(), false)
            .await
            .unwrap();

        assert_eq!(text, "Once upon  a time.");
    }

    #[tokio::test]
    async fn test_empty_reply_degrades_to_fallback() {
        let mock = Arc::new(ScriptedInference::with_replies(vec![
            ScriptedInference::payload("[]"),
        ]));
        let service = SceneWriterService::new(mock);
        let outline = outline();

        let text = service
            .generate_scene_text(&outline, &outline.scenes[0], &config(), false)
            .await
            .unwrap();

        assert_eq!(text, FALLBACK_SCENE_TEXT);
    }

    #[tokio::test]
    async fn test_transport_failure_propagates() {
        let mock = Arc::new(ScriptedInference::with_replies(vec![
            ScriptedInference::transport_failure("timeout"),
        ]));
        let service = SceneWriterService::new(mock);
        let outline = outline();

        let result = service
            .generate_scene_text(&outline, &outline.scenes[0], &config(), false)
            .await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_retry_prompt_demands_gentler_rendering() {
        let mock = Arc::new(ScriptedInference::with_replies(vec![ScriptedInference::text(
            "A softer scene.",
        )]));
        let service = SceneWriterService::new(mock.clone());
        let outline = outline();

        service
            .generate_scene_text(&outline, &outline.scenes[0], &config(), true)
            .await
            .unwrap();

        assert!(mock.prompt(0).contains("GENTLER"));
    }
}
