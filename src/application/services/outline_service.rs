//! Outline Service - Planning the story skeleton
//!
//! Turns a story configuration into a structured outline: resolves the
//! moral, derives scene and word targets from the requested length, and
//! issues one planning call that must return strict `StoryOutline`
//! JSON. Planning failures are fatal for the request; there is no retry
//! at this stage.

use std::sync::Arc;

use rand::Rng;
use tracing::{debug, info, instrument, warn};

use crate::application::ports::outbound::{InferenceError, InferencePort, InferenceRequest};
use crate::application::services::llm::{self, prompt_builder};
use crate::application::services::moral_service::MoralService;
use crate::domain::value_objects::{
    MoralDecision, StoryCategory, StoryConfig, StoryOutline, MORAL_OVERRIDE_DISCLAIMER,
};

/// Number of scenes to plan for a read-aloud length
pub fn target_scenes(length_minutes: u32) -> u32 {
    if length_minutes <= 7 {
        3
    } else if length_minutes <= 12 {
        4
    } else {
        5
    }
}

/// Total word budget for a read-aloud length, at a calm bedtime pace
/// of ~150 words per minute
pub fn target_words(length_minutes: u32) -> u32 {
    (length_minutes as f64 * 150.0).round() as u32
}

/// Outline stage output: the skeleton plus the resolved moral metadata
#[derive(Debug)]
pub struct OutlinePlan {
    pub outline: StoryOutline,
    pub moral: MoralDecision,
    /// Fixed explanatory string, present iff the moral was overridden
    pub moral_disclaimer: Option<String>,
}

/// Errors from the planning stage, all fatal for the request
#[derive(Debug, thiserror::Error)]
pub enum OutlineError {
    #[error("outline generation returned no content")]
    NoContent,
    #[error("outline generation returned invalid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),
    #[error("outline generation returned an empty scene list")]
    EmptyOutline,
    #[error(transparent)]
    Inference(#[from] InferenceError),
}

/// Service planning the six-act story outline
pub struct OutlineService {
    inference: Arc<dyn InferencePort>,
    morals: Arc<MoralService>,
}

impl OutlineService {
    pub fn new(inference: Arc<dyn InferencePort>, morals: Arc<MoralService>) -> Self {
        Self { inference, morals }
    }

    /// Plan the outline for one story request
    #[instrument(skip(self, config, rng), fields(age = config.age, length_minutes = config.length_minutes))]
    pub async fn generate_outline<R: Rng + ?Sized>(
        &self,
        config: &StoryConfig,
        rng: &mut R,
    ) -> Result<OutlinePlan, OutlineError> {
        let moral = self
            .morals
            .select_moral(config.moral.as_deref(), config.age, rng)
            .await;

        let category = StoryCategory::from_themes(&config.themes);
        let scenes = target_scenes(config.length_minutes);
        let words = target_words(config.length_minutes);
        debug!(
            category = category.label(),
            target_scenes = scenes,
            target_words = words,
            "Planning outline"
        );

        let prompt =
            prompt_builder::build_outline_prompt(config, category, &moral.moral, scenes, words);
        let request = InferenceRequest::from_user_prompt(prompt)
            .with_system_prompt(prompt_builder::build_outline_system_prompt())
            .with_temperature(0.35)
            .with_max_tokens(2000)
            .with_json_output();

        let response = self.inference.generate(request).await?;
        let raw = response
            .payload
            .collect_text()
            .ok_or(OutlineError::NoContent)?;

        let outline: StoryOutline = serde_json::from_str(llm::strip_code_fences(&raw))
            .map_err(|e| {
                warn!(raw_response = %raw, "Outline response was not valid JSON");
                OutlineError::InvalidJson(e)
            })?;

        if outline.scenes.is_empty() {
            return Err(OutlineError::EmptyOutline);
        }

        info!(
            title = %outline.title,
            scenes = outline.scenes.len(),
            moral_overridden = moral.overridden,
            "Outline planned"
        );

        let moral_disclaimer = moral
            .overridden
            .then(|| MORAL_OVERRIDE_DISCLAIMER.to_string());

        Ok(OutlinePlan {
            outline,
            moral,
            moral_disclaimer,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::testing::ScriptedInference;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const OUTLINE_JSON: &str = r#"{
        "title": "The Star Ferry",
        "setting": "A sleepy harbor among the clouds",
        "main_characters": [{"name": "Pip", "description": "A careful young ferry pilot"}],
        "scenes": [
            {"id": 1, "summary": "Pip polishes the ferry", "goal": "setup", "target_word_count": 300},
            {"id": 2, "summary": "A star falls into the bay", "goal": "inciting incident", "target_word_count": 400},
            {"id": 3, "summary": "Pip carries the star home", "goal": "resolution", "target_word_count": 400},
            {"id": 4, "summary": "The harbor dims and everyone sleeps", "goal": "sleepy landing", "target_word_count": 400}
        ]
    }"#;

    fn service(mock: ScriptedInference) -> (OutlineService, Arc<ScriptedInference>) {
        let mock = Arc::new(mock);
        let morals = Arc::new(MoralService::new(mock.clone()));
        (OutlineService::new(mock.clone(), morals), mock)
    }

    fn config() -> StoryConfig {
        StoryConfig {
            age: 7,
            length_minutes: 10,
            themes: "space".to_string(),
            moral: None,
        }
    }

    #[test]
    fn test_target_scenes_boundaries() {
        assert_eq!(target_scenes(5), 3);
        assert_eq!(target_scenes(7), 3);
        assert_eq!(target_scenes(8), 4);
        assert_eq!(target_scenes(10), 4);
        assert_eq!(target_scenes(12), 4);
        assert_eq!(target_scenes(13), 5);
        assert_eq!(target_scenes(15), 5);
    }

    #[test]
    fn test_target_words_is_150_per_minute() {
        assert_eq!(target_words(5), 750);
        assert_eq!(target_words(10), 1500);
        assert_eq!(target_words(15), 2250);
    }

    #[tokio::test]
    async fn test_generate_outline_parses_plain_json() {
        let (service, _) = service(ScriptedInference::with_replies(vec![
            ScriptedInference::text(OUTLINE_JSON),
        ]));
        let mut rng = StdRng::seed_from_u64(3);

        let plan = service.generate_outline(&config(), &mut rng).await.unwrap();

        assert_eq!(plan.outline.title, "The Star Ferry");
        assert_eq!(plan.outline.scenes.len(), 4);
        assert!(!plan.moral.overridden);
        assert!(plan.moral_disclaimer.is_none());
    }

    #[tokio::test]
    async fn test_generate_outline_strips_code_fences() {
        let fenced = format!("```json\n{}\n```", OUTLINE_JSON);
        let (service, _) = service(ScriptedInference::with_replies(vec![
            ScriptedInference::text(&fenced),
        ]));
        let mut rng = StdRng::seed_from_u64(3);

        let plan = service.generate_outline(&config(), &mut rng).await.unwrap();
        assert_eq!(plan.outline.scenes[3].goal, "sleepy landing");
    }

    #[tokio::test]
    async fn test_prose_response_is_invalid_json() {
        let (service, _) = service(ScriptedInference::with_replies(vec![
            ScriptedInference::text("Sure! Here's an outline for your story..."),
        ]));
        let mut rng = StdRng::seed_from_u64(3);

        let err = service.generate_outline(&config(), &mut rng).await.unwrap_err();
        assert!(matches!(err, OutlineError::InvalidJson(_)));
    }

    #[tokio::test]
    async fn test_empty_scene_list_is_rejected() {
        let empty = r#"{"title": "T", "setting": "S", "main_characters": [], "scenes": []}"#;
        let (service, _) = service(ScriptedInference::with_replies(vec![
            ScriptedInference::text(empty),
        ]));
        let mut rng = StdRng::seed_from_u64(3);

        let err = service.generate_outline(&config(), &mut rng).await.unwrap_err();
        assert!(matches!(err, OutlineError::EmptyOutline));
    }

    #[tokio::test]
    async fn test_blank_response_is_no_content() {
        let (service, _) = service(ScriptedInference::with_replies(vec![
            ScriptedInference::text("   "),
        ]));
        let mut rng = StdRng::seed_from_u64(3);

        let err = service.generate_outline(&config(), &mut rng).await.unwrap_err();
        assert!(matches!(err, OutlineError::NoContent));
    }

    #[tokio::test]
    async fn test_transport_failure_propagates() {
        let (service, _) = service(ScriptedInference::with_replies(vec![
            ScriptedInference::transport_failure("quota exceeded"),
        ]));
        let mut rng = StdRng::seed_from_u64(3);

        let err = service.generate_outline(&config(), &mut rng).await.unwrap_err();
        assert!(matches!(err, OutlineError::Inference(_)));
    }

    #[tokio::test]
    async fn test_overridden_moral_sets_disclaimer() {
        // first reply: classifier verdict, second: outline
        let (service, _) = service(ScriptedInference::with_replies(vec![
            ScriptedInference::text("UNSAFE"),
            ScriptedInference::text(OUTLINE_JSON),
        ]));
        let mut rng = StdRng::seed_from_u64(3);

        let mut config = config();
        config.moral = Some("winning is all that matters".to_string());

        let plan = service.generate_outline(&config, &mut rng).await.unwrap();

        assert!(plan.moral.overridden);
        assert_eq!(
            plan.moral.original_moral.as_deref(),
            Some("winning is all that matters")
        );
        let disclaimer = plan.moral_disclaimer.unwrap();
        assert!(!disclaimer.is_empty());
    }

    #[tokio::test]
    async fn test_outline_prompt_carries_targets() {
        let (service, mock) = service(ScriptedInference::with_replies(vec![
            ScriptedInference::text(OUTLINE_JSON),
        ]));
        let mut rng = StdRng::seed_from_u64(3);

        service.generate_outline(&config(), &mut rng).await.unwrap();

        let prompt = mock.prompt(0);
        assert!(prompt.contains("exactly 4 scenes"));
        assert!(prompt.contains("~1500 words"));
        assert!(prompt.contains("space_adventure"));
    }
}
