//! Shared application state

use std::sync::Arc;

use crate::application::ports::outbound::InferencePort;
use crate::application::services::{
    IllustrationService, MoralService, NarrationService, OutlineService, SafetyService,
    SceneWriterService, StoryPipeline,
};
use crate::infrastructure::comfyui::ComfyUIClient;
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::ollama::OllamaClient;
use crate::infrastructure::tts::TtsClient;

/// Shared application state
pub struct AppState {
    pub config: AppConfig,
    pub pipeline: StoryPipeline,
    pub narration_service: NarrationService,
    pub illustration_service: IllustrationService,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        // Initialize outbound clients
        let llm_client: Arc<dyn InferencePort> = Arc::new(OllamaClient::new(
            &config.ollama_base_url,
            &config.ollama_model,
        ));
        let tts_client = TtsClient::new(&config.tts_base_url, &config.tts_model, &config.tts_voice);
        let comfyui_client = ComfyUIClient::new(&config.comfyui_base_url);

        // Wire the generation pipeline
        let moral_service = Arc::new(MoralService::new(llm_client.clone()));
        let outline_service = Arc::new(OutlineService::new(llm_client.clone(), moral_service));
        let scene_writer = Arc::new(SceneWriterService::new(llm_client.clone()));
        let safety_service = Arc::new(SafetyService::new(llm_client));
        let pipeline = StoryPipeline::new(outline_service, scene_writer, safety_service);

        let narration_service = NarrationService::new(Arc::new(tts_client));
        let illustration_service = IllustrationService::new(Arc::new(comfyui_client));

        Self {
            config,
            pipeline,
            narration_service,
            illustration_service,
        }
    }
}
