//! Story API routes - generation, narration and illustration endpoints
//!
//! The caller receives either a complete result or a single error
//! message; there is no partial or streaming failure mode.

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use tracing::Instrument;
use uuid::Uuid;

use crate::application::dto::{
    IllustrationRequestDto, IllustrationResponseDto, NarrationRequestDto, StoryRequestDto,
    StoryResponseDto,
};
use crate::infrastructure::state::AppState;

/// Generate a complete bedtime story
pub async fn generate_story(
    State(state): State<Arc<AppState>>,
    Json(req): Json<StoryRequestDto>,
) -> Result<Json<StoryResponseDto>, (StatusCode, String)> {
    let config = req
        .into_config()
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;

    let request_id = Uuid::new_v4();
    let span = tracing::info_span!("story_request", %request_id);

    let result = state
        .pipeline
        .run(&config)
        .instrument(span)
        .await
        .map_err(|e| (StatusCode::BAD_GATEWAY, e.to_string()))?;

    Ok(Json(result.into()))
}

/// Synthesize narration audio for scene text
pub async fn narrate_text(
    State(state): State<Arc<AppState>>,
    Json(req): Json<NarrationRequestDto>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let audio = state
        .narration_service
        .narrate(&req.text)
        .await
        .map_err(|e| (StatusCode::BAD_GATEWAY, e.to_string()))?;

    Ok(([(header::CONTENT_TYPE, "audio/mpeg")], audio))
}

/// Generate a sanitized illustration for a scene summary
pub async fn illustrate_scene(
    State(state): State<Arc<AppState>>,
    Json(req): Json<IllustrationRequestDto>,
) -> Result<Json<IllustrationResponseDto>, (StatusCode, String)> {
    let image_url = state
        .illustration_service
        .illustrate_scene(&req.summary)
        .await
        .map_err(|e| (StatusCode::BAD_GATEWAY, e.to_string()))?;

    Ok(Json(IllustrationResponseDto { image_url }))
}
