//! Story request/response DTOs
//!
//! Range validation happens here, at the boundary: the pipeline trusts
//! the config it is handed and does not re-validate.

use serde::{Deserialize, Serialize};

use crate::application::services::story_pipeline::PipelineResult;
use crate::domain::value_objects::{StoryConfig, StoryOutline};

/// Incoming story generation request
#[derive(Debug, Clone, Deserialize)]
pub struct StoryRequestDto {
    pub age: u8,
    pub length_minutes: u32,
    pub themes: String,
    #[serde(default)]
    pub moral: Option<String>,
}

/// Request validation failures, reported as 400s by the HTTP layer
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("age must be between 5 and 10, got {0}")]
    Age(u8),
    #[error("length_minutes must be one of 5, 10 or 15, got {0}")]
    LengthMinutes(u32),
}

impl StoryRequestDto {
    /// Validate ranges and convert into a pipeline config
    pub fn into_config(self) -> Result<StoryConfig, ValidationError> {
        if !(5..=10).contains(&self.age) {
            return Err(ValidationError::Age(self.age));
        }
        if ![5, 10, 15].contains(&self.length_minutes) {
            return Err(ValidationError::LengthMinutes(self.length_minutes));
        }
        Ok(StoryConfig {
            age: self.age,
            length_minutes: self.length_minutes,
            themes: self.themes,
            moral: self.moral,
        })
    }
}

/// Successful story generation response
#[derive(Debug, Serialize)]
pub struct StoryResponseDto {
    pub story: String,
    pub outline: StoryOutline,
    pub scenes: Vec<String>,
    pub moral: String,
    pub moral_overridden: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub moral_disclaimer: Option<String>,
}

impl From<PipelineResult> for StoryResponseDto {
    fn from(result: PipelineResult) -> Self {
        Self {
            story: result.story,
            outline: result.outline,
            scenes: result.scenes,
            moral: result.moral,
            moral_overridden: result.moral_overridden,
            moral_disclaimer: result.moral_disclaimer,
        }
    }
}

/// Incoming narration request
#[derive(Debug, Clone, Deserialize)]
pub struct NarrationRequestDto {
    pub text: String,
}

/// Incoming illustration request
#[derive(Debug, Clone, Deserialize)]
pub struct IllustrationRequestDto {
    pub summary: String,
}

/// Illustration response
#[derive(Debug, Serialize)]
pub struct IllustrationResponseDto {
    pub image_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(age: u8, length_minutes: u32) -> StoryRequestDto {
        StoryRequestDto {
            age,
            length_minutes,
            themes: "space".to_string(),
            moral: None,
        }
    }

    #[test]
    fn test_valid_request_converts() {
        let config = request(7, 10).into_config().unwrap();
        assert_eq!(config.age, 7);
        assert_eq!(config.length_minutes, 10);
    }

    #[test]
    fn test_age_out_of_range_is_rejected() {
        assert!(matches!(request(4, 10).into_config(), Err(ValidationError::Age(4))));
        assert!(matches!(request(11, 10).into_config(), Err(ValidationError::Age(11))));
    }

    #[test]
    fn test_length_must_be_a_supported_value() {
        assert!(matches!(
            request(7, 7).into_config(),
            Err(ValidationError::LengthMinutes(7))
        ));
        for minutes in [5, 10, 15] {
            assert!(request(7, minutes).into_config().is_ok());
        }
    }
}
