//! Application services - Use case implementations
//!
//! The generation pipeline services (moral, outline, scene writer,
//! safety, pipeline) form the core flow; illustration and narration are
//! collaborators consumed by the surrounding application.

pub mod illustration_service;
pub mod llm;
pub mod moral_service;
pub mod narration_service;
pub mod outline_service;
pub mod safety_service;
pub mod scene_writer_service;
pub mod story_pipeline;

#[cfg(test)]
pub(crate) mod testing;

pub use illustration_service::IllustrationService;
pub use moral_service::MoralService;
pub use narration_service::NarrationService;
pub use outline_service::{OutlineError, OutlinePlan, OutlineService};
pub use safety_service::SafetyService;
pub use scene_writer_service::{SceneWriterService, FALLBACK_SCENE_TEXT};
pub use story_pipeline::{PipelineError, PipelineResult, StoryPipeline};
