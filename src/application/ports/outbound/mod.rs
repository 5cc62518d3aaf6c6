//! Outbound ports - Interfaces that the application requires from external systems

mod inference_port;
mod media_port;

pub use inference_port::{
    ChatMessage, FragmentText, InferenceError, InferencePort, InferenceRequest, InferenceResponse,
    MessageRole, ResponseFragment, ResponsePayload,
};
pub use media_port::{IllustrationPort, NarrationPort};
