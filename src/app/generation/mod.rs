//! Code generation: the HTTP client for the remote service, reply cleanup, and
//! the coordinator that runs requests off the UI thread.

mod client;
mod coordinator;
mod sanitize;

pub use client::{
    GenerateCodeRequest, GenerateCodeResponse, GenerationError, GenerationService,
    HttpGenerationClient,
};
pub use coordinator::GenerationCoordinator;
pub use sanitize::{sanitize_response, FENCE_MARKER, LANGUAGE_TAG};
