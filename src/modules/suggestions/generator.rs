//! Seam between the requester and whatever produces suggestions.

use async_trait::async_trait;
use thiserror::Error;

use super::models::{SuggestionRequest, SuggestionResponse};

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("suggestion generation is not configured")]
    Disabled,

    #[error("generation request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("generation API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("generation response contained no text")]
    EmptyResponse,

    #[error("generation output does not match the response schema: {0}")]
    Schema(#[from] serde_json::Error),
}

/// Produces related-book titles for a review
#[async_trait]
pub trait SuggestionGenerator: Send + Sync {
    async fn generate(
        &self,
        request: &SuggestionRequest,
    ) -> Result<SuggestionResponse, GenerationError>;
}

/// Used when no API key is configured; every call fails with
/// [`GenerationError::Disabled`].
pub struct DisabledGenerator;

#[async_trait]
impl SuggestionGenerator for DisabledGenerator {
    async fn generate(
        &self,
        _request: &SuggestionRequest,
    ) -> Result<SuggestionResponse, GenerationError> {
        Err(GenerationError::Disabled)
    }
}
