pub mod openai;

use async_trait::async_trait;
use thiserror::Error;

pub use openai::{OpenAiBackend, OpenAiConfig};

/// A rendered scoring request: fixed system rules plus the per-session
/// prompt (rubrics, features, transcript, profile, output shape).
#[derive(Debug, Clone)]
pub struct ScoringRequest {
    pub system: String,
    pub user: String,
}

#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("Scoring request failed: {0}")]
    Request(String),
    #[error("Scoring service returned an empty response")]
    EmptyResponse,
    #[error("Scoring service returned unparsable output: {0}")]
    MalformedResponse(String),
}

/// Trait for pluggable scoring backends.
///
/// The backend converts one rendered prompt into structured JSON text. It
/// is treated as untrusted and non-deterministic; everything it returns
/// passes through the validation boundary before anything downstream sees
/// it. Retry policy lives with the caller, never here.
#[async_trait]
pub trait ScoringBackend: Send + Sync + 'static {
    /// Performs exactly one scoring call.
    async fn score(&self, request: ScoringRequest) -> Result<String, ScoringError>;

    /// Human-readable backend name.
    fn name(&self) -> &str;
}
