//! Error types for Gemini calls.

use thiserror::Error;

/// Result alias for Gemini operations.
pub type GeminiResult<T> = Result<T, GeminiError>;

/// Errors produced while requesting an assessment.
#[derive(Debug, Error)]
pub enum GeminiError {
    /// The reply carried no text payload, typically because the prompt or
    /// the candidate was blocked by a safety filter.
    #[error("model reply carried no text payload (feedback: {})", .feedback.as_deref().unwrap_or("none"))]
    InvalidResponse { feedback: Option<String> },

    /// The reply text did not contain a decodable JSON object.
    #[error("model reply was not decodable JSON: {0}")]
    Decode(String),

    /// The API answered with a non-success status.
    #[error("model call failed: {0}")]
    CallFailed(String),

    /// Transport-level failure reaching the API.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
}
