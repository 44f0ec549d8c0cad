//! Transcript error types.

use thiserror::Error;

pub type TranscriptResult<T> = Result<T, TranscriptError>;

#[derive(Debug, Error)]
pub enum TranscriptError {
    /// Captions are turned off for the video.
    #[error("captions are disabled for this video")]
    Disabled,

    /// The provider offers no caption track in any language.
    #[error("no caption track available in any language")]
    NotFound,

    /// A chosen track's payload could not be decoded.
    #[error("caption data could not be processed: {0}")]
    Fetch(String),

    /// The provider answered in an unexpected way.
    #[error("caption provider request failed: {0}")]
    Provider(String),

    /// Transport-level failure talking to the provider.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl TranscriptError {
    /// True when the video simply has no usable captions, as opposed to
    /// a fault in the lookup itself.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, TranscriptError::Disabled | TranscriptError::NotFound)
    }
}
