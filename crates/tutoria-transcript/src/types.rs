//! Caption track and transcript entry types.

use std::fmt;

/// How a caption track was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackKind {
    /// Uploaded by the channel
    Manual,
    /// Speech-recognition output (the provider marks these `asr`)
    Generated,
}

/// A caption track advertised by the watch page.
#[derive(Debug, Clone)]
pub struct CaptionTrack {
    /// Language code as reported by the provider
    pub language_code: String,
    /// Human-readable track name, when present
    pub name: Option<String>,
    /// Manual or generated
    pub kind: TrackKind,
    /// Provider URL for the timed text payload
    pub base_url: String,
}

/// One timed caption line.
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptEntry {
    /// Caption text with newlines collapsed
    pub text: String,
    /// Start offset in seconds
    pub start: f64,
    /// Duration in seconds
    pub duration: f64,
}

/// Which rung of the selection cascade produced a track.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionTier {
    /// Manual track in a preferred language
    Manual,
    /// Generated track in a preferred language
    Generated,
    /// First track the provider offers, any language
    AnyAvailable,
}

impl SelectionTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            SelectionTier::Manual => "manual",
            SelectionTier::Generated => "generated",
            SelectionTier::AnyAvailable => "any_available",
        }
    }
}

impl fmt::Display for SelectionTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
