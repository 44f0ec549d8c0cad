//! YouTube video identifiers and URL extraction.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Matches every supported YouTube URL shape in a single alternation:
/// `watch?v=` (with query parameters on either side), `youtu.be/` short
/// links, `/embed/`, `/e/`, `/v/`, and channel-style paths. Scheme and
/// `www.` are optional. The capture group is the 11-character video ID.
static VIDEO_URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?:https?://)?(?:www\.)?(?:youtube\.com/(?:[^/\n\s]+/\S+/|(?:v|e(?:mbed)?)/|\S*?[?&]v=)|youtu\.be/)([A-Za-z0-9_-]{11})",
    )
    .unwrap()
});

/// A validated 11-character YouTube video identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VideoId(String);

impl VideoId {
    /// Parse an identifier token: exactly 11 characters from
    /// `[A-Za-z0-9_-]`.
    pub fn parse(s: &str) -> Option<Self> {
        let valid = s.len() == 11
            && s.chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        valid.then(|| Self(s.to_string()))
    }

    /// Get the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Extract the YouTube video ID from a URL.
///
/// Returns `None` when the URL does not carry an 11-character ID in a
/// recognized position. A longer token yields its first 11 valid
/// characters.
pub fn extract_video_id(url: &str) -> Option<VideoId> {
    VIDEO_URL_RE
        .captures(url)
        .and_then(|caps| caps.get(1))
        .and_then(|m| VideoId::parse(m.as_str()))
}
