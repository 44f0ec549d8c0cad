//! YouTube caption HTTP client.
//!
//! Track discovery reads the watch page and decodes the captions
//! section embedded in the player response; track contents are fetched
//! from the timedtext endpoint in `json3` format.

use reqwest::Client;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use tutoria_models::VideoId;

use crate::error::{TranscriptError, TranscriptResult};
use crate::types::{CaptionTrack, TrackKind, TranscriptEntry};

/// Desktop browser User-Agent; without one the watch page serves a
/// consent interstitial in some regions.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

/// Marker preceding the captions object in the player response.
const CAPTIONS_MARKER: &str = r#""captions":"#;

/// Configuration for the caption client.
#[derive(Debug, Clone)]
pub struct CaptionClientConfig {
    /// Base URL of the video platform
    pub base_url: String,
}

impl Default for CaptionClientConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.youtube.com".to_string(),
        }
    }
}

/// Client for listing and fetching caption tracks.
pub struct CaptionClient {
    http: Client,
    config: CaptionClientConfig,
}

impl CaptionClient {
    /// Create a new caption client.
    ///
    /// No request timeout is configured; long transcripts can be slow
    /// to serve and callers treat the fetch as blocking.
    pub fn new(config: CaptionClientConfig) -> TranscriptResult<Self> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(TranscriptError::Network)?;

        Ok(Self { http, config })
    }

    /// List the caption tracks advertised by the watch page.
    ///
    /// A watch page without a captions section means captions are
    /// disabled for the video. A present section with no tracks yields
    /// an empty list.
    pub async fn list_tracks(&self, video: &VideoId) -> TranscriptResult<Vec<CaptionTrack>> {
        let url = format!("{}/watch?v={}", self.config.base_url, video);

        debug!(video = %video, "fetching watch page");

        let response = self
            .http
            .get(&url)
            .header("Accept-Language", "en-US")
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(TranscriptError::Provider(format!(
                "watch page returned {}",
                response.status()
            )));
        }

        let html = response.text().await?;

        let Some(marker) = html.find(CAPTIONS_MARKER) else {
            return Err(TranscriptError::Disabled);
        };
        let rest = &html[marker + CAPTIONS_MARKER.len()..];
        let raw = rest
            .find('{')
            .and_then(|open| balanced_json_object(&rest[open..]))
            .ok_or_else(|| {
                TranscriptError::Provider("truncated captions section".to_string())
            })?;

        let captions: CaptionsSection = serde_json::from_str(raw).map_err(|e| {
            TranscriptError::Provider(format!("undecodable captions section: {}", e))
        })?;

        let Some(renderer) = captions.renderer else {
            return Err(TranscriptError::Disabled);
        };

        Ok(renderer
            .caption_tracks
            .into_iter()
            .map(CaptionTrack::from)
            .collect())
    }

    /// Fetch and decode the timed text for a track.
    ///
    /// An empty event list is a valid payload and yields no entries;
    /// only an undecodable payload is an error.
    pub async fn fetch_entries(
        &self,
        track: &CaptionTrack,
    ) -> TranscriptResult<Vec<TranscriptEntry>> {
        let mut url = Url::parse(&track.base_url)
            .map_err(|e| TranscriptError::Fetch(format!("invalid track URL: {}", e)))?;
        url.query_pairs_mut().append_pair("fmt", "json3");

        debug!(language = %track.language_code, "fetching caption track");

        let response = self.http.get(url).send().await?;

        if !response.status().is_success() {
            return Err(TranscriptError::Provider(format!(
                "timedtext returned {}",
                response.status()
            )));
        }

        let body = response.text().await?;
        let payload: TimedTextPayload = serde_json::from_str(&body).map_err(|e| {
            TranscriptError::Fetch(format!("undecodable timedtext payload: {}", e))
        })?;

        let entries = payload
            .events
            .into_iter()
            .filter_map(|event| {
                let text: String = event.segs.iter().map(|seg| seg.utf8.as_str()).collect();
                let text = text.trim();
                if text.is_empty() {
                    return None;
                }
                Some(TranscriptEntry {
                    text: text.replace('\n', " "),
                    start: event.start_ms as f64 / 1000.0,
                    duration: event.duration_ms.unwrap_or(0) as f64 / 1000.0,
                })
            })
            .collect();

        Ok(entries)
    }
}

/// Slice the balanced JSON object starting at the first byte of `s`,
/// which must be `{`. Quote and escape aware.
fn balanced_json_object(s: &str) -> Option<&str> {
    let bytes = s.as_bytes();
    if bytes.first() != Some(&b'{') {
        return None;
    }

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, &b) in bytes.iter().enumerate() {
        if escaped {
            escaped = false;
            continue;
        }
        match b {
            b'\\' if in_string => escaped = true,
            b'"' => in_string = !in_string,
            b'{' if !in_string => depth += 1,
            b'}' if !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(&s[..=i]);
                }
            }
            _ => {}
        }
    }

    None
}

// ============================================================================
// Wire payloads
// ============================================================================

#[derive(Debug, Deserialize)]
struct CaptionsSection {
    #[serde(rename = "playerCaptionsTracklistRenderer")]
    renderer: Option<TracklistRenderer>,
}

#[derive(Debug, Deserialize)]
struct TracklistRenderer {
    #[serde(rename = "captionTracks", default)]
    caption_tracks: Vec<RawCaptionTrack>,
}

#[derive(Debug, Deserialize)]
struct RawCaptionTrack {
    #[serde(rename = "baseUrl")]
    base_url: String,
    #[serde(rename = "languageCode")]
    language_code: String,
    #[serde(default)]
    kind: Option<String>,
    name: Option<TrackName>,
}

#[derive(Debug, Deserialize)]
struct TrackName {
    #[serde(rename = "simpleText")]
    simple_text: Option<String>,
    #[serde(default)]
    runs: Vec<TextRun>,
}

#[derive(Debug, Deserialize)]
struct TextRun {
    #[serde(default)]
    text: String,
}

impl From<RawCaptionTrack> for CaptionTrack {
    fn from(raw: RawCaptionTrack) -> Self {
        let kind = match raw.kind.as_deref() {
            Some("asr") => TrackKind::Generated,
            _ => TrackKind::Manual,
        };
        let name = raw.name.and_then(|n| {
            n.simple_text.or_else(|| {
                let joined: String = n.runs.into_iter().map(|r| r.text).collect();
                (!joined.is_empty()).then_some(joined)
            })
        });
        Self {
            language_code: raw.language_code,
            name,
            kind,
            base_url: raw.base_url,
        }
    }
}

#[derive(Debug, Deserialize)]
struct TimedTextPayload {
    #[serde(default)]
    events: Vec<TimedTextEvent>,
}

#[derive(Debug, Deserialize)]
struct TimedTextEvent {
    #[serde(rename = "tStartMs", default)]
    start_ms: u64,
    #[serde(rename = "dDurationMs")]
    duration_ms: Option<u64>,
    #[serde(default)]
    segs: Vec<TimedTextSeg>,
}

#[derive(Debug, Deserialize)]
struct TimedTextSeg {
    #[serde(default)]
    utf8: String,
}
