//! Tiered caption track selection and transcript assembly.

use tracing::{info, warn};

use tutoria_models::VideoId;

use crate::client::CaptionClient;
use crate::error::{TranscriptError, TranscriptResult};
use crate::types::{CaptionTrack, SelectionTier, TrackKind, TranscriptEntry};

/// Languages tried by the preferred-language tiers, in priority order.
pub const PREFERRED_LANGUAGES: &[&str] = &["pt", "pt-BR", "en"];

/// Pick a caption track using the three-tier cascade:
///
/// 1. manual tracks in a preferred language;
/// 2. generated tracks in a preferred language;
/// 3. the first track the provider offers, any language.
///
/// Within the first two tiers, preference order outranks track order.
/// Returns `None` only for an empty track list.
pub fn select_track<'a>(
    tracks: &'a [CaptionTrack],
    preferred: &[&str],
) -> Option<(&'a CaptionTrack, SelectionTier)> {
    for (kind, tier) in [
        (TrackKind::Manual, SelectionTier::Manual),
        (TrackKind::Generated, SelectionTier::Generated),
    ] {
        for lang in preferred {
            if let Some(track) = tracks
                .iter()
                .find(|t| t.kind == kind && t.language_code == *lang)
            {
                return Some((track, tier));
            }
        }
    }

    tracks
        .first()
        .map(|track| (track, SelectionTier::AnyAvailable))
}

/// Join entry texts in order, separated by single spaces.
pub fn flatten_entries(entries: &[TranscriptEntry]) -> String {
    entries
        .iter()
        .map(|entry| entry.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Resolve the transcript text for a video.
///
/// Lists the available tracks, walks the selection cascade, fetches the
/// chosen track and flattens it. An empty track list fails with
/// [`TranscriptError::NotFound`]; an empty payload resolves to an empty
/// string, which is the caller's signal that the video has captions but
/// no text.
pub async fn resolve_transcript(
    client: &CaptionClient,
    video: &VideoId,
    preferred: &[&str],
) -> TranscriptResult<String> {
    let tracks = client.list_tracks(video).await?;

    let Some((track, tier)) = select_track(&tracks, preferred) else {
        return Err(TranscriptError::NotFound);
    };

    info!(
        video = %video,
        language = %track.language_code,
        tier = %tier,
        "caption track selected"
    );

    let entries = client.fetch_entries(track).await?;
    if entries.is_empty() {
        warn!(video = %video, "caption track carried no text");
    }

    Ok(flatten_entries(&entries))
}
