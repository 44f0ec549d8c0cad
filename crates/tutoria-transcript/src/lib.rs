//! YouTube transcript resolution for the Tutoria backend.
//!
//! Caption tracks are discovered from the watch page, selected through a
//! strict cascade (manual tracks in preferred languages, then generated
//! tracks in preferred languages, then anything available) and fetched
//! as timed text.

pub mod client;
pub mod error;
pub mod resolver;
pub mod types;

pub use client::{CaptionClient, CaptionClientConfig};
pub use error::{TranscriptError, TranscriptResult};
pub use resolver::{flatten_entries, resolve_transcript, select_track, PREFERRED_LANGUAGES};
pub use types::{CaptionTrack, SelectionTier, TrackKind, TranscriptEntry};
