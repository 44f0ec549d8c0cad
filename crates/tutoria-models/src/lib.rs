//! Shared domain types for the Tutoria backend.
//!
//! This crate provides the types used across the service crates:
//! - Validated YouTube video IDs and URL extraction
//! - Analysis option flags carried by API requests

pub mod options;
pub mod video;

// Re-export common types
pub use options::AnalysisOptions;
pub use video::{extract_video_id, VideoId};
