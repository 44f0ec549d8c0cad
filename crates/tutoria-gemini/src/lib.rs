//! Gemini assessment client for the Tutoria backend.
//!
//! Builds the Portuguese assessment prompt for a lesson transcript, sends
//! it to the Gemini `generateContent` API with a fixed sampling and safety
//! profile, and decodes the JSON assessment object out of the model reply.

pub mod client;
pub mod error;
pub mod prompt;

pub use client::{GeminiClient, GeminiConfig};
pub use error::{GeminiError, GeminiResult};
pub use prompt::build_assessment_prompt;
