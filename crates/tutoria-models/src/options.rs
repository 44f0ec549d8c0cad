//! Analysis option flags.

use serde::{Deserialize, Serialize};

/// Flags selecting the optional sections of a video assessment.
///
/// Wire names follow the frontend contract (`optionsAnalise` payload).
/// Every flag defaults to `true` when absent, so a request without the
/// options object gets the full assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisOptions {
    /// List chords mentioned in the lesson
    #[serde(rename = "extrairAcordes", default = "default_true")]
    pub extract_chords: bool,

    /// List instruments mentioned in the lesson
    #[serde(rename = "detectarInstrumentos", default = "default_true")]
    pub detect_instruments: bool,

    /// Describe the musical structure covered by the lesson
    #[serde(rename = "analisarEstrutura", default = "default_true")]
    pub analyze_structure: bool,

    /// Report whether tablature is used
    #[serde(rename = "extrairTablatura", default = "default_true")]
    pub extract_tablature: bool,
}

fn default_true() -> bool {
    true
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            extract_chords: true,
            detect_instruments: true,
            analyze_structure: true,
            extract_tablature: true,
        }
    }
}
