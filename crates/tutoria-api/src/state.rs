//! Application state.

use std::sync::Arc;

use minijinja::Environment;

use tutoria_gemini::{GeminiClient, GeminiConfig};
use tutoria_transcript::{CaptionClient, CaptionClientConfig};

use crate::config::ApiConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub captions: Arc<CaptionClient>,
    pub gemini: Arc<GeminiClient>,
    pub templates: Arc<Environment<'static>>,
}

impl AppState {
    /// Create new application state.
    pub fn new(config: ApiConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let captions = CaptionClient::new(CaptionClientConfig::default())?;
        let gemini = GeminiClient::new(GeminiConfig::new(
            config.gemini_api_key.clone(),
            config.gemini_model.clone(),
        ))?;

        let mut templates = Environment::new();
        templates.add_template("index.html", include_str!("../templates/index.html"))?;

        Ok(Self {
            config,
            captions: Arc::new(captions),
            gemini: Arc::new(gemini),
            templates: Arc::new(templates),
        })
    }
}
