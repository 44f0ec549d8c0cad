//! Video assessment handler.
//!
//! Drives the whole pipeline for one request: extract the video ID,
//! resolve a transcript, build the Portuguese prompt, call Gemini and
//! return the model's JSON object verbatim.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use tutoria_gemini::build_assessment_prompt;
use tutoria_models::{extract_video_id, AnalysisOptions};
use tutoria_transcript::{resolve_transcript, PREFERRED_LANGUAGES};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Request to assess a lesson video.
#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    /// YouTube URL of the lesson
    pub url: String,
    /// Optional sections the assessment should include; an absent key and
    /// an explicit `null` both mean all enabled
    #[serde(rename = "optionsAnalise", default)]
    pub options: Option<AnalysisOptions>,
}

/// Assess a lesson video from its YouTube URL.
pub async fn analyze_video(
    State(state): State<AppState>,
    request: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    let Json(request) =
        request.map_err(|_| ApiError::bad_request("JSON inválido ou chave 'url' ausente."))?;

    let video = extract_video_id(&request.url).ok_or_else(|| {
        ApiError::bad_request("URL do YouTube inválida ou não foi possível extrair o ID.")
    })?;

    info!(video = %video, "starting assessment");

    let transcript = resolve_transcript(&state.captions, &video, PREFERRED_LANGUAGES).await?;

    if transcript.is_empty() {
        return Err(ApiError::not_found("Transcrição não encontrada ou vazia."));
    }

    info!(video = %video, transcript_len = transcript.len(), "transcript resolved");

    let title = format!("Vídeo ID {video}");
    let options = request.options.unwrap_or_default();
    let prompt = build_assessment_prompt(
        &transcript,
        &request.url,
        &title,
        &options,
        state.gemini.model(),
    );

    let assessment = state.gemini.request_assessment(&prompt).await?;

    info!(video = %video, "assessment completed");

    Ok(Json(assessment))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_defaults_options_when_absent() {
        let request: AnalyzeRequest =
            serde_json::from_str(r#"{"url": "https://youtu.be/dQw4w9WgXcQ"}"#).unwrap();

        assert_eq!(request.url, "https://youtu.be/dQw4w9WgXcQ");
        assert!(request.options.is_none());
        assert_eq!(request.options.unwrap_or_default(), AnalysisOptions::default());
    }

    #[test]
    fn test_request_treats_null_options_as_absent() {
        let request: AnalyzeRequest = serde_json::from_str(
            r#"{"url": "https://youtu.be/dQw4w9WgXcQ", "optionsAnalise": null}"#,
        )
        .unwrap();

        assert!(request.options.is_none());
        assert_eq!(request.options.unwrap_or_default(), AnalysisOptions::default());
    }

    #[test]
    fn test_request_reads_wire_option_names() {
        let request: AnalyzeRequest = serde_json::from_str(
            r#"{"url": "https://youtu.be/dQw4w9WgXcQ", "optionsAnalise": {"extrairTablatura": false}}"#,
        )
        .unwrap();

        let options = request.options.unwrap();
        assert!(options.extract_chords);
        assert!(!options.extract_tablature);
    }

    #[test]
    fn test_request_requires_url_key() {
        assert!(serde_json::from_str::<AnalyzeRequest>(r#"{"optionsAnalise": {}}"#).is_err());
    }
}
