//! HTTP client for the Gemini `generateContent` API.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::error::{GeminiError, GeminiResult};

/// Public endpoint for the Generative Language API.
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Fixed sampling parameters for assessments.
const TEMPERATURE: f64 = 0.7;
const TOP_P: f64 = 1.0;
const TOP_K: i32 = 1;
const MAX_OUTPUT_TOKENS: u32 = 2048;

/// Harm categories blocked at `BLOCK_MEDIUM_AND_ABOVE`.
const BLOCKED_CATEGORIES: &[&str] = &[
    "HARM_CATEGORY_HARASSMENT",
    "HARM_CATEGORY_HATE_SPEECH",
    "HARM_CATEGORY_SEXUALLY_EXPLICIT",
    "HARM_CATEGORY_DANGEROUS_CONTENT",
];

/// Configuration for [`GeminiClient`].
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API key passed as the `key` query parameter
    pub api_key: String,
    /// Model name used in the request path
    pub model: String,
    /// Endpoint base URL
    pub base_url: String,
}

impl GeminiConfig {
    /// Config pointing at the public endpoint.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

/// Client for requesting lesson assessments from Gemini.
pub struct GeminiClient {
    http: Client,
    config: GeminiConfig,
}

impl GeminiClient {
    /// Create a new client.
    ///
    /// No request timeout is configured; model calls on long transcripts
    /// can take well over a minute.
    pub fn new(config: GeminiConfig) -> GeminiResult<Self> {
        let http = Client::builder().build().map_err(GeminiError::Network)?;
        Ok(Self { http, config })
    }

    /// Model name this client sends requests to.
    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Submit a prompt and decode the JSON object out of the model reply.
    ///
    /// The decoded value is returned verbatim; the reply is not validated
    /// against any assessment schema.
    pub async fn request_assessment(&self, prompt: &str) -> GeminiResult<serde_json::Value> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.config.base_url, self.config.model, self.config.api_key
        );

        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: GenerationConfig::fixed(),
            safety_settings: SafetySetting::defaults(),
        };

        debug!(model = %self.config.model, prompt_len = prompt.len(), "calling generateContent");

        let response = self.http.post(&url).json(&request).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(GeminiError::CallFailed(format!(
                "Gemini API returned {status}: {body}"
            )));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| GeminiError::CallFailed(format!("unreadable Gemini response: {e}")))?;

        let feedback = parsed.prompt_feedback.map(|value| value.to_string());

        let parts = parsed
            .candidates
            .first()
            .and_then(|candidate| candidate.content.as_ref())
            .map(|content| content.parts.as_slice())
            .filter(|parts| !parts.is_empty())
            .ok_or_else(|| GeminiError::InvalidResponse { feedback })?;

        // Long replies arrive split across parts; the reply text is their
        // concatenation.
        let text: String = parts.iter().map(|part| part.text.as_str()).collect();
        let text = text.trim();

        let payload = extract_json_object(text);
        serde_json::from_str(payload).map_err(|e| {
            error!(reply = %text, "model reply did not contain decodable JSON");
            GeminiError::Decode(e.to_string())
        })
    }
}

/// Slice the JSON object out of a model reply.
///
/// Takes the span from the first `{` to the last `}` when both appear in
/// order; otherwise strips a Markdown code fence. Models regularly wrap
/// the object in prose or in a ```json fence.
fn extract_json_object(text: &str) -> &str {
    let trimmed = text.trim();

    if let (Some(start), Some(end)) = (trimmed.find('{'), trimmed.rfind('}')) {
        if end > start {
            return &trimmed[start..=end];
        }
    }

    let stripped = trimmed.strip_prefix("```json").unwrap_or(trimmed);
    let stripped = stripped.strip_suffix("```").unwrap_or(stripped);
    stripped.trim()
}

// ============================================================================
// Wire types
// ============================================================================

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
    #[serde(rename = "safetySettings")]
    safety_settings: Vec<SafetySetting>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f64,
    #[serde(rename = "topP")]
    top_p: f64,
    #[serde(rename = "topK")]
    top_k: i32,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}

impl GenerationConfig {
    fn fixed() -> Self {
        Self {
            temperature: TEMPERATURE,
            top_p: TOP_P,
            top_k: TOP_K,
            max_output_tokens: MAX_OUTPUT_TOKENS,
        }
    }
}

#[derive(Debug, Serialize)]
struct SafetySetting {
    category: &'static str,
    threshold: &'static str,
}

impl SafetySetting {
    fn defaults() -> Vec<SafetySetting> {
        BLOCKED_CATEGORIES
            .iter()
            .copied()
            .map(|category| SafetySetting {
                category,
                threshold: "BLOCK_MEDIUM_AND_ABOVE",
            })
            .collect()
    }
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(rename = "promptFeedback")]
    prompt_feedback: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: String,
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    const MODEL: &str = "gemini-1.5-flash-latest";

    fn client_for(server: &MockServer) -> GeminiClient {
        GeminiClient::new(GeminiConfig {
            api_key: "test-key".to_string(),
            model: MODEL.to_string(),
            base_url: server.uri(),
        })
        .unwrap()
    }

    fn reply_with_text(text: &str) -> serde_json::Value {
        json!({
            "candidates": [{
                "content": {
                    "parts": [{ "text": text }],
                    "role": "model"
                },
                "finishReason": "STOP"
            }]
        })
    }

    // ========================================================================
    // JSON extraction
    // ========================================================================

    #[test]
    fn test_extract_bare_object() {
        assert_eq!(extract_json_object(r#"{"a": 1}"#), r#"{"a": 1}"#);
    }

    #[test]
    fn test_extract_object_wrapped_in_prose() {
        let text = "Claro! Aqui está a avaliação:\n{\"pontuacaoGeral\": 4}\nEspero que ajude.";
        assert_eq!(extract_json_object(text), r#"{"pontuacaoGeral": 4}"#);
    }

    #[test]
    fn test_extract_fenced_object() {
        let text = "```json\n{\"a\": 1}\n```";
        assert_eq!(extract_json_object(text), r#"{"a": 1}"#);
    }

    #[test]
    fn test_extract_fence_without_braces() {
        let text = "```json\nnada aqui\n```";
        assert_eq!(extract_json_object(text), "nada aqui");
    }

    #[test]
    fn test_extract_plain_text_passes_through() {
        assert_eq!(extract_json_object("sem json"), "sem json");
    }

    // ========================================================================
    // generateContent calls
    // ========================================================================

    #[tokio::test]
    async fn test_request_assessment_decodes_reply() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(format!("/v1beta/models/{MODEL}:generateContent")))
            .and(query_param("key", "test-key"))
            .and(body_partial_json(json!({
                "generationConfig": {
                    "temperature": 0.7,
                    "topP": 1.0,
                    "topK": 1,
                    "maxOutputTokens": 2048
                }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(reply_with_text(
                "```json\n{\"pontuacaoGeral\": 4, \"comentariosGerais\": \"Boa aula.\"}\n```",
            )))
            .expect(1)
            .mount(&server)
            .await;

        let result = client_for(&server)
            .request_assessment("avalie este vídeo")
            .await
            .unwrap();

        assert_eq!(result["pontuacaoGeral"], 4);
        assert_eq!(result["comentariosGerais"], "Boa aula.");
    }

    #[tokio::test]
    async fn test_request_sends_safety_settings() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(format!("/v1beta/models/{MODEL}:generateContent")))
            .and(body_partial_json(json!({
                "safetySettings": [
                    { "category": "HARM_CATEGORY_HARASSMENT", "threshold": "BLOCK_MEDIUM_AND_ABOVE" },
                    { "category": "HARM_CATEGORY_HATE_SPEECH", "threshold": "BLOCK_MEDIUM_AND_ABOVE" },
                    { "category": "HARM_CATEGORY_SEXUALLY_EXPLICIT", "threshold": "BLOCK_MEDIUM_AND_ABOVE" },
                    { "category": "HARM_CATEGORY_DANGEROUS_CONTENT", "threshold": "BLOCK_MEDIUM_AND_ABOVE" }
                ]
            })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(reply_with_text(r#"{"ok": true}"#)),
            )
            .expect(1)
            .mount(&server)
            .await;

        client_for(&server)
            .request_assessment("avalie este vídeo")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_blocked_prompt_is_invalid_response_with_feedback() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "promptFeedback": { "blockReason": "SAFETY" }
            })))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .request_assessment("avalie este vídeo")
            .await
            .unwrap_err();

        match err {
            GeminiError::InvalidResponse { feedback } => {
                assert!(feedback.unwrap().contains("SAFETY"));
            }
            other => panic!("expected InvalidResponse, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_reply_split_across_parts_is_joined() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{
                    "content": {
                        "parts": [
                            { "text": "{\"pontuacaoGeral\": 5," },
                            { "text": " \"comentariosGerais\": \"Excelente.\"}" }
                        ],
                        "role": "model"
                    },
                    "finishReason": "MAX_TOKENS"
                }]
            })))
            .mount(&server)
            .await;

        let result = client_for(&server)
            .request_assessment("avalie este vídeo")
            .await
            .unwrap();

        assert_eq!(result["pontuacaoGeral"], 5);
        assert_eq!(result["comentariosGerais"], "Excelente.");
    }

    #[tokio::test]
    async fn test_candidate_without_content_is_invalid_response() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{ "finishReason": "SAFETY" }]
            })))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .request_assessment("avalie este vídeo")
            .await
            .unwrap_err();

        assert!(matches!(err, GeminiError::InvalidResponse { feedback: None }));
    }

    #[tokio::test]
    async fn test_candidate_with_empty_parts_is_invalid_response() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{ "content": { "parts": [], "role": "model" } }]
            })))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .request_assessment("avalie este vídeo")
            .await
            .unwrap_err();

        assert!(matches!(err, GeminiError::InvalidResponse { feedback: None }));
    }

    #[tokio::test]
    async fn test_api_error_status_is_call_failed() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": { "message": "API key not valid" }
            })))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .request_assessment("avalie este vídeo")
            .await
            .unwrap_err();

        match err {
            GeminiError::CallFailed(msg) => assert!(msg.contains("400")),
            other => panic!("expected CallFailed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_non_json_reply_text_is_decode_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(reply_with_text(
                "Desculpe, não consigo avaliar este vídeo.",
            )))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .request_assessment("avalie este vídeo")
            .await
            .unwrap_err();

        assert!(matches!(err, GeminiError::Decode(_)));
    }
}
