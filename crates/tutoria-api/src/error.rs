//! API error types.
//!
//! The HTTP status for a failure is derived from the typed error variant,
//! never from inspecting message text. Client-facing bodies carry a fixed
//! Portuguese message under the `erro` key; diagnostic detail (prompt
//! feedback, raw model text, provider payloads) stays in the server logs.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

use tutoria_gemini::GeminiError;
use tutoria_transcript::TranscriptError;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Transcript error: {0}")]
    Transcript(#[from] TranscriptError),

    #[error("Gemini error: {0}")]
    Gemini(#[from] GeminiError),
}

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Transcript(err) if err.is_unavailable() => StatusCode::NOT_FOUND,
            ApiError::Transcript(_) | ApiError::Gemini(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Portuguese message returned to the client.
    fn client_message(&self) -> String {
        match self {
            ApiError::BadRequest(msg) | ApiError::NotFound(msg) => msg.clone(),
            ApiError::Transcript(TranscriptError::Disabled) => {
                "Erro: As legendas estão desativadas para este vídeo.".to_string()
            }
            ApiError::Transcript(TranscriptError::NotFound) => {
                "Erro: Nenhuma legenda de qualquer tipo encontrada.".to_string()
            }
            ApiError::Transcript(TranscriptError::Fetch(cause)) => {
                format!("Erro ao processar dados da legenda: {cause}")
            }
            ApiError::Transcript(TranscriptError::Provider(cause)) => {
                format!("Erro inesperado ao buscar transcrição: {cause}")
            }
            ApiError::Transcript(TranscriptError::Network(err)) => {
                format!("Erro inesperado ao buscar transcrição: {err}")
            }
            ApiError::Gemini(GeminiError::InvalidResponse { .. }) => {
                "Resposta inválida da API Gemini.".to_string()
            }
            ApiError::Gemini(GeminiError::Decode(_)) => {
                "Falha ao decodificar a resposta JSON da API Gemini.".to_string()
            }
            ApiError::Gemini(GeminiError::CallFailed(cause)) => {
                format!("Erro ao chamar a API Gemini: {cause}")
            }
            ApiError::Gemini(GeminiError::Network(err)) => {
                format!("Erro ao chamar a API Gemini: {err}")
            }
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    erro: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // InvalidResponse carries the prompt feedback in its Display, so
        // blocked prompts land in the log here without reaching the client.
        if status.is_server_error() {
            error!(status = %status, error = %self, "request failed");
        } else {
            warn!(status = %status, error = %self, "request rejected");
        }

        let body = ErrorBody {
            erro: self.client_message(),
        };

        (status, Json(body)).into_response()
    }
}
