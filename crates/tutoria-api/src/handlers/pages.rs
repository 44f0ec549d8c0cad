//! Landing page handler.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use minijinja::context;
use tracing::warn;

use crate::state::AppState;

/// Serve the Portuguese landing page.
///
/// The template gets the configured host and port so its JavaScript can
/// post to the right `/analyze` endpoint.
pub async fn index(State(state): State<AppState>) -> Response {
    let rendered = state.templates.get_template("index.html").and_then(|tmpl| {
        tmpl.render(context! {
            api_host => state.config.host,
            api_port => state.config.port,
        })
    });

    match rendered {
        Ok(body) => Html(body).into_response(),
        Err(err) => {
            warn!("failed to render index template: {}", err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Internal Server Error: {}", err),
            )
                .into_response()
        }
    }
}
