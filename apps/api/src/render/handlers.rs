use axum::{
    extract::{Path, State},
    response::Html,
};
use serde_json::Value;

use crate::editor::normalizer::normalize;
use crate::errors::{AppError, AppJson};
use crate::render::{render, PreviewMode};
use crate::state::AppState;

fn parse_mode(mode: &str) -> Result<PreviewMode, AppError> {
    mode.parse().map_err(AppError::Validation)
}

/// POST /api/v1/render/:mode
/// Renders any JSON document after normalizing it.
pub async fn handle_render(
    Path(mode): Path<String>,
    AppJson(body): AppJson<Value>,
) -> Result<Html<String>, AppError> {
    let mode = parse_mode(&mode)?;
    let document = normalize(Some(&body));
    Ok(Html(render(mode, &document)))
}

/// GET /api/v1/document/preview/:mode
pub async fn handle_preview(
    State(state): State<AppState>,
    Path(mode): Path<String>,
) -> Result<Html<String>, AppError> {
    let mode = parse_mode(&mode)?;
    let session = state.session.lock().await;
    Ok(Html(render(mode, session.document())))
}
