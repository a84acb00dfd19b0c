use anyhow::Context;
use axum::{extract::State, http::header, response::IntoResponse, Json};
use serde::Serialize;
use serde_json::Value;

use crate::analysis::ats::AtsReport;
use crate::editor::edits::{Edit, FormInput};
use crate::editor::normalizer::normalize;
use crate::editor::session::{EditorSession, SaveOutcome};
use crate::errors::{AppError, AppJson};
use crate::models::Document;
use crate::render::export::{export_json, json_export_filename, JSON_MIME};
use crate::state::AppState;

/// Body of every mutating document endpoint.
#[derive(Serialize)]
pub struct MutationResponse {
    pub document: Document,
    #[serde(flatten)]
    pub outcome: SaveOutcome,
}

impl MutationResponse {
    fn respond(session: &EditorSession, outcome: SaveOutcome) -> Json<Self> {
        Json(Self {
            document: session.document().clone(),
            outcome,
        })
    }
}

/// POST /api/v1/normalize
pub async fn handle_normalize(AppJson(body): AppJson<Value>) -> Json<Document> {
    Json(normalize(Some(&body)))
}

/// GET /api/v1/document
pub async fn handle_get_document(State(state): State<AppState>) -> Json<Document> {
    let session = state.session.lock().await;
    Json(session.document().clone())
}

/// PUT /api/v1/document/form
pub async fn handle_apply_form(
    State(state): State<AppState>,
    AppJson(form): AppJson<FormInput>,
) -> Json<MutationResponse> {
    let mut session = state.session.lock().await;
    let outcome = session.apply_form(form).await;
    MutationResponse::respond(&session, outcome)
}

/// POST /api/v1/document/edits
pub async fn handle_apply_edit(
    State(state): State<AppState>,
    AppJson(edit): AppJson<Edit>,
) -> Result<Json<MutationResponse>, AppError> {
    let mut session = state.session.lock().await;
    let outcome = session.apply_edit(edit).await?;
    Ok(MutationResponse::respond(&session, outcome))
}

/// POST /api/v1/document/keywords
pub async fn handle_extract_keywords(
    State(state): State<AppState>,
) -> Result<Json<MutationResponse>, AppError> {
    let mut session = state.session.lock().await;
    let outcome = session.extract_keywords().await?;
    Ok(MutationResponse::respond(&session, outcome))
}

/// POST /api/v1/document/reset
pub async fn handle_reset(State(state): State<AppState>) -> Json<MutationResponse> {
    let mut session = state.session.lock().await;
    let outcome = session.reset().await;
    MutationResponse::respond(&session, outcome)
}

/// POST /api/v1/document/sample
pub async fn handle_load_sample(State(state): State<AppState>) -> Json<MutationResponse> {
    let mut session = state.session.lock().await;
    let outcome = session.load_sample().await;
    MutationResponse::respond(&session, outcome)
}

/// POST /api/v1/document/import
/// Takes the raw file contents as the body.
pub async fn handle_import(
    State(state): State<AppState>,
    body: String,
) -> Result<Json<MutationResponse>, AppError> {
    let mut session = state.session.lock().await;
    let outcome = session.import_json(&body).await?;
    Ok(MutationResponse::respond(&session, outcome))
}

/// GET /api/v1/document/export
pub async fn handle_export(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let session = state.session.lock().await;
    let document = session.document();
    let json = export_json(document).context("Failed to serialize document for export")?;
    let disposition = format!(
        "attachment; filename=\"{}\"",
        json_export_filename(document)
    );
    Ok((
        [
            (header::CONTENT_TYPE, JSON_MIME.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        json,
    ))
}

/// GET /api/v1/document/ats
pub async fn handle_document_ats(State(state): State<AppState>) -> Json<AtsReport> {
    let session = state.session.lock().await;
    Json(session.report(state.scorer.as_ref()))
}
