use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::analysis::ats::AtsReport;
use crate::analysis::keywords::{rank_keywords, KeywordCount};
use crate::editor::normalizer::normalize;
use crate::errors::AppJson;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct KeywordsRequest {
    pub text: String,
}

#[derive(Serialize)]
pub struct KeywordsResponse {
    pub keywords: Vec<String>,
    /// Same order as `keywords`, with occurrence counts.
    pub ranked: Vec<KeywordCount>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtsRequest {
    #[serde(default)]
    pub resume: Value,
    #[serde(default)]
    pub job_desc: String,
}

/// POST /api/v1/keywords
pub async fn handle_keywords(AppJson(req): AppJson<KeywordsRequest>) -> Json<KeywordsResponse> {
    let ranked = rank_keywords(&req.text);
    let keywords = ranked.iter().map(|entry| entry.keyword.clone()).collect();
    Json(KeywordsResponse { keywords, ranked })
}

/// POST /api/v1/ats
/// The resume is normalized before scoring, so partial resumes are accepted.
pub async fn handle_ats(
    State(state): State<AppState>,
    AppJson(req): AppJson<AtsRequest>,
) -> Json<AtsReport> {
    let document = normalize(Some(&json!({ "resume": req.resume })));
    Json(state.scorer.score(&document.resume, &req.job_desc))
}
