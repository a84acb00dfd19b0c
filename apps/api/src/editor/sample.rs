//! The bundled demo document, loaded by "load sample".

use chrono::NaiveDate;
use serde_json::Value;
use tracing::warn;

use crate::editor::normalizer::normalize_at;
use crate::models::Document;

const SAMPLE_JSON: &str = include_str!("../../assets/sample_document.json");

/// The sample, normalized and stamped with `today`.
pub fn sample_document(today: NaiveDate) -> Document {
    match serde_json::from_str::<Value>(SAMPLE_JSON) {
        Ok(value) => normalize_at(Some(&value), today),
        Err(e) => {
            warn!("Bundled sample is not valid JSON, using an empty document: {e}");
            Document::empty(today)
        }
    }
}
