//! The editor session: the single owned copy of the current document and its store.
//!
//! Every successful mutation is persisted straight away. A failed save is logged and
//! reported in the returned `SaveOutcome`; the in-memory change is kept regardless.

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::analysis::ats::{AtsReport, ResumeScorer};
use crate::analysis::keywords::extract_keywords;
use crate::editor::edits::{Edit, FormInput};
use crate::editor::normalizer::normalize;
use crate::editor::sample::sample_document;
use crate::editor::store::DocumentStore;
use crate::errors::AppError;
use crate::models::Document;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SaveOutcome {
    pub saved: bool,
    pub save_error: Option<String>,
}

impl SaveOutcome {
    fn ok() -> Self {
        Self {
            saved: true,
            save_error: None,
        }
    }

    fn failed(message: String) -> Self {
        Self {
            saved: false,
            save_error: Some(message),
        }
    }
}

pub struct EditorSession {
    document: Document,
    store: Arc<dyn DocumentStore>,
}

impl EditorSession {
    /// Loads whatever the store holds. Anything unusable yields the default document.
    pub async fn open(store: Arc<dyn DocumentStore>) -> Self {
        let persisted = match store.load().await {
            Ok(value) => value,
            Err(e) => {
                warn!("Could not load stored document, starting from defaults: {e:#}");
                None
            }
        };
        if persisted.is_none() {
            info!("No stored document, starting from defaults");
        }
        let document = normalize(persisted.as_ref());
        Self { document, store }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn report(&self, scorer: &dyn ResumeScorer) -> AtsReport {
        scorer.score(&self.document.resume, &self.document.job_desc)
    }

    pub async fn apply_form(&mut self, input: FormInput) -> SaveOutcome {
        input.apply_to(&mut self.document);
        self.persist().await
    }

    pub async fn apply_edit(&mut self, edit: Edit) -> Result<SaveOutcome, AppError> {
        edit.apply_to(&mut self.document.resume)?;
        Ok(self.persist().await)
    }

    /// Replaces `meta.keywords` with the keywords of the job description.
    pub async fn extract_keywords(&mut self) -> Result<SaveOutcome, AppError> {
        if self.document.job_desc.trim().is_empty() {
            return Err(AppError::Validation(
                "Paste a job description before extracting keywords".to_string(),
            ));
        }
        let keywords = extract_keywords(&self.document.job_desc);
        info!(
            "Extracted {} keywords from the job description",
            keywords.len()
        );
        self.document.resume.meta.keywords = keywords;
        Ok(self.persist().await)
    }

    pub async fn reset(&mut self) -> SaveOutcome {
        self.document = Document::empty(Utc::now().date_naive());
        self.persist().await
    }

    pub async fn load_sample(&mut self) -> SaveOutcome {
        self.document = sample_document(Utc::now().date_naive());
        self.persist().await
    }

    /// Replaces the document with the normalized import. Malformed JSON changes nothing.
    pub async fn import_json(&mut self, text: &str) -> Result<SaveOutcome, AppError> {
        let value: Value = serde_json::from_str(text)
            .map_err(|e| AppError::Import(format!("Import file is not valid JSON: {e}")))?;
        self.document = normalize(Some(&value));
        info!(
            "Imported document for '{}'",
            self.document.resume.basics.name
        );
        Ok(self.persist().await)
    }

    pub async fn persist(&self) -> SaveOutcome {
        match self.store.save(&self.document).await {
            Ok(()) => SaveOutcome::ok(),
            Err(e) => {
                warn!("Failed to save document: {e:#}");
                SaveOutcome::failed(format!("{e:#}"))
            }
        }
    }
}
