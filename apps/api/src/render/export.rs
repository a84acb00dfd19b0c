//! Exporter — the JSON export and the "download all" bundle.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::Serialize;

use crate::models::Document;
use crate::render::{render_at, PreviewMode};

pub const HTML_MIME: &str = "text/html;charset=utf-8";
pub const JSON_MIME: &str = "application/json";

static NON_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\p{L}\p{N}]+").expect("file name pattern is valid"));

/// One file of an export, ready to be written or downloaded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportFile {
    pub filename: String,
    pub mime: &'static str,
    pub content: String,
}

/// File-system safe stem derived from the candidate's name.
pub fn filename_safe(name: &str) -> String {
    let lowered = name.to_lowercase();
    let stem = NON_NAME.replace_all(&lowered, "_");
    let stem = stem.trim_matches('_');
    if stem.is_empty() {
        "candidate".to_string()
    } else {
        stem.to_string()
    }
}

pub fn export_json(document: &Document) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(document)
}

/// Name of the single-file JSON export.
pub fn json_export_filename(document: &Document) -> String {
    let stem = filename_safe(&document.resume.basics.name);
    format!("resume_{stem}.json")
}

/// The ATS resume, the creative CV, the cover letter and the raw data, in that order.
pub fn export_bundle(
    document: &Document,
    today: NaiveDate,
) -> Result<Vec<ExportFile>, serde_json::Error> {
    let base = filename_safe(&document.resume.basics.name);
    let html = |suffix: &str, mode: PreviewMode| ExportFile {
        filename: format!("{base}_{suffix}.html"),
        mime: HTML_MIME,
        content: render_at(mode, document, today),
    };

    Ok(vec![
        html("ATS", PreviewMode::Ats),
        html("Creative", PreviewMode::Cv),
        html("CoverLetter", PreviewMode::Cover),
        ExportFile {
            filename: format!("{base}_data.json"),
            mime: JSON_MIME,
            content: export_json(document)?,
        },
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::normalizer::normalize_at;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    #[test]
    fn test_filename_safe() {
        assert_eq!(filename_safe("Lina  Haddad!"), "lina_haddad");
        assert_eq!(filename_safe("  __Jo-Ann O'Neil__ "), "jo_ann_o_neil");
        assert_eq!(filename_safe("سعود العتيبي"), "سعود_العتيبي");
        assert_eq!(filename_safe(""), "candidate");
        assert_eq!(filename_safe("!!!"), "candidate");
    }

    #[test]
    fn test_bundle_file_names_and_order() {
        let mut document = Document::empty(today());
        document.resume.basics.name = "Lina Haddad".to_string();
        let files = export_bundle(&document, today()).unwrap();
        let names: Vec<&str> = files.iter().map(|f| f.filename.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "lina_haddad_ATS.html",
                "lina_haddad_Creative.html",
                "lina_haddad_CoverLetter.html",
                "lina_haddad_data.json",
            ]
        );
        assert_eq!(files[3].mime, JSON_MIME);
        assert!(files[2].content.contains("Sincerely,"));
    }

    #[test]
    fn test_json_export_reimports_identically() {
        let mut document = Document::empty(today());
        document.resume.basics.name = "Lina".to_string();
        document.resume.skills.core = vec!["Rust".to_string()];
        let text = export_json(&document).unwrap();
        assert!(text.contains("\n  \"options\""));
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(normalize_at(Some(&value), today()), document);
        assert_eq!(json_export_filename(&document), "resume_lina.json");
    }
}
