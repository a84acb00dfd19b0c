//! Preview Renderer — pure function from a `Document` and a mode to a standalone HTML page.
//!
//! Every page embeds the shared stylesheet (with a print variant) and carries no script.
//! All user text goes through `escape_html`. Link targets are inserted verbatim.

pub mod cover;
pub mod escape;
pub mod export;
pub mod handlers;
pub mod resume;
pub mod styles;

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::models::Document;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PreviewMode {
    /// Plain resume for applicant tracking systems.
    Ats,
    /// Same layout, exported as the creative CV.
    Cv,
    Cover,
}

impl PreviewMode {
    #[cfg(test)]
    pub const ALL: [PreviewMode; 3] = [PreviewMode::Ats, PreviewMode::Cv, PreviewMode::Cover];

    pub fn as_str(self) -> &'static str {
        match self {
            PreviewMode::Ats => "ats",
            PreviewMode::Cv => "cv",
            PreviewMode::Cover => "cover",
        }
    }
}

impl fmt::Display for PreviewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PreviewMode {
    type Err = String;

    fn from_str(mode: &str) -> Result<Self, Self::Err> {
        match mode {
            "ats" => Ok(PreviewMode::Ats),
            "cv" => Ok(PreviewMode::Cv),
            "cover" => Ok(PreviewMode::Cover),
            other => Err(format!("unknown preview mode '{other}', use ats, cv or cover")),
        }
    }
}

/// Renders `document` in `mode`, dating cover letters with today's UTC date.
pub fn render(mode: PreviewMode, document: &Document) -> String {
    render_at(mode, document, Utc::now().date_naive())
}

pub fn render_at(mode: PreviewMode, document: &Document, today: NaiveDate) -> String {
    let body = match mode {
        PreviewMode::Ats | PreviewMode::Cv => resume::render_resume_body(document),
        PreviewMode::Cover => cover::render_cover_body(document, today),
    };
    wrap_page(document, &body)
}

fn wrap_page(document: &Document, body: &str) -> String {
    let (lang, dir) = styles::page_direction(&document.options.output_language);
    let css = styles::stylesheet(&document.options.template_style);
    format!(
        "<!doctype html><html lang=\"{lang}\" dir=\"{dir}\"><head><meta charset=\"utf-8\"><title>Preview</title><style>{css}</style></head><body><div class=\"page\">{body}</div></body></html>"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{OutputLanguage, TemplateStyle};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("ats".parse::<PreviewMode>(), Ok(PreviewMode::Ats));
        assert_eq!("cover".parse::<PreviewMode>(), Ok(PreviewMode::Cover));
        assert!("pdf".parse::<PreviewMode>().is_err());
        for mode in PreviewMode::ALL {
            assert_eq!(mode.to_string().parse::<PreviewMode>(), Ok(mode));
        }
    }

    #[test]
    fn test_page_is_self_contained() {
        let html = render_at(PreviewMode::Ats, &Document::empty(today()), today());
        assert!(html.starts_with("<!doctype html><html lang=\"ar\" dir=\"rtl\">"));
        assert!(html.contains("<style>"));
        assert!(html.contains("@media print"));
        assert!(!html.contains("<script"));
        assert!(html.ends_with("</div></body></html>"));
    }

    #[test]
    fn test_english_output_is_left_to_right() {
        let mut document = Document::empty(today());
        document.options.output_language = OutputLanguage::English;
        let html = render_at(PreviewMode::Cv, &document, today());
        assert!(html.contains("<html lang=\"en\" dir=\"ltr\">"));
    }

    #[test]
    fn test_script_in_name_is_escaped_in_every_mode() {
        let mut document = Document::empty(today());
        document.resume.basics.name = "<script>alert(1)</script>".to_string();
        for mode in PreviewMode::ALL {
            let html = render_at(mode, &document, today());
            assert!(!html.contains("<script>"), "{mode} leaked a script tag");
            assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        }
    }

    #[test]
    fn test_empty_experience_renders_no_heading() {
        let mut document = Document::empty(today());
        document.options.output_language = OutputLanguage::English;
        let html = render_at(PreviewMode::Ats, &document, today());
        assert!(!html.contains("Experience"));
    }

    #[test]
    fn test_unknown_template_falls_back_to_clean_accent() {
        let mut document = Document::empty(today());
        document.options.template_style = TemplateStyle::Other("retro".to_string());
        let html = render_at(PreviewMode::Ats, &document, today());
        assert!(html.contains("--accent: #2b3a52;"));
    }

    #[test]
    fn test_repeated_renders_do_not_interfere() {
        let document = Document::empty(today());
        let first = render_at(PreviewMode::Ats, &document, today());
        let _cover = render_at(PreviewMode::Cover, &document, today());
        assert_eq!(first, render_at(PreviewMode::Ats, &document, today()));
    }
}
