//! The persisted editor document: render options, job description and the resume itself.
//!
//! Every record keeps unknown keys in a flattened `extra` map so documents written by a
//! newer schema survive a load/save cycle untouched.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::models::list::IndexedList;

/// Keys present in persisted JSON that this schema does not know about.
pub type Extra = Map<String, Value>;

// ────────────────────────────────────────────────────────────────────────────
// String-backed enums
// ────────────────────────────────────────────────────────────────────────────

/// Output language of rendered documents. Arabic renders right-to-left.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OutputLanguage {
    #[default]
    Arabic,
    English,
    Other(String),
}

impl OutputLanguage {
    pub fn code(&self) -> &str {
        match self {
            OutputLanguage::Arabic => "ar",
            OutputLanguage::English => "en",
            OutputLanguage::Other(code) => code,
        }
    }

    pub fn is_arabic(&self) -> bool {
        matches!(self, OutputLanguage::Arabic)
    }
}

impl From<String> for OutputLanguage {
    fn from(code: String) -> Self {
        match code.as_str() {
            "ar" => OutputLanguage::Arabic,
            "en" => OutputLanguage::English,
            _ => OutputLanguage::Other(code),
        }
    }
}

impl From<OutputLanguage> for String {
    fn from(lang: OutputLanguage) -> Self {
        lang.code().to_string()
    }
}

/// Visual template of the rendered resume. Unknown values are kept verbatim
/// and rendered with the clean template.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TemplateStyle {
    #[default]
    Clean,
    Modern,
    Minimal,
    Other(String),
}

impl TemplateStyle {
    pub fn as_str(&self) -> &str {
        match self {
            TemplateStyle::Clean => "clean",
            TemplateStyle::Modern => "modern",
            TemplateStyle::Minimal => "minimal",
            TemplateStyle::Other(style) => style,
        }
    }
}

impl From<String> for TemplateStyle {
    fn from(style: String) -> Self {
        match style.as_str() {
            "clean" => TemplateStyle::Clean,
            "modern" => TemplateStyle::Modern,
            "minimal" => TemplateStyle::Minimal,
            _ => TemplateStyle::Other(style),
        }
    }
}

impl From<TemplateStyle> for String {
    fn from(style: TemplateStyle) -> Self {
        style.as_str().to_string()
    }
}

/// Tone requested for the cover letter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CoverTone {
    #[default]
    Professional,
    Confident,
    Other(String),
}

impl CoverTone {
    pub fn as_str(&self) -> &str {
        match self {
            CoverTone::Professional => "professional",
            CoverTone::Confident => "confident",
            CoverTone::Other(tone) => tone,
        }
    }
}

impl From<String> for CoverTone {
    fn from(tone: String) -> Self {
        match tone.as_str() {
            "professional" => CoverTone::Professional,
            "confident" => CoverTone::Confident,
            _ => CoverTone::Other(tone),
        }
    }
}

impl From<CoverTone> for String {
    fn from(tone: CoverTone) -> Self {
        tone.as_str().to_string()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Document
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub options: Options,
    pub job_desc: String,
    pub resume: Resume,
    #[serde(flatten)]
    pub extra: Extra,
}

impl Document {
    /// The canonical empty document. `today` stamps `meta.lastUpdated`.
    pub fn empty(today: NaiveDate) -> Self {
        let mut resume = Resume::default();
        resume.meta.last_updated = today.format("%Y-%m-%d").to_string();
        Document {
            options: Options::default(),
            job_desc: String::new(),
            resume,
            extra: Extra::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Options {
    pub output_language: OutputLanguage,
    pub template_style: TemplateStyle,
    pub ats_strict_mode: bool,
    pub max_pages: u32,
    pub emphasis: String,
    pub anonymize: bool,
    pub keyword_strategy: String,
    pub include_photo: bool,
    #[serde(flatten)]
    pub extra: Extra,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            output_language: OutputLanguage::Arabic,
            template_style: TemplateStyle::Clean,
            ats_strict_mode: true,
            max_pages: 1,
            emphasis: "experience".to_string(),
            anonymize: false,
            keyword_strategy: "balanced".to_string(),
            include_photo: false,
            extra: Extra::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resume {
    pub meta: Meta,
    pub basics: Basics,
    pub summary: String,
    pub skills: Skills,
    pub experience: IndexedList<Experience>,
    pub projects: IndexedList<Project>,
    pub education: IndexedList<Education>,
    pub certifications: IndexedList<Certification>,
    pub languages: IndexedList<LanguageSkill>,
    pub cover_letter: CoverLetter,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meta {
    pub language: OutputLanguage,
    pub target_role: String,
    pub target_location: String,
    pub seniority: String,
    /// Ranked by relevance, most relevant first.
    pub keywords: Vec<String>,
    /// ISO date (`YYYY-MM-DD`).
    pub last_updated: String,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Basics {
    pub name: String,
    pub headline: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub links: IndexedList<Link>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    pub label: String,
    pub url: String,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skills {
    pub core: Vec<String>,
    pub tools: Vec<String>,
    pub soft: Vec<String>,
    pub domains: Vec<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    pub company: String,
    pub role: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    /// One bullet per element, in display order.
    pub highlights: Vec<String>,
    pub tech: Vec<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub name: String,
    pub link: String,
    pub context: String,
    pub highlights: Vec<String>,
    pub tech: Vec<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    pub institution: String,
    pub degree: String,
    pub field: String,
    pub start_date: String,
    pub end_date: String,
    pub details: Vec<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Certification {
    pub name: String,
    pub issuer: String,
    pub date: String,
    pub url: String,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageSkill {
    pub name: String,
    pub level: String,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverLetter {
    pub company: String,
    pub role: String,
    pub hiring_manager: String,
    pub tone: CoverTone,
    pub custom: String,
    #[serde(flatten)]
    pub extra: Extra,
}

// ────────────────────────────────────────────────────────────────────────────
// Repeatable sections
// ────────────────────────────────────────────────────────────────────────────

/// The repeatable record lists of a resume, addressed by the editor shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListKind {
    Links,
    Experience,
    Projects,
    Education,
    Certifications,
    Languages,
}

impl ListKind {
    pub const ALL: [ListKind; 6] = [
        ListKind::Links,
        ListKind::Experience,
        ListKind::Projects,
        ListKind::Education,
        ListKind::Certifications,
        ListKind::Languages,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ListKind::Links => "links",
            ListKind::Experience => "experience",
            ListKind::Projects => "projects",
            ListKind::Education => "education",
            ListKind::Certifications => "certifications",
            ListKind::Languages => "languages",
        }
    }

    /// JSON path of the list inside a serialized `Document`.
    pub fn path(self) -> &'static [&'static str] {
        match self {
            ListKind::Links => &["resume", "basics", "links"],
            ListKind::Experience => &["resume", "experience"],
            ListKind::Projects => &["resume", "projects"],
            ListKind::Education => &["resume", "education"],
            ListKind::Certifications => &["resume", "certifications"],
            ListKind::Languages => &["resume", "languages"],
        }
    }

    /// Entry fields that hold string lists.
    pub fn string_list_fields(self) -> &'static [&'static str] {
        match self {
            ListKind::Experience | ListKind::Projects => &["highlights", "tech"],
            ListKind::Education => &["details"],
            ListKind::Links | ListKind::Certifications | ListKind::Languages => &[],
        }
    }

    /// The shape of a freshly added entry, as JSON.
    pub fn entry_template(self) -> Value {
        let template = match self {
            ListKind::Links => serde_json::to_value(Link::default()),
            ListKind::Experience => serde_json::to_value(Experience::default()),
            ListKind::Projects => serde_json::to_value(Project::default()),
            ListKind::Education => serde_json::to_value(Education::default()),
            ListKind::Certifications => serde_json::to_value(Certification::default()),
            ListKind::Languages => serde_json::to_value(LanguageSkill::default()),
        };
        template.unwrap_or_default()
    }
}

impl fmt::Display for ListKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 14).unwrap()
    }

    #[test]
    fn test_empty_document_wire_names_are_camel_case() {
        let value = serde_json::to_value(Document::empty(today())).unwrap();
        assert_eq!(value["jobDesc"], "");
        assert_eq!(value["options"]["outputLanguage"], "ar");
        assert_eq!(value["options"]["templateStyle"], "clean");
        assert_eq!(value["options"]["atsStrictMode"], true);
        assert_eq!(value["options"]["maxPages"], 1);
        assert_eq!(value["resume"]["meta"]["lastUpdated"], "2026-03-14");
        assert_eq!(value["resume"]["coverLetter"]["tone"], "professional");
        assert_eq!(value["resume"]["basics"]["links"], json!([]));
    }

    #[test]
    fn test_unknown_template_style_round_trips() {
        let style: TemplateStyle = serde_json::from_str(r#""retro""#).unwrap();
        assert_eq!(style, TemplateStyle::Other("retro".to_string()));
        assert_eq!(serde_json::to_string(&style).unwrap(), r#""retro""#);
    }

    #[test]
    fn test_output_language_codes() {
        assert!(OutputLanguage::from("ar".to_string()).is_arabic());
        assert_eq!(
            OutputLanguage::from("en".to_string()),
            OutputLanguage::English
        );
        assert_eq!(OutputLanguage::from("fr".to_string()).code(), "fr");
    }

    #[test]
    fn test_extra_keys_survive_round_trip() {
        let link: Link =
            serde_json::from_value(json!({"label": "GitHub", "url": "https://x", "icon": "gh"}))
                .unwrap();
        assert_eq!(link.extra.get("icon"), Some(&json!("gh")));
        let back = serde_json::to_value(&link).unwrap();
        assert_eq!(back["icon"], "gh");
    }

    #[test]
    fn test_entry_templates_are_objects() {
        for kind in ListKind::ALL {
            let template = kind.entry_template();
            assert!(template.is_object(), "{} template", kind.as_str());
            for field in kind.string_list_fields() {
                assert_eq!(template[*field], json!([]));
            }
        }
    }
}
