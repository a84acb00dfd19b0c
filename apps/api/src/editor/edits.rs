//! Editor input — the bulk form sync and the per-item edits of the repeatable sections.
//!
//! Text arrives exactly as typed. Single-line fields are trimmed, comma fields become
//! lists (Latin or Arabic comma), multi-line fields become one bullet per non-empty line.

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::{
    Certification, CoverTone, Document, Education, Experience, IndexedList, LanguageSkill, Link,
    ListError, ListKind, OutputLanguage, Project, Resume, TemplateStyle,
};

// ────────────────────────────────────────────────────────────────────────────
// Text helpers
// ────────────────────────────────────────────────────────────────────────────

pub fn clean_text(value: &str) -> String {
    value.trim().to_string()
}

/// Splits on `,` and `،`, trimming items and dropping empty ones.
pub fn split_csv(value: &str) -> Vec<String> {
    value
        .split([',', '،'])
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// One entry per non-empty line.
pub fn split_lines(value: &str) -> Vec<String> {
    value
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

fn or_default(value: &str, default: &str) -> String {
    if value.is_empty() {
        default.to_string()
    } else {
        value.to_string()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Form sync
// ────────────────────────────────────────────────────────────────────────────

/// Every non-repeatable field of the editor form, as raw input strings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormInput {
    pub output_language: String,
    pub template_style: String,
    pub ats_strict_mode: bool,
    pub max_pages: u32,
    pub emphasis: String,
    pub anonymize: bool,
    pub keyword_strategy: String,
    pub include_photo: bool,

    pub job_desc: String,

    pub target_role: String,
    pub name: String,
    pub headline: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub summary: String,

    pub skills_core: String,
    pub skills_tools: String,
    pub skills_soft: String,
    pub skills_domains: String,

    pub cover_company: String,
    pub cover_role: String,
    pub cover_hiring_manager: String,
    pub cover_tone: String,
    pub cover_custom: String,
}

impl FormInput {
    /// Writes the form into `document`. Repeatable sections are left alone.
    pub fn apply_to(self, document: &mut Document) {
        let options = &mut document.options;
        options.output_language = OutputLanguage::from(or_default(&self.output_language, "ar"));
        options.template_style = TemplateStyle::from(or_default(&self.template_style, "clean"));
        options.ats_strict_mode = self.ats_strict_mode;
        options.max_pages = self.max_pages.max(1);
        options.emphasis = or_default(&self.emphasis, "experience");
        options.anonymize = self.anonymize;
        options.keyword_strategy = or_default(&self.keyword_strategy, "balanced");
        options.include_photo = self.include_photo;

        document.job_desc = self.job_desc;

        let resume = &mut document.resume;
        resume.meta.language = options.output_language.clone();
        resume.meta.target_role = clean_text(&self.target_role);

        resume.basics.name = clean_text(&self.name);
        resume.basics.headline = clean_text(&self.headline);
        resume.basics.email = clean_text(&self.email);
        resume.basics.phone = clean_text(&self.phone);
        resume.basics.location = clean_text(&self.location);
        resume.summary = clean_text(&self.summary);

        resume.skills.core = split_csv(&self.skills_core);
        resume.skills.tools = split_csv(&self.skills_tools);
        resume.skills.soft = split_csv(&self.skills_soft);
        resume.skills.domains = split_csv(&self.skills_domains);

        let letter = &mut resume.cover_letter;
        letter.company = clean_text(&self.cover_company);
        letter.role = clean_text(&self.cover_role);
        letter.hiring_manager = clean_text(&self.cover_hiring_manager);
        letter.tone = CoverTone::from(or_default(&self.cover_tone, "professional"));
        letter.custom = clean_text(&self.cover_custom);
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Per-item edits
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Up,
    Down,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "name", content = "value", rename_all = "camelCase")]
pub enum LinkField {
    Label(String),
    Url(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "name", content = "value", rename_all = "camelCase")]
pub enum ExperienceField {
    Company(String),
    Role(String),
    Location(String),
    StartDate(String),
    EndDate(String),
    /// Comma separated.
    Tech(String),
    /// One bullet per line.
    Highlights(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "name", content = "value", rename_all = "camelCase")]
pub enum ProjectField {
    Name(String),
    Link(String),
    Context(String),
    Tech(String),
    Highlights(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "name", content = "value", rename_all = "camelCase")]
pub enum EducationField {
    Institution(String),
    Degree(String),
    Field(String),
    StartDate(String),
    EndDate(String),
    Details(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "name", content = "value", rename_all = "camelCase")]
pub enum CertificationField {
    Name(String),
    Issuer(String),
    Date(String),
    Url(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "name", content = "value", rename_all = "camelCase")]
pub enum LanguageField {
    Name(String),
    Level(String),
}

/// One structural or field edit of a repeatable section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Edit {
    AddItem { list: ListKind },
    RemoveItem { list: ListKind, index: usize },
    MoveItem {
        list: ListKind,
        index: usize,
        direction: Direction,
    },
    SetLink { index: usize, field: LinkField },
    SetExperience {
        index: usize,
        field: ExperienceField,
    },
    SetProject { index: usize, field: ProjectField },
    SetEducation { index: usize, field: EducationField },
    SetCertification {
        index: usize,
        field: CertificationField,
    },
    SetLanguage { index: usize, field: LanguageField },
}

impl Edit {
    /// Applies the edit. An out-of-range index fails before anything changes.
    pub fn apply_to(self, resume: &mut Resume) -> Result<(), AppError> {
        match self {
            Edit::AddItem { list } => {
                add_item(resume, list);
                Ok(())
            }
            Edit::RemoveItem { list, index } => remove_item(resume, list, index),
            Edit::MoveItem {
                list,
                index,
                direction,
            } => move_item(resume, list, index, direction),
            Edit::SetLink { index, field } => {
                let link = item_mut(&mut resume.basics.links, ListKind::Links, index)?;
                match field {
                    LinkField::Label(v) => link.label = clean_text(&v),
                    LinkField::Url(v) => link.url = clean_text(&v),
                }
                Ok(())
            }
            Edit::SetExperience { index, field } => {
                let job = item_mut(&mut resume.experience, ListKind::Experience, index)?;
                match field {
                    ExperienceField::Company(v) => job.company = clean_text(&v),
                    ExperienceField::Role(v) => job.role = clean_text(&v),
                    ExperienceField::Location(v) => job.location = clean_text(&v),
                    ExperienceField::StartDate(v) => job.start_date = clean_text(&v),
                    ExperienceField::EndDate(v) => job.end_date = clean_text(&v),
                    ExperienceField::Tech(v) => job.tech = split_csv(&v),
                    ExperienceField::Highlights(v) => job.highlights = split_lines(&v),
                }
                Ok(())
            }
            Edit::SetProject { index, field } => {
                let project = item_mut(&mut resume.projects, ListKind::Projects, index)?;
                match field {
                    ProjectField::Name(v) => project.name = clean_text(&v),
                    ProjectField::Link(v) => project.link = clean_text(&v),
                    ProjectField::Context(v) => project.context = clean_text(&v),
                    ProjectField::Tech(v) => project.tech = split_csv(&v),
                    ProjectField::Highlights(v) => project.highlights = split_lines(&v),
                }
                Ok(())
            }
            Edit::SetEducation { index, field } => {
                let school = item_mut(&mut resume.education, ListKind::Education, index)?;
                match field {
                    EducationField::Institution(v) => school.institution = clean_text(&v),
                    EducationField::Degree(v) => school.degree = clean_text(&v),
                    EducationField::Field(v) => school.field = clean_text(&v),
                    EducationField::StartDate(v) => school.start_date = clean_text(&v),
                    EducationField::EndDate(v) => school.end_date = clean_text(&v),
                    EducationField::Details(v) => school.details = split_lines(&v),
                }
                Ok(())
            }
            Edit::SetCertification { index, field } => {
                let cert = item_mut(&mut resume.certifications, ListKind::Certifications, index)?;
                match field {
                    CertificationField::Name(v) => cert.name = clean_text(&v),
                    CertificationField::Issuer(v) => cert.issuer = clean_text(&v),
                    CertificationField::Date(v) => cert.date = clean_text(&v),
                    CertificationField::Url(v) => cert.url = clean_text(&v),
                }
                Ok(())
            }
            Edit::SetLanguage { index, field } => {
                let language = item_mut(&mut resume.languages, ListKind::Languages, index)?;
                match field {
                    LanguageField::Name(v) => language.name = clean_text(&v),
                    LanguageField::Level(v) => language.level = clean_text(&v),
                }
                Ok(())
            }
        }
    }
}

fn item_mut<T>(
    list: &mut IndexedList<T>,
    kind: ListKind,
    index: usize,
) -> Result<&mut T, AppError> {
    list.get_mut(index)
        .map_err(|e| AppError::index_out_of_range(kind, e))
}

fn add_item(resume: &mut Resume, list: ListKind) {
    match list {
        ListKind::Links => resume.basics.links.push(Link::default()),
        ListKind::Experience => resume.experience.push(Experience::default()),
        ListKind::Projects => resume.projects.push(Project::default()),
        ListKind::Education => resume.education.push(Education::default()),
        ListKind::Certifications => resume.certifications.push(Certification::default()),
        ListKind::Languages => resume.languages.push(LanguageSkill::default()),
    }
}

fn remove_item(resume: &mut Resume, list: ListKind, index: usize) -> Result<(), AppError> {
    let removed = match list {
        ListKind::Links => resume.basics.links.remove(index).map(drop),
        ListKind::Experience => resume.experience.remove(index).map(drop),
        ListKind::Projects => resume.projects.remove(index).map(drop),
        ListKind::Education => resume.education.remove(index).map(drop),
        ListKind::Certifications => resume.certifications.remove(index).map(drop),
        ListKind::Languages => resume.languages.remove(index).map(drop),
    };
    removed.map_err(|e| AppError::index_out_of_range(list, e))
}

fn move_item(
    resume: &mut Resume,
    list: ListKind,
    index: usize,
    direction: Direction,
) -> Result<(), AppError> {
    let moved = match list {
        ListKind::Links => shift(&mut resume.basics.links, index, direction),
        ListKind::Experience => shift(&mut resume.experience, index, direction),
        ListKind::Projects => shift(&mut resume.projects, index, direction),
        ListKind::Education => shift(&mut resume.education, index, direction),
        ListKind::Certifications => shift(&mut resume.certifications, index, direction),
        ListKind::Languages => shift(&mut resume.languages, index, direction),
    };
    moved.map_err(|e| AppError::index_out_of_range(list, e))
}

fn shift<T>(
    items: &mut IndexedList<T>,
    index: usize,
    direction: Direction,
) -> Result<(), ListError> {
    match direction {
        Direction::Up => items.move_up(index),
        Direction::Down => items.move_down(index),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    fn document() -> Document {
        Document::empty(NaiveDate::from_ymd_opt(2026, 10, 16).unwrap())
    }

    #[test]
    fn test_split_csv_handles_arabic_comma() {
        assert_eq!(
            split_csv(" Rust, Go ،Tokio,, ، "),
            vec!["Rust", "Go", "Tokio"]
        );
        assert!(split_csv("").is_empty());
    }

    #[test]
    fn test_split_lines_drops_blank_lines() {
        assert_eq!(
            split_lines("  Shipped v2\n\n  Cut costs 30%  \r\n"),
            vec!["Shipped v2", "Cut costs 30%"]
        );
    }

    #[test]
    fn test_form_applies_and_trims() {
        let mut doc = document();
        let form: FormInput = serde_json::from_value(json!({
            "outputLanguage": "en",
            "templateStyle": "modern",
            "atsStrictMode": true,
            "maxPages": 2,
            "jobDesc": "  Rust role  ",
            "name": "  Lina Haddad ",
            "skillsCore": "Rust, Go",
            "coverTone": "confident"
        }))
        .unwrap();
        form.apply_to(&mut doc);

        assert_eq!(doc.options.output_language, OutputLanguage::English);
        assert_eq!(doc.options.template_style, TemplateStyle::Modern);
        assert_eq!(doc.options.max_pages, 2);
        assert_eq!(doc.resume.meta.language, OutputLanguage::English);
        assert_eq!(doc.job_desc, "  Rust role  ");
        assert_eq!(doc.resume.basics.name, "Lina Haddad");
        assert_eq!(doc.resume.skills.core, vec!["Rust", "Go"]);
        assert_eq!(doc.resume.cover_letter.tone, CoverTone::Confident);
    }

    #[test]
    fn test_blank_form_falls_back_to_option_defaults() {
        let mut doc = document();
        FormInput::default().apply_to(&mut doc);
        assert_eq!(doc.options.output_language, OutputLanguage::Arabic);
        assert_eq!(doc.options.template_style, TemplateStyle::Clean);
        assert_eq!(doc.options.max_pages, 1);
        assert_eq!(doc.options.emphasis, "experience");
        assert_eq!(doc.options.keyword_strategy, "balanced");
        assert!(!doc.options.ats_strict_mode);
    }

    #[test]
    fn test_add_then_set_experience_fields() {
        let mut doc = document();
        Edit::AddItem {
            list: ListKind::Experience,
        }
        .apply_to(&mut doc.resume)
        .unwrap();

        let edit: Edit = serde_json::from_value(json!({
            "op": "set_experience",
            "index": 0,
            "field": {"name": "highlights", "value": "Led 6 engineers\n\nShipped SaaS"}
        }))
        .unwrap();
        edit.apply_to(&mut doc.resume).unwrap();
        Edit::SetExperience {
            index: 0,
            field: ExperienceField::Tech("Next.js، TypeScript".to_string()),
        }
        .apply_to(&mut doc.resume)
        .unwrap();

        let job = doc.resume.experience.get(0).unwrap();
        assert_eq!(job.highlights, vec!["Led 6 engineers", "Shipped SaaS"]);
        assert_eq!(job.tech, vec!["Next.js", "TypeScript"]);
    }

    #[test]
    fn test_set_on_missing_item_fails_closed() {
        let mut doc = document();
        let before = doc.clone();
        let err = Edit::SetLink {
            index: 0,
            field: LinkField::Url("https://x".to_string()),
        }
        .apply_to(&mut doc.resume)
        .unwrap_err();
        assert!(matches!(
            err,
            AppError::IndexOutOfRange {
                list: ListKind::Links,
                index: 0,
                len: 0
            }
        ));
        assert_eq!(doc, before);
    }

    #[test]
    fn test_remove_and_move() {
        let mut doc = document();
        for name in ["a", "b", "c"] {
            doc.resume.projects.push(Project {
                name: name.to_string(),
                ..Project::default()
            });
        }
        Edit::MoveItem {
            list: ListKind::Projects,
            index: 2,
            direction: Direction::Up,
        }
        .apply_to(&mut doc.resume)
        .unwrap();
        Edit::RemoveItem {
            list: ListKind::Projects,
            index: 0,
        }
        .apply_to(&mut doc.resume)
        .unwrap();

        let projects = &doc.resume.projects;
        let names: Vec<&str> = projects.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["c", "b"]);

        let err = Edit::RemoveItem {
            list: ListKind::Projects,
            index: 9,
        }
        .apply_to(&mut doc.resume);
        assert!(err.is_err());
        assert_eq!(doc.resume.projects.len(), 2);
    }

    #[test]
    fn test_edit_wire_format() {
        let edit: Edit = serde_json::from_value(json!({
            "op": "move_item", "list": "experience", "index": 1, "direction": "down"
        }))
        .unwrap();
        assert_eq!(
            edit,
            Edit::MoveItem {
                list: ListKind::Experience,
                index: 1,
                direction: Direction::Down
            }
        );
    }
}
