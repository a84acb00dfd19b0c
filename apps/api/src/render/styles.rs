// Shared stylesheet and bilingual labels for every preview mode.

use crate::models::{OutputLanguage, TemplateStyle};

pub const CLEAN_ACCENT: &str = "#2b3a52";
pub const MODERN_ACCENT: &str = "#3b82f6";
pub const MINIMAL_ACCENT: &str = "#111";

/// Embedded stylesheet. Replace `{accent}` before use.
pub const STYLESHEET_TEMPLATE: &str = r#"
    @import url('https://fonts.googleapis.com/css2?family=Cairo:wght@400;600;700&family=Inter:wght@400;600&display=swap');
    :root { --accent: {accent}; --text: #1f2937; --muted: #6b7280; --line: #e5e7eb; }
    body { font-family: 'Inter', 'Cairo', sans-serif; color: var(--text); padding: 0; margin: 0; background: #fff; line-height: 1.5; }
    a { text-decoration: none; color: var(--accent); }
    .page { max-width: 800px; margin: 0 auto; padding: 40px; }
    h1 { font-size: 28px; margin: 0; color: var(--accent); }
    h2 { font-size: 16px; text-transform: uppercase; letter-spacing: 1px; color: var(--accent); border-bottom: 2px solid var(--line); padding-bottom: 6px; margin: 24px 0 12px; }
    .job-title { font-size: 14px; font-weight: 600; margin-top: 4px; color: var(--muted); }
    .row { display: flex; justify-content: space-between; align-items: baseline; }
    .meta { font-size: 12px; color: var(--muted); }
    ul { padding-inline-start: 18px; margin: 6px 0; }
    li { margin-bottom: 4px; font-size: 13px; }
    .tag { display: inline-block; background: #f3f4f6; padding: 2px 8px; border-radius: 4px; font-size: 12px; margin: 2px; }
    .contact-line { font-size: 13px; margin-top: 8px; display: flex; gap: 12px; flex-wrap: wrap; color: var(--muted); }
    @media print { .page { padding: 0; margin: 20px; } body { -webkit-print-color-adjust: exact; } }
"#;

/// Accent color of a template. Unrecognized templates use the clean accent.
pub fn accent_color(style: &TemplateStyle) -> &'static str {
    match style {
        TemplateStyle::Modern => MODERN_ACCENT,
        TemplateStyle::Minimal => MINIMAL_ACCENT,
        TemplateStyle::Clean | TemplateStyle::Other(_) => CLEAN_ACCENT,
    }
}

pub fn stylesheet(style: &TemplateStyle) -> String {
    STYLESHEET_TEMPLATE.replace("{accent}", accent_color(style))
}

/// `lang` and `dir` attributes of the rendered page.
pub fn page_direction(language: &OutputLanguage) -> (&'static str, &'static str) {
    if language.is_arabic() {
        ("ar", "rtl")
    } else {
        ("en", "ltr")
    }
}

/// Section headings in the output language.
#[derive(Debug, Clone, Copy)]
pub struct Headings {
    pub summary: &'static str,
    pub experience: &'static str,
    pub projects: &'static str,
    pub skills: &'static str,
    pub education: &'static str,
}

impl Headings {
    pub fn for_language(language: &OutputLanguage) -> Self {
        if language.is_arabic() {
            Headings {
                summary: "الملخص المهني",
                experience: "الخبرة المهنية",
                projects: "المشاريع",
                skills: "المهارات",
                education: "التعليم",
            }
        } else {
            Headings {
                summary: "Summary",
                experience: "Experience",
                projects: "Projects",
                skills: "Skills",
                education: "Education",
            }
        }
    }
}
