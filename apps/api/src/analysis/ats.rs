//! ATS Scoring — pluggable scorer that rates a normalized resume for ATS friendliness.
//!
//! Default: `RuleBasedScorer` (fixed penalty table, deterministic, no I/O).
//!
//! `AppState` holds an `Arc<dyn ResumeScorer>`, swapped at startup.

use serde::{Deserialize, Serialize};

use crate::analysis::keywords::extract_keywords;
use crate::models::{OutputLanguage, Resume};

pub const MAX_SCORE: u32 = 100;
pub const MIN_SUMMARY_CHARS: usize = 50;
pub const MIN_SKILLS: usize = 5;
/// The job-match rule only runs when the job description is longer than this.
pub const JOB_DESC_THRESHOLD_CHARS: usize = 20;
pub const MIN_KEYWORD_MATCH_RATIO: f64 = 0.3;

// ────────────────────────────────────────────────────────────────────────────
// Output data models
// ────────────────────────────────────────────────────────────────────────────

/// One rule of the penalty table, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AtsRule {
    MissingName,
    MissingEmail,
    WeakSummary,
    NoExperience,
    FewSkills,
    WeakKeywordMatch,
}

impl AtsRule {
    pub fn penalty(self) -> u32 {
        match self {
            AtsRule::MissingName => 10,
            AtsRule::MissingEmail => 5,
            AtsRule::WeakSummary => 10,
            AtsRule::NoExperience => 20,
            AtsRule::FewSkills => 10,
            AtsRule::WeakKeywordMatch => 15,
        }
    }

    pub fn message(self, language: &OutputLanguage) -> &'static str {
        if language.is_arabic() {
            match self {
                AtsRule::MissingName => "الاسم الكامل مفقود",
                AtsRule::MissingEmail => "البريد الإلكتروني مفقود",
                AtsRule::WeakSummary => "الملخص قصير جداً أو مفقود",
                AtsRule::NoExperience => "لا توجد خبرات مسجلة",
                AtsRule::FewSkills => "المهارات المسجلة قليلة جداً",
                AtsRule::WeakKeywordMatch => "تطابق الكلمات المفتاحية ضعيف مع الوصف الوظيفي",
            }
        } else {
            match self {
                AtsRule::MissingName => "Full name is missing",
                AtsRule::MissingEmail => "Email address is missing",
                AtsRule::WeakSummary => "Summary is too short or missing",
                AtsRule::NoExperience => "No experience recorded",
                AtsRule::FewSkills => "Too few skills listed",
                AtsRule::WeakKeywordMatch => "Weak keyword match with the job description",
            }
        }
    }
}

/// Traffic-light bucket of a score, for the editor badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreLevel {
    Good,
    Warn,
    Bad,
}

impl ScoreLevel {
    pub fn from_score(score: u32) -> Self {
        match score {
            s if s >= 80 => ScoreLevel::Good,
            s if s >= 50 => ScoreLevel::Warn,
            _ => ScoreLevel::Bad,
        }
    }
}

/// How many job-description keywords appear somewhere in the resume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordMatch {
    pub matched: usize,
    pub total: usize,
    pub ratio: f64,
    pub missing: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtsReport {
    pub score: u32,
    pub level: ScoreLevel,
    /// One message per triggered rule, in rule order.
    pub warnings: Vec<String>,
    pub triggered: Vec<AtsRule>,
    /// Present only when the job description was long enough to compare against.
    pub keyword_match: Option<KeywordMatch>,
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Implement this to swap scoring backends without touching handlers or the CLI.
pub trait ResumeScorer: Send + Sync {
    fn score(&self, resume: &Resume, job_desc: &str) -> AtsReport;
}

/// Fixed-weight rule set:
///
/// | rule                             | penalty |
/// |----------------------------------|---------|
/// | name empty                       | 10      |
/// | email empty                      | 5       |
/// | summary under 50 chars           | 10      |
/// | no experience                    | 20      |
/// | core + tools skills under 5      | 10      |
/// | JD keyword match ratio under 0.3 | 15      |
pub struct RuleBasedScorer;

impl ResumeScorer for RuleBasedScorer {
    fn score(&self, resume: &Resume, job_desc: &str) -> AtsReport {
        compute_ats_report(resume, job_desc)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Core rule evaluation
// ────────────────────────────────────────────────────────────────────────────

pub fn compute_ats_report(resume: &Resume, job_desc: &str) -> AtsReport {
    let mut triggered = Vec::new();

    if resume.basics.name.is_empty() {
        triggered.push(AtsRule::MissingName);
    }
    if resume.basics.email.is_empty() {
        triggered.push(AtsRule::MissingEmail);
    }
    if resume.summary.chars().count() < MIN_SUMMARY_CHARS {
        triggered.push(AtsRule::WeakSummary);
    }
    if resume.experience.is_empty() {
        triggered.push(AtsRule::NoExperience);
    }
    if resume.skills.core.len() + resume.skills.tools.len() < MIN_SKILLS {
        triggered.push(AtsRule::FewSkills);
    }

    let keyword_match = (job_desc.chars().count() > JOB_DESC_THRESHOLD_CHARS)
        .then(|| match_keywords(resume, job_desc));
    if let Some(found) = &keyword_match {
        if found.ratio < MIN_KEYWORD_MATCH_RATIO {
            triggered.push(AtsRule::WeakKeywordMatch);
        }
    }

    let score = apply_penalties(triggered.iter().map(|rule| rule.penalty()));
    let warnings = triggered
        .iter()
        .map(|rule| rule.message(&resume.meta.language).to_string())
        .collect();

    AtsReport {
        score,
        level: ScoreLevel::from_score(score),
        warnings,
        triggered,
        keyword_match,
    }
}

/// Subtracts every penalty from `MAX_SCORE`, never going below zero.
pub fn apply_penalties(penalties: impl IntoIterator<Item = u32>) -> u32 {
    penalties
        .into_iter()
        .fold(MAX_SCORE, |score, penalty| score.saturating_sub(penalty))
}

/// Substring containment of each extracted JD keyword in the lowercased JSON of the
/// whole resume. Plain substring matching: "java" matches inside "javascript".
pub fn match_keywords(resume: &Resume, job_desc: &str) -> KeywordMatch {
    let keywords = extract_keywords(job_desc);
    let blob = serde_json::to_string(resume)
        .unwrap_or_default()
        .to_lowercase();

    let (found, missing): (Vec<String>, Vec<String>) = keywords
        .into_iter()
        .partition(|keyword| blob.contains(keyword.as_str()));

    let total = found.len() + missing.len();
    KeywordMatch {
        matched: found.len(),
        total,
        ratio: found.len() as f64 / total.max(1) as f64,
        missing,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
