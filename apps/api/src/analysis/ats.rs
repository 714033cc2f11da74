//! ATS compatibility scoring — six fixed-weight sub-scores summed into a
//! clamped 0–100 total, plus ordered improvement suggestions.
//!
//! Sub-scores and caps:
//! - formatting (20): 20 minus 2 per detected issue, subtraction capped at 8
//! - skills_relevance (20): 4 per matched lexicon category
//! - keyword_coverage (15): floor(1.5 × matched terms across categories)
//! - experience_strength (20): up to 10 from distinct action verbs, plus 5
//!   when the literal token "experience" appears
//! - metrics_impact (15): one per numeric/percentage token
//! - seniority_alignment: constant 10 — the experience level input is
//!   accepted but not yet scored (placeholder, see DESIGN.md)

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::analysis::skills::{skill_categories, tokens, total_matched_terms};
use crate::lexicon::{ACTION_VERBS, DECORATIVE_GLYPHS};

pub const FORMATTING_CAP: u32 = 20;
pub const SKILLS_CAP: u32 = 20;
pub const KEYWORDS_CAP: u32 = 15;
pub const EXPERIENCE_CAP: u32 = 20;
pub const METRICS_CAP: u32 = 15;
pub const SENIORITY_CONSTANT: u32 = 10;

const FORMATTING_PENALTY_CAP: u32 = 8;
const VERB_POINTS: u32 = 3;

// Suggestion thresholds: a dimension performing at or above its threshold
// produces no suggestion.
const SKILLS_THRESHOLD: u32 = 12;
const KEYWORDS_THRESHOLD: u32 = 8;
const EXPERIENCE_THRESHOLD: u32 = 10;
const METRICS_THRESHOLD: u32 = 5;

static METRIC_TOKEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+(?:\.\d+)?\s*%?").unwrap());
static TABLE_PIPE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\|[^|\n]*\|").unwrap());

/// The six named sub-scores.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub formatting: u32,
    pub skills_relevance: u32,
    pub keyword_coverage: u32,
    pub experience_strength: u32,
    pub metrics_impact: u32,
    pub seniority_alignment: u32,
}

impl ScoreBreakdown {
    pub fn sum(&self) -> u32 {
        self.formatting
            + self.skills_relevance
            + self.keyword_coverage
            + self.experience_strength
            + self.metrics_impact
            + self.seniority_alignment
    }
}

/// Full scoring result returned to callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtsReport {
    pub total: u32,
    pub breakdown: ScoreBreakdown,
    pub suggestions: Vec<String>,
}

/// Scores sanitized resume text. `experience_level` is accepted for API
/// stability but does not yet influence seniority_alignment.
pub fn score(text: &str, _experience_level: Option<&str>) -> AtsReport {
    let low = text.to_lowercase();
    let token_set: HashSet<String> = tokens(&low).into_iter().collect();

    let formatting_issues = detect_formatting_issues(text);
    let penalty = (2 * formatting_issues.len() as u32).min(FORMATTING_PENALTY_CAP);
    let formatting = FORMATTING_CAP - penalty;

    let categories = skill_categories(text);
    let skills_relevance = (4 * categories.len() as u32).min(SKILLS_CAP);

    let matched_terms = total_matched_terms(&categories) as f64;
    let keyword_coverage = ((1.5 * matched_terms).floor() as u32).min(KEYWORDS_CAP);

    let verb_count = ACTION_VERBS
        .iter()
        .filter(|v| token_set.contains(**v))
        .count() as u32;
    let mut experience_strength = (VERB_POINTS * verb_count).min(10);
    if token_set.contains("experience") {
        experience_strength += 5;
    }
    let experience_strength = experience_strength.min(EXPERIENCE_CAP);

    let metrics_impact = (METRIC_TOKEN_RE.find_iter(text).count() as u32).min(METRICS_CAP);

    let breakdown = ScoreBreakdown {
        formatting,
        skills_relevance,
        keyword_coverage,
        experience_strength,
        metrics_impact,
        seniority_alignment: SENIORITY_CONSTANT,
    };

    let total = breakdown.sum().min(100);
    let suggestions = build_suggestions(&breakdown, &formatting_issues);

    AtsReport {
        total,
        breakdown,
        suggestions,
    }
}

/// Detects layout constructs that commonly break ATS parsers. Each finding
/// becomes one issue string, reported verbatim in the suggestions.
fn detect_formatting_issues(text: &str) -> Vec<String> {
    let mut issues = Vec::new();
    for line in text.lines() {
        if TABLE_PIPE_RE.is_match(line) {
            issues.push(format!(
                "Table-like pipe layout may confuse ATS parsers: \"{}\"",
                truncate_chars(line.trim(), 60)
            ));
        }
    }
    for &glyph in DECORATIVE_GLYPHS {
        if text.contains(glyph) {
            issues.push(format!(
                "Decorative glyph '{glyph}' may not survive ATS text extraction"
            ));
        }
    }
    issues
}

/// Suggestions in fixed priority order, one per triggered condition.
fn build_suggestions(breakdown: &ScoreBreakdown, formatting_issues: &[String]) -> Vec<String> {
    let mut suggestions: Vec<String> = formatting_issues.to_vec();
    if breakdown.skills_relevance < SKILLS_THRESHOLD {
        suggestions.push("Add more role-relevant skills to strengthen your skills section.".into());
    }
    if breakdown.keyword_coverage < KEYWORDS_THRESHOLD {
        suggestions.push("Work recognized keywords into your bullet points.".into());
    }
    if breakdown.experience_strength < EXPERIENCE_THRESHOLD {
        suggestions
            .push("Lead bullets with action verbs and quantify what you delivered.".into());
    }
    if breakdown.metrics_impact < METRICS_THRESHOLD {
        suggestions.push("Add measurable outcomes: percentages, counts, or time saved.".into());
    }
    suggestions
}

fn truncate_chars(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        s.chars().take(max).collect()
    }
}
