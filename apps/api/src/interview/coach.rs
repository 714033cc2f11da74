//! Answer coach — quick 0–10 scoring of a user's own interview answer with
//! feedback and a STAR-template rewrite.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static METRIC_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d{1,3}%|\b\d+k?\b").unwrap());
static TOOL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(python|sql|tensorflow|pytorch|docker|aws|gcp|spark|react|node|java)\b").unwrap()
});

const SHORT_ANSWER_WORDS: usize = 30;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoachReport {
    pub score: u32,
    pub feedback: String,
    pub improved: String,
}

/// Scores an answer on length, numeric impact, and tool mentions.
/// Base 5; short answers lose a point, metrics add two, tool mentions add
/// one; clamped to [0, 10].
pub fn score_answer(answer: &str) -> CoachReport {
    let text = answer.trim();
    if text.is_empty() {
        return CoachReport {
            score: 0,
            feedback: "No answer provided.".to_string(),
            improved: String::new(),
        };
    }

    let mut score: i32 = 5;
    let mut feedback: Vec<&str> = Vec::new();

    if text.split_whitespace().count() < SHORT_ANSWER_WORDS {
        score -= 1;
        feedback.push("Short answer: add context and outcome.");
    }
    if METRIC_RE.is_match(text) {
        score += 2;
    } else {
        feedback.push("Add numeric impact if possible.");
    }
    if TOOL_RE.is_match(&text.to_lowercase()) {
        score += 1;
    } else {
        feedback.push("Mention the tools you used.");
    }

    let score = score.clamp(0, 10) as u32;
    let first_sentence: String = text
        .split('.')
        .next()
        .unwrap_or(text)
        .chars()
        .take(120)
        .collect();
    let improved = format!(
        "Situation: [context]. Task: [what]. Action: I used [tools] to {first_sentence}. Result: [metric]."
    );

    CoachReport {
        score,
        feedback: if feedback.is_empty() {
            "Good".to_string()
        } else {
            feedback.join(" ")
        },
        improved,
    }
}
