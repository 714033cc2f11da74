//! Lexical analysis — tokenization and lexicon matching over sanitized text.
//!
//! Matching rules:
//! - multi-word or symbol-bearing terms ("power bi", "c++") match by
//!   case-insensitive substring containment;
//! - plain single-word terms match by word boundary (token membership), so
//!   "power bi" never produces a spurious "power" hit.
//! - a term counts at most once per category regardless of repetition.

use std::collections::{BTreeMap, HashSet};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::lexicon::{COMMON_SKILLS, SKILL_CATEGORIES};
use crate::sanitize::{sanitize, Policy};

static WORD_TOKEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Za-z+#]{2,30}").unwrap());

/// Category label → matched lexicon terms. Categories with no hits are
/// absent.
pub type SkillCategories = BTreeMap<&'static str, Vec<String>>;

/// Lowercased word tokens in source order (2–30 chars, letters plus `+`/`#`).
pub fn tokens(text: &str) -> Vec<String> {
    WORD_TOKEN_RE
        .find_iter(text)
        .map(|m| m.as_str().to_lowercase())
        .collect()
}

/// Matches the categorized lexicon against already-sanitized text.
pub fn skill_categories(text: &str) -> SkillCategories {
    let low = text.to_lowercase();
    let token_set: HashSet<String> = tokens(&low).into_iter().collect();

    let mut result = SkillCategories::new();
    for &(category, terms) in SKILL_CATEGORIES {
        let mut matched = Vec::new();
        for &term in terms {
            if term_matches(&low, &token_set, term) {
                matched.push(term.to_string());
            }
        }
        if !matched.is_empty() {
            result.insert(category, matched);
        }
    }
    result
}

/// Total matched terms across all categories — feeds keyword coverage.
pub fn total_matched_terms(categories: &SkillCategories) -> usize {
    categories.values().map(Vec::len).sum()
}

/// Flat skill-chip extraction: sanitizes internally, scans the known
/// vocabulary first for precision, then falls back to generic alphabetic
/// tokens, skipping anything already collected. Output keeps first-found
/// order and is truncated to `limit`.
pub fn flat_skills(text: &str, limit: usize) -> Vec<String> {
    let t = sanitize(text, Policy::Strip);
    let low = t.to_lowercase();
    let token_set: HashSet<String> = tokens(&low).into_iter().collect();

    let mut found: Vec<String> = Vec::new();
    for &skill in COMMON_SKILLS {
        if found.len() >= limit {
            return found;
        }
        if term_matches(&low, &token_set, skill) && !found.iter().any(|f| f == skill) {
            found.push(skill.to_string());
        }
    }

    for tok in tokens(&low) {
        if found.len() >= limit {
            break;
        }
        if !found.contains(&tok) {
            found.push(tok);
        }
    }
    found
}

fn term_matches(low: &str, token_set: &HashSet<String>, term: &str) -> bool {
    let plain_word = term.chars().all(|c| c.is_ascii_alphanumeric());
    if plain_word {
        token_set.contains(term)
    } else {
        low.contains(term)
    }
}
