//! Keyword coverage against a job description, plus the simple role-match
//! ratio. Pure set arithmetic over lowercase word tokens.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::analysis::skills::{flat_skills, tokens};

/// Covered/missing keyword lists, each sorted and capped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordOverlap {
    pub covered: Vec<String>,
    pub missing: Vec<String>,
}

const OVERLAP_LIMIT: usize = 25;

/// Compares JD tokens against resume tokens. Both lists come back in sorted
/// order, truncated to the first 25 entries.
pub fn keyword_overlap(jd_text: &str, resume_text: &str) -> KeywordOverlap {
    let jd_tokens: BTreeSet<String> = tokens(jd_text).into_iter().collect();
    let resume_tokens: BTreeSet<String> = tokens(resume_text).into_iter().collect();

    let covered = jd_tokens
        .intersection(&resume_tokens)
        .take(OVERLAP_LIMIT)
        .cloned()
        .collect();
    let missing = jd_tokens
        .difference(&resume_tokens)
        .take(OVERLAP_LIMIT)
        .cloned()
        .collect();

    KeywordOverlap { covered, missing }
}

/// Conservative role-match ratio in [0, 1]:
/// 0.6 × (role tokens found in the resume) + 0.4 × min(1, skills / 5).
pub fn role_match_score(resume_text: &str, role: &str) -> f32 {
    if role.trim().is_empty() {
        return 0.0;
    }
    let role_tokens = tokens(role);
    if role_tokens.is_empty() {
        return 0.0;
    }
    let low = resume_text.to_lowercase();
    let matches = role_tokens.iter().filter(|t| low.contains(t.as_str())).count();
    let role_part = matches as f32 / role_tokens.len() as f32;

    let skill_count = flat_skills(resume_text, 20).len();
    let skill_part = (skill_count as f32 / 5.0).min(1.0);

    let score = 0.6 * role_part + 0.4 * skill_part;
    (score * 100.0).round() / 100.0
}
