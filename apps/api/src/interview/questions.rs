//! Interview question synthesis from sanitized resume text.
//!
//! The three lists are shuffled with an RNG seeded from an FNV-1a 64 hash of
//! the input text: the same resume always yields the same ordering, different
//! resumes get effectively random orderings. Reproducibility, not security.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::analysis::skills::flat_skills;

const HR_LIMIT: usize = 3;
const RESUME_SPECIFIC_LIMIT: usize = 6;
const TECHNICAL_LIMIT: usize = 8;
const SKILL_QUESTION_LIMIT: usize = 12;
const LINE_PREVIEW_CHARS: usize = 100;

const HR_POOL: &[&str] = &[
    "Tell me about yourself.",
    "Why do you want this role?",
    "Describe a time you had a conflict at work and how you resolved it.",
];

/// The three categorized question lists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionSet {
    pub hr: Vec<String>,
    pub resume_specific: Vec<String>,
    pub technical: Vec<String>,
}

/// Builds question lists from sanitized resume text and an optional target
/// role. Deterministic for identical input text.
pub fn generate_questions(text: &str, role: &str) -> QuestionSet {
    let skills = flat_skills(text, 30);

    let mut resume_specific: Vec<String> = top_lines(text, RESUME_SPECIFIC_LIMIT)
        .into_iter()
        .map(|line| {
            format!(
                "Explain this project/responsibility: \"{}\"",
                preview(&line, LINE_PREVIEW_CHARS)
            )
        })
        .collect();

    let mut technical: Vec<String> = skills
        .iter()
        .take(SKILL_QUESTION_LIMIT)
        .map(|s| format!("Describe your experience with {s}."))
        .collect();
    if role.trim().len() > 2 {
        technical.push(format!(
            "What makes you a good fit for the {} role technically?",
            role.trim()
        ));
    }

    let mut hr: Vec<String> = HR_POOL.iter().map(|q| q.to_string()).collect();

    let mut rng = StdRng::seed_from_u64(fnv1a_64(text));
    hr.shuffle(&mut rng);
    resume_specific.shuffle(&mut rng);
    technical.shuffle(&mut rng);

    hr.truncate(HR_LIMIT);
    resume_specific.truncate(RESUME_SPECIFIC_LIMIT);
    technical.truncate(TECHNICAL_LIMIT);

    QuestionSet {
        hr,
        resume_specific,
        technical,
    }
}

/// The `n` longest non-blank lines, longest first; ties keep original order
/// (stable sort on descending length).
pub fn top_lines(text: &str, n: usize) -> Vec<String> {
    let mut lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();
    lines.sort_by_key(|l| std::cmp::Reverse(l.chars().count()));
    lines.into_iter().take(n).map(String::from).collect()
}

/// FNV-1a 64-bit. Fixed here (rather than the stdlib hasher) so question
/// ordering is stable across processes and releases.
pub fn fnv1a_64(text: &str) -> u64 {
    const OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;
    let mut hash = OFFSET;
    for byte in text.as_bytes() {
        hash ^= u64::from(*byte);
        hash = hash.wrapping_mul(PRIME);
    }
    hash
}

fn preview(line: &str, max: usize) -> String {
    if line.chars().count() <= max {
        line.to_string()
    } else {
        let cut: String = line.chars().take(max).collect();
        format!("{}…", cut.trim_end())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESUME: &str = "Built and deployed a recommendation engine using Python and AWS, improving click-through rate by 12%\nLed migration of batch pipelines to Docker\nMentored two junior engineers\nSQL reporting";

    #[test]
    fn test_same_text_same_ordering() {
        let a = generate_questions(RESUME, "data engineer");
        let b = generate_questions(RESUME, "data engineer");
        assert_eq!(a.hr, b.hr);
        assert_eq!(a.resume_specific, b.resume_specific);
        assert_eq!(a.technical, b.technical);
    }

    #[test]
    fn test_list_limits_respected() {
        let q = generate_questions(RESUME, "data engineer");
        assert!(q.hr.len() <= 3);
        assert!(q.resume_specific.len() <= 6);
        assert!(q.technical.len() <= 8);
    }

    #[test]
    fn test_resume_specific_wraps_longest_lines() {
        let q = generate_questions(RESUME, "");
        assert!(q
            .resume_specific
            .iter()
            .any(|s| s.starts_with("Explain this project/responsibility:")));
        assert!(q
            .resume_specific
            .iter()
            .any(|s| s.contains("recommendation engine")));
    }

    #[test]
    fn test_long_line_previews_truncated_with_ellipsis() {
        let long_line = "x".repeat(180);
        let q = generate_questions(&long_line, "");
        let wrapped = &q.resume_specific[0];
        assert!(wrapped.contains('…'));
        // 100 preview chars plus the wrapper text
        assert!(wrapped.chars().count() < 160);
    }

    #[test]
    fn test_technical_covers_detected_skills() {
        let q = generate_questions("python aws docker", "");
        assert!(q
            .technical
            .iter()
            .any(|s| s.contains("python")));
    }

    #[test]
    fn test_role_fit_question_requires_real_role() {
        let with_role = generate_questions("python", "ML engineer");
        let without = generate_questions("python", "ml");
        assert!(with_role.technical.iter().any(|s| s.contains("good fit")));
        assert!(!without.technical.iter().any(|s| s.contains("good fit")));
    }

    #[test]
    fn test_empty_text_yields_hr_only() {
        let q = generate_questions("", "");
        assert_eq!(q.hr.len(), 3);
        assert!(q.resume_specific.is_empty());
        assert!(q.technical.is_empty());
    }

    #[test]
    fn test_top_lines_longest_first_stable_ties() {
        let lines = top_lines("bb\naaaa\ncc\ndddd", 4);
        assert_eq!(lines, vec!["aaaa", "dddd", "bb", "cc"]);
    }

    #[test]
    fn test_fnv1a_known_vectors() {
        // Reference values for FNV-1a 64
        assert_eq!(fnv1a_64(""), 0xcbf2_9ce4_8422_2325);
        assert_eq!(fnv1a_64("a"), 0xaf63_dc4c_8601_ec8c);
    }

    #[test]
    fn test_different_text_different_seed() {
        assert_ne!(fnv1a_64("resume one"), fnv1a_64("resume two"));
    }
}
