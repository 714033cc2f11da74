//! Axum route handlers for the Analyze API.
//!
//! Two entry points run the same pipeline: multipart upload (extraction
//! included) and a JSON body for the manual paste fallback used when
//! extraction produced no text.

use axum::extract::{Multipart, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::analysis::ats::{self, AtsReport};
use crate::analysis::keywords::{keyword_overlap, role_match_score, KeywordOverlap};
use crate::analysis::skills::{flat_skills, skill_categories};
use crate::errors::AppError;
use crate::interview::questions::{generate_questions, QuestionSet};
use crate::sanitize::{sanitize, Policy};
use crate::state::AppState;

const TRANSCRIPT_PREVIEW_CHARS: usize = 900;
const SKILL_CHIP_LIMIT: usize = 20;
const SHORT_RESUME_CHARS: usize = 300;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct AnalyzeTextRequest {
    pub resume_text: String,
    pub jd_text: Option<String>,
    pub role: Option<String>,
    pub experience_level: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    /// False when extraction produced no text; the caller should offer the
    /// paste fallback (`POST /api/v1/analyze/text`).
    pub transcript_available: bool,
    /// Masked (PII-redacted) preview of the transcript, capped at 900 chars.
    pub transcript_preview: String,
    pub skills: Vec<String>,
    pub skill_categories: std::collections::BTreeMap<String, Vec<String>>,
    pub ats: AtsReport,
    pub questions: QuestionSet,
    pub keyword_overlap: Option<KeywordOverlap>,
    pub role_match: Option<f32>,
    pub hints: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/analyze
///
/// Multipart upload: `resume` file (required), optional `jd` file or
/// `jd_text` field, optional `role` and `experience_level` fields.
/// Extraction failure is not an error: the response carries
/// `transcript_available: false` and the caller offers manual paste.
pub async fn handle_analyze(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let mut resume: Option<(Vec<u8>, String)> = None;
    let mut jd: Option<(Vec<u8>, String)> = None;
    let mut jd_text: Option<String> = None;
    let mut role: Option<String> = None;
    let mut experience_level: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "resume" => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read resume: {e}")))?;
                resume = Some((data.to_vec(), filename));
            }
            "jd" => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read jd: {e}")))?;
                jd = Some((data.to_vec(), filename));
            }
            "jd_text" => {
                jd_text = Some(field.text().await.map_err(|e| {
                    AppError::Validation(format!("Failed to read jd_text: {e}"))
                })?);
            }
            "role" => {
                role = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| AppError::Validation(format!("Failed to read role: {e}")))?,
                );
            }
            "experience_level" => {
                experience_level = Some(field.text().await.map_err(|e| {
                    AppError::Validation(format!("Failed to read experience_level: {e}"))
                })?);
            }
            _ => {}
        }
    }

    let (resume_bytes, resume_name) = resume
        .ok_or_else(|| AppError::Validation("Missing required 'resume' file field".to_string()))?;

    let resume_text = state.extractor.extract(&resume_bytes, &resume_name);
    info!(
        "Extracted {} chars from '{}' ({} bytes)",
        resume_text.len(),
        resume_name,
        resume_bytes.len()
    );

    if resume_text.trim().is_empty() {
        return Ok(Json(empty_report()));
    }

    // A JD file takes precedence over inline jd_text when both are supplied.
    let jd_text = match jd {
        Some((bytes, name)) => {
            let extracted = state.extractor.extract(&bytes, &name);
            if extracted.trim().is_empty() {
                jd_text
            } else {
                Some(extracted)
            }
        }
        None => jd_text,
    };

    Ok(Json(run_analysis(
        &resume_text,
        jd_text.as_deref(),
        role.as_deref(),
        experience_level.as_deref(),
    )))
}

/// POST /api/v1/analyze/text
///
/// Manual paste fallback: same pipeline, no extraction step.
pub async fn handle_analyze_text(
    State(_state): State<AppState>,
    Json(request): Json<AnalyzeTextRequest>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    if request.resume_text.trim().is_empty() {
        return Err(AppError::Validation(
            "resume_text cannot be empty".to_string(),
        ));
    }

    Ok(Json(run_analysis(
        &request.resume_text,
        request.jd_text.as_deref(),
        request.role.as_deref(),
        request.experience_level.as_deref(),
    )))
}

// ────────────────────────────────────────────────────────────────────────────
// Pipeline assembly
// ────────────────────────────────────────────────────────────────────────────

/// Runs the full analysis pipeline over raw resume text.
pub fn run_analysis(
    resume_text: &str,
    jd_text: Option<&str>,
    role: Option<&str>,
    experience_level: Option<&str>,
) -> AnalyzeResponse {
    let sanitized = sanitize(resume_text, Policy::Strip);
    let masked = sanitize(resume_text, Policy::Mask);

    let skills = flat_skills(&sanitized, SKILL_CHIP_LIMIT);
    let categories = skill_categories(&sanitized)
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();
    let ats = ats::score(&sanitized, experience_level);
    let questions = generate_questions(&sanitized, role.unwrap_or_default());
    let overlap = jd_text
        .filter(|jd| !jd.trim().is_empty())
        .map(|jd| keyword_overlap(jd, &sanitized));
    let role_match = role
        .filter(|r| !r.trim().is_empty())
        .map(|r| role_match_score(&sanitized, r));

    let mut hints = Vec::new();
    if sanitized.chars().count() < SHORT_RESUME_CHARS {
        hints.push(
            "Resume text seems short; add more project details and outcomes.".to_string(),
        );
    }
    if !resume_text.to_lowercase().contains("linkedin") {
        hints.push("Consider adding a LinkedIn link in the contact section.".to_string());
    }
    if jd_text.is_none() {
        hints.push("Upload a job description to enable keyword matching.".to_string());
    }

    AnalyzeResponse {
        transcript_available: true,
        transcript_preview: preview(&masked, TRANSCRIPT_PREVIEW_CHARS),
        skills,
        skill_categories: categories,
        ats,
        questions,
        keyword_overlap: overlap,
        role_match,
        hints,
    }
}

/// The "no text available" response: a data condition, not an error.
fn empty_report() -> AnalyzeResponse {
    AnalyzeResponse {
        transcript_available: false,
        transcript_preview: String::new(),
        skills: Vec::new(),
        skill_categories: Default::default(),
        ats: ats::score("", None),
        questions: QuestionSet {
            hr: Vec::new(),
            resume_specific: Vec::new(),
            technical: Vec::new(),
        },
        keyword_overlap: None,
        role_match: None,
        hints: vec![
            "Could not extract text from the uploaded file. Paste your resume text via \
             /api/v1/analyze/text instead."
                .to_string(),
        ],
    }
}

fn preview(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max).collect();
        format!("{cut}…")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESUME: &str = "Built and deployed a recommendation engine using Python and AWS, improving click-through rate by 12%.\nContact: user@example.com, 555-123-4567\nLinkedIn: https://linkedin.com/in/someone";

    #[test]
    fn test_run_analysis_end_to_end() {
        let report = run_analysis(
            RESUME,
            Some("Looking for Python and Docker skills"),
            Some("data engineer"),
            None,
        );
        assert!(report.transcript_available);
        assert!(report.skills.contains(&"python".to_string()));
        assert!(report.skills.contains(&"aws".to_string()));
        assert!(report.skill_categories.contains_key("Programming"));
        assert!(report.skill_categories.contains_key("Cloud"));
        assert!(report.ats.breakdown.metrics_impact >= 1);
        assert!(report.ats.breakdown.experience_strength >= 5);

        let overlap = report.keyword_overlap.unwrap();
        assert!(overlap.covered.contains(&"python".to_string()));
        assert!(overlap.missing.contains(&"docker".to_string()));
    }

    #[test]
    fn test_transcript_preview_is_masked() {
        let report = run_analysis(RESUME, None, None, None);
        assert!(report.transcript_preview.contains("[EMAIL]"));
        assert!(!report.transcript_preview.contains("user@example.com"));
    }

    #[test]
    fn test_resume_specific_question_paraphrases_top_line() {
        let report = run_analysis(RESUME, None, None, None);
        assert!(report
            .questions
            .resume_specific
            .iter()
            .any(|q| q.contains("recommendation engine")));
    }

    #[test]
    fn test_no_jd_yields_no_overlap_and_a_hint() {
        let report = run_analysis(RESUME, None, None, None);
        assert!(report.keyword_overlap.is_none());
        assert!(report.hints.iter().any(|h| h.contains("job description")));
    }

    #[test]
    fn test_short_resume_hint() {
        let report = run_analysis("python", None, None, None);
        assert!(report.hints.iter().any(|h| h.contains("seems short")));
    }

    #[test]
    fn test_linkedin_hint_absent_when_linked() {
        let report = run_analysis(RESUME, None, None, None);
        assert!(!report.hints.iter().any(|h| h.contains("LinkedIn link")));
    }

    #[test]
    fn test_role_match_present_with_role() {
        let report = run_analysis(RESUME, None, Some("data engineer"), None);
        let score = report.role_match.unwrap();
        assert!((0.0..=1.0).contains(&score));
    }

    #[test]
    fn test_empty_report_shape() {
        let report = empty_report();
        assert!(!report.transcript_available);
        assert!(report.skills.is_empty());
        assert!(report.questions.hr.is_empty());
        assert_eq!(report.ats.breakdown.skills_relevance, 0);
    }
}
