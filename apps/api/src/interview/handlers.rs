//! Axum route handlers for the Interview API.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::errors::AppError;
use crate::interview::answers::{generate_answer, scrub_placeholders};
use crate::interview::coach::{score_answer, CoachReport};
use crate::interview::questions::{generate_questions, QuestionSet};
use crate::sanitize::{sanitize, Policy};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct QuestionsRequest {
    pub resume_text: String,
    pub role: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
    pub question: String,
    pub resume_text: String,
    pub role: Option<String>,
    /// Request a generative rewrite of the heuristic answer. Ignored when no
    /// polisher is configured.
    pub polish: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct AnswerResponse {
    pub answer: String,
    /// True only when the generative rewrite actually happened.
    pub polished: bool,
}

#[derive(Debug, Deserialize)]
pub struct CoachRequest {
    pub answer: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/interview/questions
pub async fn handle_questions(
    State(_state): State<AppState>,
    Json(request): Json<QuestionsRequest>,
) -> Result<Json<QuestionSet>, AppError> {
    if request.resume_text.trim().is_empty() {
        return Err(AppError::Validation(
            "resume_text cannot be empty".to_string(),
        ));
    }

    let sanitized = sanitize(&request.resume_text, Policy::Strip);
    let questions = generate_questions(&sanitized, request.role.as_deref().unwrap_or_default());
    info!(
        "Generated {} hr / {} resume / {} technical questions",
        questions.hr.len(),
        questions.resume_specific.len(),
        questions.technical.len()
    );

    Ok(Json(questions))
}

/// POST /api/v1/interview/answer
///
/// Builds a deterministic heuristic answer; optionally rewrites it through
/// the configured polisher. Polish failures are never surfaced as errors —
/// the heuristic answer stands in.
pub async fn handle_answer(
    State(state): State<AppState>,
    Json(request): Json<AnswerRequest>,
) -> Result<Json<AnswerResponse>, AppError> {
    if request.question.trim().is_empty() {
        return Err(AppError::Validation("question cannot be empty".to_string()));
    }
    if request.resume_text.trim().is_empty() {
        return Err(AppError::Validation(
            "resume_text cannot be empty".to_string(),
        ));
    }

    let role = request.role.as_deref().unwrap_or_default();
    let heuristic = generate_answer(&request.question, &request.resume_text, role);

    let want_polish = request.polish.unwrap_or(false) && state.polisher.is_enabled();
    let (answer, polished) = if want_polish {
        match state.polisher.polish(&heuristic).await {
            Ok(text) if !text.trim().is_empty() => (text, true),
            Ok(_) => (heuristic, false),
            Err(e) => {
                warn!("Polish failed, falling back to heuristic answer: {e}");
                (heuristic, false)
            }
        }
    } else {
        (heuristic, false)
    };

    Ok(Json(AnswerResponse {
        answer: scrub_placeholders(&answer),
        polished,
    }))
}

/// POST /api/v1/interview/coach
pub async fn handle_coach(
    State(_state): State<AppState>,
    Json(request): Json<CoachRequest>,
) -> Result<Json<CoachReport>, AppError> {
    Ok(Json(score_answer(&request.answer)))
}
