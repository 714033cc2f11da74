pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::analysis::handlers as analysis_handlers;
use crate::interview::handlers as interview_handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Analyze API
        .route("/api/v1/analyze", post(analysis_handlers::handle_analyze))
        .route(
            "/api/v1/analyze/text",
            post(analysis_handlers::handle_analyze_text),
        )
        // Interview API
        .route(
            "/api/v1/interview/questions",
            post(interview_handlers::handle_questions),
        )
        .route(
            "/api/v1/interview/answer",
            post(interview_handlers::handle_answer),
        )
        .route(
            "/api/v1/interview/coach",
            post(interview_handlers::handle_coach),
        )
        .with_state(state)
}
