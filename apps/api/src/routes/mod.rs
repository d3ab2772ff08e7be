pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::dashboard::handlers as dashboard_handlers;
use crate::interview::handlers as interview_handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Interviewee wizard
        .route(
            "/api/v1/session",
            get(interview_handlers::handle_get_session).delete(interview_handlers::handle_reset),
        )
        .route(
            "/api/v1/session/resume",
            post(interview_handlers::handle_upload_resume),
        )
        .route(
            "/api/v1/session/chat",
            post(interview_handlers::handle_chat),
        )
        .route(
            "/api/v1/session/start",
            post(interview_handlers::handle_start),
        )
        .route(
            "/api/v1/session/answer",
            post(interview_handlers::handle_answer),
        )
        .route(
            "/api/v1/session/evaluate",
            post(interview_handlers::handle_evaluate),
        )
        // Interviewer dashboard (read-only)
        .route(
            "/api/v1/candidates",
            get(dashboard_handlers::handle_list_candidates),
        )
        .route(
            "/api/v1/candidates/:id",
            get(dashboard_handlers::handle_get_candidate),
        )
        .with_state(state)
}
