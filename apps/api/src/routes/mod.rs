pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::scoring::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/score-resumes", post(handlers::handle_score_resumes))
        .route("/extract-criteria", post(handlers::handle_extract_criteria))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .with_state(state)
}
