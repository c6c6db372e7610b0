pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::feedback::handlers as feedback;
use crate::screening::handlers as screening;
use crate::state::AppState;

/// Screening uploads are size-checked while streaming (see `read_form`), so
/// those routes lift axum's blanket body limit; everything else keeps the default.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Screening API
        .route(
            "/api/v1/screenings",
            post(screening::handle_screen).layer(DefaultBodyLimit::disable()),
        )
        .route(
            "/api/v1/screenings/export",
            post(screening::handle_export).layer(DefaultBodyLimit::disable()),
        )
        // Feedback API
        .route(
            "/api/v1/feedback",
            get(feedback::handle_list_feedback).post(feedback::handle_submit_feedback),
        )
        .with_state(state)
}
