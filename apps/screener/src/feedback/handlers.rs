use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::feedback::FeedbackEntry;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct FeedbackRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub feedback: String,
}

#[derive(Debug, Serialize)]
pub struct FeedbackResponse {
    pub entry: FeedbackEntry,
    pub total_entries: usize,
}

/// POST /api/v1/feedback
///
/// All three fields are required; blank submissions never reach the store.
pub async fn handle_submit_feedback(
    State(state): State<AppState>,
    Json(request): Json<FeedbackRequest>,
) -> Result<(StatusCode, Json<FeedbackResponse>), AppError> {
    let name = request.name.trim();
    let email = request.email.trim();
    let feedback = request.feedback.trim();

    if name.is_empty() || email.is_empty() || feedback.is_empty() {
        return Err(AppError::Validation(
            "Please fill in all fields (name, email, and feedback)".to_string(),
        ));
    }

    let entry = FeedbackEntry::now(name.to_string(), email.to_string(), feedback.to_string());
    let total_entries = state.feedback.append(entry.clone()).await?;

    Ok((
        StatusCode::CREATED,
        Json(FeedbackResponse {
            entry,
            total_entries,
        }),
    ))
}

/// GET /api/v1/feedback
pub async fn handle_list_feedback(
    State(state): State<AppState>,
) -> Result<Json<Vec<FeedbackEntry>>, AppError> {
    Ok(Json(state.feedback.list().await?))
}
