//! Axum route handlers for the Screening API.

use axum::{
    extract::{Multipart, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use bytes::BytesMut;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::Config;
use crate::errors::AppError;
use crate::extraction::UploadedDocument;
use crate::models::resume::{ExperienceLevel, Resume};
use crate::screening::assembler::{parse_keywords, ScoreRecord, TOP_N};
use crate::screening::duplicates::DuplicatePair;
use crate::screening::export::{to_csv, EXPORT_FILENAME};
use crate::screening::pipeline::{check_batch, oversized_file, screen};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// Fields collected from the multipart form.
#[derive(Debug, Default)]
pub struct ScreeningForm {
    pub job_description: String,
    pub job_title: Option<String>,
    pub keywords: Vec<String>,
    pub documents: Vec<UploadedDocument>,
}

#[derive(Debug, Deserialize)]
pub struct ScreeningQuery {
    /// entry | mid | senior | unknown | all
    pub experience_level: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ScreeningReport {
    pub screening_id: Uuid,
    pub job_title: Option<String>,
    pub total_resumes: usize,
    pub ranking_time_ms: f64,
    pub experience_filter: Option<ExperienceLevel>,
    /// Ranked rows, narrowed by `experience_filter` when given.
    pub results: Vec<ScoreRecord>,
    /// Top rows of the unfiltered table.
    pub top_three: Vec<ScoreRecord>,
    pub duplicates: Vec<DuplicatePair>,
    pub warnings: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/screenings
///
/// Ranks the uploaded resumes against the job description and returns the
/// full report as JSON.
pub async fn handle_screen(
    State(state): State<AppState>,
    Query(query): Query<ScreeningQuery>,
    multipart: Multipart,
) -> Result<Json<ScreeningReport>, AppError> {
    let filter = parse_experience_filter(query.experience_level.as_deref())?;
    let form = read_form(multipart, &state.config).await?;
    Ok(Json(run_screening_blocking(state, form, filter).await?))
}

/// POST /api/v1/screenings/export
///
/// Same input as `/api/v1/screenings`; responds with the ranked table as a
/// CSV download.
pub async fn handle_export(
    State(state): State<AppState>,
    Query(query): Query<ScreeningQuery>,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let filter = parse_experience_filter(query.experience_level.as_deref())?;
    let form = read_form(multipart, &state.config).await?;
    let report = run_screening_blocking(state, form, filter).await?;
    let csv = to_csv(&report.results)?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{EXPORT_FILENAME}\""),
            ),
        ],
        csv,
    ))
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

/// Extraction and both TF-IDF fits are CPU-bound; keep them off the async executor.
async fn run_screening_blocking(
    state: AppState,
    form: ScreeningForm,
    filter: Option<ExperienceLevel>,
) -> Result<ScreeningReport, AppError> {
    tokio::task::spawn_blocking(move || run_screening(&state, form, filter))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in screening: {e}")))?
}

fn run_screening(
    state: &AppState,
    form: ScreeningForm,
    filter: Option<ExperienceLevel>,
) -> Result<ScreeningReport, AppError> {
    if form.job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "job_description cannot be empty".to_string(),
        ));
    }

    let warnings = check_batch(&form.documents, &state.config)?;

    let screening_id = Uuid::new_v4();
    info!(
        %screening_id,
        resumes = form.documents.len(),
        keywords = form.keywords.len(),
        "starting screening run"
    );

    let resumes = form
        .documents
        .iter()
        .map(|doc| {
            state
                .extractor
                .extract(doc)
                .map(|text| Resume::new(doc.filename.clone(), text))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let outcome = screen(
        &form.job_description,
        &resumes,
        &form.keywords,
        state.config.duplicate_threshold,
    )?;

    Ok(ScreeningReport {
        screening_id,
        job_title: form.job_title,
        total_resumes: resumes.len(),
        ranking_time_ms: outcome.ranking_time_ms,
        experience_filter: filter,
        results: outcome.table.filter_by_experience(filter),
        top_three: outcome.table.top(TOP_N).to_vec(),
        duplicates: outcome.duplicates,
        warnings,
    })
}

/// Accepts the serialized names plus the display labels ("Senior", "Mid-level").
fn parse_experience_filter(raw: Option<&str>) -> Result<Option<ExperienceLevel>, AppError> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };
    match raw.to_lowercase().as_str() {
        "all" => Ok(None),
        "entry" | "entry-level" => Ok(Some(ExperienceLevel::Entry)),
        "mid" | "mid-level" => Ok(Some(ExperienceLevel::Mid)),
        "senior" => Ok(Some(ExperienceLevel::Senior)),
        "unknown" => Ok(Some(ExperienceLevel::Unknown)),
        other => Err(AppError::Validation(format!(
            "Unknown experience_level '{other}'; expected entry, mid, senior, unknown or all"
        ))),
    }
}

/// Streams every field, enforcing the per-file cap and the whole-request cap
/// as bytes arrive so an oversized upload is rejected by name.
async fn read_form(mut multipart: Multipart, config: &Config) -> Result<ScreeningForm, AppError> {
    let mut form = ScreeningForm::default();
    let request_limit = config.request_body_limit();
    let mut received = 0usize;

    while let Some(mut field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, None))?
    {
        let name = field.name().unwrap_or("").to_string();
        let filename = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let label = filename.clone().unwrap_or_else(|| name.clone());

        let mut buf = BytesMut::new();
        while let Some(chunk) = field
            .chunk()
            .await
            .map_err(|e| multipart_error(e, Some(&label)))?
        {
            received += chunk.len();
            buf.extend_from_slice(&chunk);

            if buf.len() > config.max_file_size_bytes {
                warn!(field = %label, limit = config.max_file_size_bytes, "oversized upload; discarding batch");
                return Err(oversized_file(&label, config.max_file_size_bytes));
            }
            if received > request_limit {
                warn!(field = %label, limit = request_limit, "request over size limit; discarding batch");
                return Err(AppError::PayloadTooLarge(format!(
                    "Upload exceeds the {request_limit} byte request limit (stopped while reading {label})."
                )));
            }
        }

        if let Some(filename) = filename {
            debug!(%filename, size = buf.len(), "received document");
            form.documents.push(UploadedDocument {
                filename,
                content_type,
                data: buf.freeze(),
            });
            continue;
        }

        let value = String::from_utf8(buf.to_vec())
            .map_err(|_| AppError::Validation(format!("Form field '{name}' is not valid UTF-8")))?;
        match name.as_str() {
            "job_description" => form.job_description = value,
            "job_title" => {
                let title = value.trim();
                form.job_title = (!title.is_empty()).then(|| title.to_string());
            }
            "keywords" => form.keywords = parse_keywords(&value),
            other => debug!(field = other, "ignoring unknown form field"),
        }
    }

    Ok(form)
}

fn multipart_error(e: axum::extract::multipart::MultipartError, field: Option<&str>) -> AppError {
    match (e.status(), field) {
        (StatusCode::PAYLOAD_TOO_LARGE, Some(field)) => {
            AppError::PayloadTooLarge(format!("{} (while reading {field})", e.body_text()))
        }
        (StatusCode::PAYLOAD_TOO_LARGE, None) => AppError::PayloadTooLarge(e.body_text()),
        _ => AppError::Validation(format!("Malformed multipart body: {}", e.body_text())),
    }
}
