//! One screening run: batch preconditions, ranking, duplicate pass, table assembly.
//!
//! Everything here is a pure function of its inputs. Nothing is cached between runs.

use std::time::Instant;

use tracing::{info, warn};

use crate::config::Config;
use crate::errors::AppError;
use crate::extraction::UploadedDocument;
use crate::models::resume::Resume;
use crate::screening::assembler::ResultTable;
use crate::screening::duplicates::{find_duplicates, DuplicatePair};
use crate::screening::ranking::rank_resumes;

#[derive(Debug, Clone)]
pub struct ScreeningOutcome {
    pub table: ResultTable,
    pub duplicates: Vec<DuplicatePair>,
    pub ranking_time_ms: f64,
}

/// Checks size and count limits before any document is opened.
///
/// A single oversized file discards the whole batch. An over-long batch is
/// rejected when `enforce_batch_limit` is set, otherwise it is let through and
/// a warning is returned for the report.
pub fn check_batch(documents: &[UploadedDocument], config: &Config) -> Result<Vec<String>, AppError> {
    if documents.is_empty() {
        return Err(AppError::Validation(
            "Upload at least one resume".to_string(),
        ));
    }

    if let Some(doc) = documents
        .iter()
        .find(|d| d.size() > config.max_file_size_bytes)
    {
        warn!(
            filename = %doc.filename,
            size = doc.size(),
            limit = config.max_file_size_bytes,
            "oversized document; discarding batch"
        );
        return Err(oversized_file(&doc.filename, config.max_file_size_bytes));
    }

    let mut warnings = Vec::new();
    if documents.len() > config.max_batch_size {
        let message = format!(
            "You can upload a maximum of {} resumes at once ({} received).",
            config.max_batch_size,
            documents.len()
        );
        if config.enforce_batch_limit {
            return Err(AppError::Validation(message));
        }
        warn!(count = documents.len(), limit = config.max_batch_size, "batch over limit; continuing");
        warnings.push(message);
    }

    Ok(warnings)
}

pub fn oversized_file(filename: &str, limit: usize) -> AppError {
    AppError::PayloadTooLarge(format!(
        "File {filename} exceeds the {limit} byte size limit. Please upload a smaller file."
    ))
}

/// Ranks `resumes` against `job_description` and runs the duplicate pass.
pub fn screen(
    job_description: &str,
    resumes: &[Resume],
    keywords: &[String],
    duplicate_threshold: f64,
) -> Result<ScreeningOutcome, AppError> {
    let started = Instant::now();
    let scores = rank_resumes(job_description, resumes)?;
    let ranking_time_ms = started.elapsed().as_secs_f64() * 1000.0;

    let table = ResultTable::assemble(resumes, &scores, keywords);
    let duplicates = find_duplicates(resumes, duplicate_threshold)?;

    info!(
        resumes = resumes.len(),
        duplicates = duplicates.len(),
        top_score = table.rows().first().map(|r| r.score),
        ranking_time_ms,
        "screening run complete"
    );

    Ok(ScreeningOutcome {
        table,
        duplicates,
        ranking_time_ms,
    })
}
