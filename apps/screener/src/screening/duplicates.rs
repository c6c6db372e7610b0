use serde::{Deserialize, Serialize};

use crate::models::resume::Resume;
use crate::screening::tfidf::{TfIdfMatrix, VectorizeError};

/// Pairs scoring strictly above this are reported as duplicates.
pub const DEFAULT_DUPLICATE_THRESHOLD: f64 = 0.90;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DuplicatePair {
    pub first: String,
    pub second: String,
    pub similarity: f64,
}

/// Finds near-identical resumes within a batch.
///
/// Fits a fresh TF-IDF over the resumes alone (the job description is not part
/// of this corpus) and reports every pair `i < j` above `threshold` once, in
/// upload order. Advisory only: nothing is removed from the batch.
pub fn find_duplicates(
    resumes: &[Resume],
    threshold: f64,
) -> Result<Vec<DuplicatePair>, VectorizeError> {
    let texts: Vec<&str> = resumes.iter().map(|r| r.text.as_str()).collect();
    let matrix = TfIdfMatrix::fit(&texts)?;

    let mut pairs = Vec::new();
    for i in 0..resumes.len() {
        for j in (i + 1)..resumes.len() {
            let similarity = matrix.similarity(i, j);
            if similarity > threshold {
                pairs.push(DuplicatePair {
                    first: resumes[i].filename.clone(),
                    second: resumes[j].filename.clone(),
                    similarity,
                });
            }
        }
    }

    Ok(pairs)
}
