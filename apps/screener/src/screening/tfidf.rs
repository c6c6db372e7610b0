//! TF-IDF vectorizer and cosine similarity.
//!
//! Mirrors the usual library defaults so scores line up with what a recruiter
//! would get from an off-the-shelf pipeline:
//! - lowercase, tokens are word runs of two or more characters
//! - raw term counts for tf
//! - smoothed idf: `ln((1 + n) / (1 + df)) + 1`
//! - every row L2-normalised
//!
//! Vocabulary is kept sorted so the matrix layout (and therefore every float
//! summation order) is identical across runs.

use std::collections::{BTreeMap, BTreeSet};

use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

lazy_static! {
    static ref TOKEN_RE: Regex = Regex::new(r"\b\w\w+\b").unwrap();
}

#[derive(Debug, Error, PartialEq)]
pub enum VectorizeError {
    #[error("no documents to vectorize")]
    EmptyCorpus,

    #[error("empty vocabulary: no document contains a usable term")]
    EmptyVocabulary,
}

pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    TOKEN_RE
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Document-term matrix produced by a single fit over a corpus.
#[derive(Debug, Clone)]
pub struct TfIdfMatrix {
    #[cfg(test)]
    vocabulary: Vec<String>,
    #[cfg(test)]
    idf: Vec<f64>,
    rows: Vec<Vec<f64>>,
}

impl TfIdfMatrix {
    pub fn fit<S: AsRef<str>>(documents: &[S]) -> Result<Self, VectorizeError> {
        if documents.is_empty() {
            return Err(VectorizeError::EmptyCorpus);
        }

        let counts: Vec<BTreeMap<String, usize>> = documents
            .iter()
            .map(|doc| {
                let mut tf = BTreeMap::new();
                for token in tokenize(doc.as_ref()) {
                    *tf.entry(token).or_insert(0) += 1;
                }
                tf
            })
            .collect();

        let vocabulary: Vec<String> = counts
            .iter()
            .flat_map(|tf| tf.keys().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        if vocabulary.is_empty() {
            return Err(VectorizeError::EmptyVocabulary);
        }

        let index: BTreeMap<&str, usize> = vocabulary
            .iter()
            .enumerate()
            .map(|(i, term)| (term.as_str(), i))
            .collect();

        let mut df = vec![0usize; vocabulary.len()];
        for tf in &counts {
            for term in tf.keys() {
                df[index[term.as_str()]] += 1;
            }
        }

        let n = documents.len() as f64;
        let idf: Vec<f64> = df
            .iter()
            .map(|&d| ((1.0 + n) / (1.0 + d as f64)).ln() + 1.0)
            .collect();

        let rows = counts
            .iter()
            .map(|tf| {
                let mut row = vec![0.0_f64; vocabulary.len()];
                for (term, &count) in tf {
                    let i = index[term.as_str()];
                    row[i] = count as f64 * idf[i];
                }
                l2_normalize(&mut row);
                row
            })
            .collect();

        Ok(Self {
            #[cfg(test)]
            vocabulary,
            #[cfg(test)]
            idf,
            rows,
        })
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[cfg(test)]
    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    #[cfg(test)]
    pub fn idf(&self) -> &[f64] {
        &self.idf
    }

    #[cfg(test)]
    pub fn row(&self, i: usize) -> &[f64] {
        &self.rows[i]
    }

    /// Cosine similarity between two fitted documents.
    pub fn similarity(&self, i: usize, j: usize) -> f64 {
        cosine_similarity(&self.rows[i], &self.rows[j])
    }
}

fn l2_normalize(row: &mut [f64]) {
    let norm = row.iter().map(|x| x * x).sum::<f64>().sqrt();
    if norm > 0.0 {
        for x in row.iter_mut() {
            *x /= norm;
        }
    }
}

/// Plain cosine similarity in [-1, 1]; zero when either vector is all zeros
/// or the lengths differ.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    if a.len() != b.len() {
        tracing::warn!(
            a_len = a.len(),
            b_len = b.len(),
            "vector dimension mismatch; returning zero similarity"
        );
        return 0.0;
    }

    let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f64>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a * norm_b)
}
