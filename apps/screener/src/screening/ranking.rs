//! Ranking engine: job-description relevance weighted by experience level.
//!
//! Algorithm:
//! 1. Fit TF-IDF over `[job_description, resume_1, .., resume_n]`
//! 2. base = cosine(job_description, resume_i), in [0, 1]
//! 3. score = round(base × experience weight × 100, 2)
//!
//! The weighted score is intentionally left unclamped: a near-identical Senior
//! resume can score up to 150.

use serde::Serialize;

use crate::models::resume::{ExperienceLevel, Resume};
use crate::screening::experience::extract_experience;
use crate::screening::tfidf::{TfIdfMatrix, VectorizeError};

/// Score for one resume, in upload order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResumeScore {
    pub base_similarity: f64,
    pub experience_level: ExperienceLevel,
    /// Weighted score ×100, rounded to two decimals.
    pub score: f64,
}

/// Two decimals, ties to even.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

pub fn rank_resumes(
    job_description: &str,
    resumes: &[Resume],
) -> Result<Vec<ResumeScore>, VectorizeError> {
    if resumes.is_empty() {
        return Err(VectorizeError::EmptyCorpus);
    }

    let documents: Vec<&str> = std::iter::once(job_description)
        .chain(resumes.iter().map(|r| r.text.as_str()))
        .collect();
    let matrix = TfIdfMatrix::fit(&documents)?;

    let scores = resumes
        .iter()
        .enumerate()
        .map(|(i, resume)| {
            let base_similarity = matrix.similarity(0, i + 1);
            let experience_level = extract_experience(&resume.text);
            ResumeScore {
                base_similarity,
                experience_level,
                score: round2(base_similarity * experience_level.weight() * 100.0),
            }
        })
        .collect();

    Ok(scores)
}

#[cfg(test)]
mod tests {
    use super::*;

    const JD: &str = "Python developer with 3 years experience";

    fn resumes(texts: &[&str]) -> Vec<Resume> {
        texts
            .iter()
            .enumerate()
            .map(|(i, t)| Resume::new(format!("resume_{i}.pdf"), *t))
            .collect()
    }

    #[test]
    fn test_python_resume_beats_cooking_resume() {
        let batch = resumes(&[
            "Python developer, 6 years experience, strong Python skills",
            "Chef specialising in French pastry, sourdough baking and seasonal menus",
        ]);
        let scores = rank_resumes(JD, &batch).unwrap();

        assert_eq!(scores[0].experience_level, ExperienceLevel::Senior);
        assert!(scores[0].score > scores[1].score);
        assert!(scores[0].base_similarity > 0.3);
        assert_eq!(scores[1].score, 0.0);
    }

    #[test]
    fn test_senior_weighting_is_one_and_a_half() {
        let batch = resumes(&["Python developer, 6 years experience, strong Python skills"]);
        let s = &rank_resumes(JD, &batch).unwrap()[0];
        assert_eq!(s.score, round2(s.base_similarity * 150.0));
    }

    #[test]
    fn test_identical_resume_reaches_max_base_similarity() {
        let batch = resumes(&[JD, "gardening tips"]);
        let scores = rank_resumes(JD, &batch).unwrap();
        assert!((scores[0].base_similarity - 1.0).abs() < 1e-9);
        // "3 years" -> Mid, so the weighted score lands above 100.
        assert_eq!(scores[0].experience_level, ExperienceLevel::Mid);
        assert_eq!(scores[0].score, 120.0);
    }

    #[test]
    fn test_deterministic() {
        let batch = resumes(&[
            "Python and Django developer, 4 years",
            "Go developer, Kubernetes",
            "Python data engineer with Spark",
        ]);
        let a = rank_resumes(JD, &batch).unwrap();
        let b = rank_resumes(JD, &batch).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_monotonic_within_same_bucket() {
        // Neither mentions years, so both are Unknown and weighted 1.0.
        let batch = resumes(&[
            "Python developer with Python experience",
            "Python hobbyist who paints landscapes",
        ]);
        let scores = rank_resumes(JD, &batch).unwrap();
        assert_eq!(scores[0].experience_level, scores[1].experience_level);
        assert!(scores[0].base_similarity > scores[1].base_similarity);
        assert!(scores[0].score > scores[1].score);
    }

    #[test]
    fn test_no_resumes_is_an_error() {
        assert_eq!(rank_resumes(JD, &[]).unwrap_err(), VectorizeError::EmptyCorpus);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(12.3456), 12.35);
        assert_eq!(round2(0.0), 0.0);
    }

    #[test]
    fn test_round2_ties_go_to_even() {
        // 0.125 and 0.375 are exact in binary, so ×100 lands exactly on .5
        assert_eq!(round2(0.125), 0.12);
        assert_eq!(round2(0.375), 0.38);
        assert_eq!(round2(-0.125), -0.12);
    }
}
