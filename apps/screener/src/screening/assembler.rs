//! Result assembler — joins per-resume derived fields into the ranked table.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::models::resume::{ContactInfo, ExperienceLevel, LengthCategory, Resume};
use crate::screening::contact::extract_contact_info;
use crate::screening::ranking::ResumeScore;

const MIN_GOOD_WORDS: usize = 300;
const MAX_GOOD_WORDS: usize = 1000;

pub const TOP_N: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankLabel {
    Excellent,
    Good,
    NeedsImprovement,
}

impl RankLabel {
    /// Excellent ≥ 80, Good ≥ 50, otherwise NeedsImprovement.
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            RankLabel::Excellent
        } else if score >= 50.0 {
            RankLabel::Good
        } else {
            RankLabel::NeedsImprovement
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RankLabel::Excellent => "Excellent",
            RankLabel::Good => "Good",
            RankLabel::NeedsImprovement => "Needs Improvement",
        }
    }

    fn explanation_phrase(self) -> &'static str {
        match self {
            RankLabel::Excellent => "Excellent match!",
            RankLabel::Good => "Good match.",
            RankLabel::NeedsImprovement => "Needs improvement.",
        }
    }
}

pub fn classify_length(word_count: usize) -> LengthCategory {
    if word_count < MIN_GOOD_WORDS {
        LengthCategory::TooShort
    } else if word_count > MAX_GOOD_WORDS {
        LengthCategory::TooLong
    } else {
        LengthCategory::Good
    }
}

/// Splits a comma-separated keyword list, trimming items and dropping blanks.
pub fn parse_keywords(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(String::from)
        .collect()
}

/// Counts keywords that appear (case-insensitive substring) in `text`.
pub fn count_keyword_matches(keywords: &[String], text: &str) -> usize {
    let text_lower = text.to_lowercase();
    keywords
        .iter()
        .filter(|k| text_lower.contains(&k.to_lowercase()))
        .count()
}

/// Human-readable explanation. Keywords feed this text only, never the score.
pub fn explain_score(score: f64, keywords: &[String], text: &str) -> String {
    if keywords.is_empty() {
        return "No keywords provided for evaluation.".to_string();
    }
    let matches = count_keyword_matches(keywords, text);
    format!(
        "{} Score: {score:.2}%. Found {matches} relevant keywords.",
        RankLabel::from_score(score).explanation_phrase()
    )
}

/// One row of the ranked table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreRecord {
    pub resume: String,
    pub score: f64,
    pub rank: RankLabel,
    pub length_feedback: LengthCategory,
    pub word_count: usize,
    #[serde(flatten)]
    pub contact: ContactInfo,
    pub explanation: String,
    pub experience_level: ExperienceLevel,
}

/// Ranked rows, highest score first. Ties keep upload order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultTable {
    rows: Vec<ScoreRecord>,
}

impl ResultTable {
    /// `scores[i]` must belong to `resumes[i]`.
    pub fn assemble(resumes: &[Resume], scores: &[ResumeScore], keywords: &[String]) -> Self {
        let mut rows: Vec<ScoreRecord> = resumes
            .iter()
            .zip(scores)
            .map(|(resume, s)| {
                let word_count = resume.word_count();
                ScoreRecord {
                    resume: resume.filename.clone(),
                    score: s.score,
                    rank: RankLabel::from_score(s.score),
                    length_feedback: classify_length(word_count),
                    word_count,
                    contact: extract_contact_info(&resume.text),
                    explanation: explain_score(s.score, keywords, &resume.text),
                    experience_level: s.experience_level,
                }
            })
            .collect();

        rows.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

        Self { rows }
    }

    pub fn rows(&self) -> &[ScoreRecord] {
        &self.rows
    }

    /// Rows at the given experience level, still in ranked order. `None` keeps all rows.
    pub fn filter_by_experience(&self, level: Option<ExperienceLevel>) -> Vec<ScoreRecord> {
        self.rows
            .iter()
            .filter(|r| level.map_or(true, |l| r.experience_level == l))
            .cloned()
            .collect()
    }

    pub fn top(&self, n: usize) -> &[ScoreRecord] {
        &self.rows[..n.min(self.rows.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(n: usize) -> String {
        vec!["word"; n].join(" ")
    }

    fn score(score: f64, experience_level: ExperienceLevel) -> ResumeScore {
        ResumeScore {
            base_similarity: score / 100.0 / experience_level.weight(),
            experience_level,
            score,
        }
    }

    #[test]
    fn test_rank_label_thresholds() {
        assert_eq!(RankLabel::from_score(80.0), RankLabel::Excellent);
        assert_eq!(RankLabel::from_score(79.99), RankLabel::Good);
        assert_eq!(RankLabel::from_score(50.0), RankLabel::Good);
        assert_eq!(RankLabel::from_score(49.99), RankLabel::NeedsImprovement);
        assert_eq!(RankLabel::from_score(135.0), RankLabel::Excellent);
    }

    #[test]
    fn test_length_feedback() {
        assert_eq!(classify_length(250), LengthCategory::TooShort);
        assert_eq!(classify_length(500), LengthCategory::Good);
        assert_eq!(classify_length(1200), LengthCategory::TooLong);
        assert_eq!(classify_length(300), LengthCategory::Good);
        assert_eq!(classify_length(1000), LengthCategory::Good);
    }

    #[test]
    fn test_length_from_resume_text() {
        assert_eq!(
            classify_length(Resume::new("a.pdf", words(250)).word_count()),
            LengthCategory::TooShort
        );
        assert_eq!(
            classify_length(Resume::new("b.pdf", words(1200)).word_count()),
            LengthCategory::TooLong
        );
    }

    #[test]
    fn test_parse_keywords_trims_and_drops_blanks() {
        assert_eq!(parse_keywords(" Rust , SQL,, docker ,"), vec!["Rust", "SQL", "docker"]);
        assert!(parse_keywords("").is_empty());
        assert!(parse_keywords(" , ").is_empty());
    }

    #[test]
    fn test_explanation_without_keywords() {
        assert_eq!(
            explain_score(91.0, &[], "anything"),
            "No keywords provided for evaluation."
        );
    }

    #[test]
    fn test_explanation_counts_case_insensitive_matches() {
        let keywords = parse_keywords("Rust, kubernetes, COBOL");
        let text = "Shipped RUST services on Kubernetes";
        assert_eq!(
            explain_score(85.5, &keywords, text),
            "Excellent match! Score: 85.50%. Found 2 relevant keywords."
        );
        assert_eq!(
            explain_score(12.0, &keywords, text),
            "Needs improvement. Score: 12.00%. Found 2 relevant keywords."
        );
    }

    #[test]
    fn test_assemble_sorts_descending_and_keeps_ties_in_order() {
        let resumes = vec![
            Resume::new("low.pdf", "x"),
            Resume::new("high.pdf", "y"),
            Resume::new("tie_a.pdf", "z"),
            Resume::new("tie_b.pdf", "w"),
        ];
        let scores = vec![
            score(10.0, ExperienceLevel::Unknown),
            score(90.0, ExperienceLevel::Senior),
            score(40.0, ExperienceLevel::Mid),
            score(40.0, ExperienceLevel::Mid),
        ];
        let table = ResultTable::assemble(&resumes, &scores, &[]);
        let order: Vec<&str> = table.rows().iter().map(|r| r.resume.as_str()).collect();
        assert_eq!(order, vec!["high.pdf", "tie_a.pdf", "tie_b.pdf", "low.pdf"]);
        assert_eq!(table.rows()[0].rank, RankLabel::Excellent);
    }

    #[test]
    fn test_filter_and_top_three() {
        let resumes: Vec<Resume> = (0..5)
            .map(|i| Resume::new(format!("r{i}.pdf"), "text"))
            .collect();
        let scores = vec![
            score(10.0, ExperienceLevel::Entry),
            score(70.0, ExperienceLevel::Senior),
            score(30.0, ExperienceLevel::Mid),
            score(90.0, ExperienceLevel::Senior),
            score(50.0, ExperienceLevel::Mid),
        ];
        let table = ResultTable::assemble(&resumes, &scores, &[]);

        let seniors = table.filter_by_experience(Some(ExperienceLevel::Senior));
        assert_eq!(seniors.len(), 2);
        assert_eq!(seniors[0].resume, "r3.pdf");
        assert_eq!(table.filter_by_experience(None).len(), 5);
        assert!(table
            .filter_by_experience(Some(ExperienceLevel::Unknown))
            .is_empty());

        let top: Vec<&str> = table.top(TOP_N).iter().map(|r| r.resume.as_str()).collect();
        assert_eq!(top, vec!["r3.pdf", "r1.pdf", "r4.pdf"]);
    }

    #[test]
    fn test_top_with_fewer_rows_than_requested() {
        let resumes = vec![Resume::new("only.pdf", "text")];
        let scores = vec![score(5.0, ExperienceLevel::Unknown)];
        let table = ResultTable::assemble(&resumes, &scores, &[]);
        assert_eq!(table.top(TOP_N).len(), 1);
    }

    #[test]
    fn test_contact_fields_flow_into_record() {
        let resumes = vec![Resume::new("c.pdf", "reach me at dev@example.com")];
        let scores = vec![score(5.0, ExperienceLevel::Unknown)];
        let table = ResultTable::assemble(&resumes, &scores, &[]);
        assert_eq!(table.rows()[0].contact.emails, vec!["dev@example.com"]);
    }
}
