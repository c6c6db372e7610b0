use anyhow::{Context, Result};

use crate::screening::assembler::ScoreRecord;

pub const EXPORT_FILENAME: &str = "ranked_resumes.csv";

const HEADER: [&str; 8] = [
    "Resume",
    "Score",
    "Rank",
    "Resume Length Feedback",
    "Email",
    "Phone",
    "Explanation",
    "Experience Level",
];

/// Serializes ranked rows to CSV, display labels throughout.
/// Multi-valued contact fields are joined with "; ".
pub fn to_csv(rows: &[ScoreRecord]) -> Result<String> {
    let mut writer = csv::WriterBuilder::new().from_writer(Vec::new());
    writer.write_record(HEADER)?;

    for row in rows {
        let score = format!("{:.2}", row.score);
        let emails = row.contact.emails.join("; ");
        let phones = row.contact.phones.join("; ");
        writer.write_record([
            row.resume.as_str(),
            score.as_str(),
            row.rank.label(),
            row.length_feedback.label(),
            emails.as_str(),
            phones.as_str(),
            row.explanation.as_str(),
            row.experience_level.label(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("flushing CSV writer: {}", e.error()))?;
    String::from_utf8(bytes).context("CSV output was not valid UTF-8")
}
