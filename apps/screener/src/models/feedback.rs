use serde::{Deserialize, Serialize};

/// Format of `FeedbackEntry::timestamp`, local time.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One persisted feedback submission. The store keeps these in insertion order
/// and never updates or deletes them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackEntry {
    pub name: String,
    pub email: String,
    pub feedback: String,
    pub timestamp: String,
}

impl FeedbackEntry {
    /// Stamps a submission with the current local time.
    pub fn now(name: String, email: String, feedback: String) -> Self {
        Self {
            name,
            email,
            feedback,
            timestamp: chrono::Local::now().format(TIMESTAMP_FORMAT).to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    #[test]
    fn test_timestamp_round_trips_through_format() {
        let entry = FeedbackEntry::now("Ada".into(), "ada@example.com".into(), "nice".into());
        assert_eq!(entry.timestamp.len(), 19);
        assert!(NaiveDateTime::parse_from_str(&entry.timestamp, TIMESTAMP_FORMAT).is_ok());
    }
}
