use serde::{Deserialize, Serialize};

/// Coarse seniority bucket derived from the first "N years" mention in a resume.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceLevel {
    Entry,
    Mid,
    Senior,
    #[default]
    Unknown,
}

impl ExperienceLevel {
    pub fn label(self) -> &'static str {
        match self {
            ExperienceLevel::Entry => "Entry-level",
            ExperienceLevel::Mid => "Mid-level",
            ExperienceLevel::Senior => "Senior",
            ExperienceLevel::Unknown => "Unknown",
        }
    }

    /// Multiplier applied to the base similarity when ranking.
    pub fn weight(self) -> f64 {
        match self {
            ExperienceLevel::Entry | ExperienceLevel::Unknown => 1.0,
            ExperienceLevel::Mid => 1.2,
            ExperienceLevel::Senior => 1.5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LengthCategory {
    TooShort,
    Good,
    TooLong,
}

impl LengthCategory {
    pub fn label(self) -> &'static str {
        match self {
            LengthCategory::TooShort => "Too short",
            LengthCategory::Good => "Good length",
            LengthCategory::TooLong => "Too long",
        }
    }
}

/// Contact strings pulled out of the resume text. Not validated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub emails: Vec<String>,
    pub phones: Vec<String>,
}

/// A single uploaded resume after text extraction.
#[derive(Debug, Clone, PartialEq)]
pub struct Resume {
    pub filename: String,
    pub text: String,
}

impl Resume {
    pub fn new(filename: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            text: text.into(),
        }
    }

    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }
}
