//! Experience-level classifier.
//!
//! Looks at the first "N years" style mention only. Multiple or conflicting
//! mentions are not reconciled.

use lazy_static::lazy_static;
use regex::Regex;

use crate::models::resume::ExperienceLevel;

lazy_static! {
    static ref YEARS_RE: Regex = Regex::new(
        r"(?i)(\d+\+?)\s*(?:years?|yrs?)|experience\s+of\s+(\d+)\s*(?:years?|yrs?)"
    )
    .unwrap();
    static ref DIGIT_RE: Regex = Regex::new(r"^\d$").unwrap();
}

/// Returns the year count from the first matching mention, if any.
pub fn extract_years(text: &str) -> Option<u64> {
    let caps = YEARS_RE.captures(text)?;
    let raw = caps.get(1).or_else(|| caps.get(2))?.as_str();
    let digits = raw.trim_end_matches('+');
    // `\d` matches any Unicode decimal digit; an overflowing count saturates.
    let years = digits.chars().try_fold(0u64, |acc, c| {
        acc.checked_mul(10)?.checked_add(u64::from(decimal_value(c)?))
    });
    Some(years.unwrap_or(u64::MAX))
}

/// Value of a Unicode decimal digit. Every script's digits are encoded as a
/// contiguous 0..=9 run, and adjacent runs are whole, so the offset from the
/// start of the run modulo 10 is the value.
fn decimal_value(c: char) -> Option<u32> {
    if let Some(d) = c.to_digit(10) {
        return Some(d);
    }
    if !is_decimal_digit(c) {
        return None;
    }
    let mut start = c as u32;
    while let Some(prev) = start.checked_sub(1).and_then(char::from_u32) {
        if !is_decimal_digit(prev) {
            break;
        }
        start -= 1;
    }
    Some((c as u32 - start) % 10)
}

fn is_decimal_digit(c: char) -> bool {
    let mut buf = [0u8; 4];
    DIGIT_RE.is_match(c.encode_utf8(&mut buf))
}

pub fn classify_years(years: u64) -> ExperienceLevel {
    match years {
        0..=1 => ExperienceLevel::Entry,
        2..=5 => ExperienceLevel::Mid,
        _ => ExperienceLevel::Senior,
    }
}

pub fn extract_experience(text: &str) -> ExperienceLevel {
    extract_years(text)
        .map(classify_years)
        .unwrap_or(ExperienceLevel::Unknown)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundaries() {
        assert_eq!(extract_experience("1 year of Rust"), ExperienceLevel::Entry);
        assert_eq!(extract_experience("2 years in ops"), ExperienceLevel::Mid);
        assert_eq!(extract_experience("5 years backend"), ExperienceLevel::Mid);
        assert_eq!(extract_experience("6 years backend"), ExperienceLevel::Senior);
    }

    #[test]
    fn test_no_mention_is_unknown() {
        assert_eq!(
            extract_experience("Seasoned engineer, loves distributed systems"),
            ExperienceLevel::Unknown
        );
    }

    #[test]
    fn test_plus_suffix_and_abbreviation() {
        assert_eq!(extract_years("5+ yrs Python"), Some(5));
        assert_eq!(extract_experience("10+ YEARS leading teams"), ExperienceLevel::Senior);
    }

    #[test]
    fn test_experience_of_phrase() {
        assert_eq!(extract_years("I bring experience of 3 years"), Some(3));
    }

    #[test]
    fn test_only_first_mention_counts() {
        assert_eq!(
            extract_experience("1 year at Acme, then 9 years at Initech"),
            ExperienceLevel::Entry
        );
    }

    #[test]
    fn test_zero_years_is_entry() {
        assert_eq!(extract_experience("0 years, fresh graduate"), ExperienceLevel::Entry);
    }

    #[test]
    fn test_non_ascii_digits_use_their_value() {
        // Arabic-Indic three
        assert_eq!(extract_years("\u{0663} years of backend work"), Some(3));
        assert_eq!(
            extract_experience("\u{0663} years of backend work"),
            ExperienceLevel::Mid
        );
        // Devanagari one, zero
        assert_eq!(extract_years("\u{0967}\u{0966} years"), Some(10));
        // Fullwidth one
        assert_eq!(extract_experience("\u{FF11} year"), ExperienceLevel::Entry);
    }

    #[test]
    fn test_decimal_value_in_adjacent_runs() {
        // Mathematical bold digits start a block of five consecutive 0..=9 runs.
        assert_eq!(decimal_value('\u{1D7CE}'), Some(0));
        assert_eq!(decimal_value('\u{1D7D7}'), Some(9));
        assert_eq!(decimal_value('\u{1D7D8}'), Some(0));
        assert_eq!(decimal_value('\u{1D7E1}'), Some(9));
        assert_eq!(decimal_value('x'), None);
    }

    #[test]
    fn test_overflowing_count_is_senior() {
        assert_eq!(
            extract_experience("99999999999999999999999 years"),
            ExperienceLevel::Senior
        );
    }
}
