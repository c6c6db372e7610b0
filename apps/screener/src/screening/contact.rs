use lazy_static::lazy_static;
use regex::Regex;

use crate::models::resume::ContactInfo;

lazy_static! {
    static ref EMAIL_RE: Regex =
        Regex::new(r"[a-zA-Z0-9_.+-]+@[a-zA-Z0-9-]+\.[a-zA-Z0-9-.]+").unwrap();
    static ref PHONE_RE: Regex =
        Regex::new(r"\+?\d{1,3}[-.\s]?\(?\d{1,4}\)?[-.\s]?\d{1,4}[-.\s]?\d{1,9}").unwrap();
}

/// Collects every email-like and phone-like substring, in order of appearance.
/// Duplicates and false positives are kept.
pub fn extract_contact_info(text: &str) -> ContactInfo {
    ContactInfo {
        emails: EMAIL_RE
            .find_iter(text)
            .map(|m| m.as_str().to_string())
            .collect(),
        phones: PHONE_RE
            .find_iter(text)
            .map(|m| m.as_str().to_string())
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_email_and_phone() {
        let info = extract_contact_info("Jane Doe | jane.doe+jobs@mail.example.com | +1 415-555-0134");
        assert_eq!(info.emails, vec!["jane.doe+jobs@mail.example.com"]);
        assert_eq!(info.phones, vec!["+1 415-555-0134"]);
    }

    #[test]
    fn test_keeps_duplicates_in_order() {
        let info = extract_contact_info("a@b.io then c@d.org then a@b.io");
        assert_eq!(info.emails, vec!["a@b.io", "c@d.org", "a@b.io"]);
    }

    #[test]
    fn test_no_contacts() {
        let info = extract_contact_info("Nothing to see here");
        assert!(info.emails.is_empty());
        assert!(info.phones.is_empty());
    }
}
