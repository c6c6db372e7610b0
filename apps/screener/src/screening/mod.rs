// Resume screening: field extraction, TF-IDF ranking, duplicate detection,
// result assembly and CSV export.

pub mod assembler;
pub mod contact;
pub mod duplicates;
pub mod experience;
pub mod export;
pub mod handlers;
pub mod pipeline;
pub mod ranking;
pub mod tfidf;
