//! Document text extraction.
//!
//! `AppState` holds an `Arc<dyn DocumentExtractor>`; the default handles PDF
//! via `pdf-extract` and passes plain text through.

use tracing::debug;

use crate::errors::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    PlainText,
}

impl DocumentKind {
    /// Resolves the kind from the part's content type, falling back to the
    /// filename extension when the client sent a generic or missing type.
    pub fn detect(content_type: Option<&str>, filename: &str) -> Option<Self> {
        let from_mime = content_type.and_then(|ct| {
            let essence = ct.split(';').next().unwrap_or("").trim();
            match essence {
                "application/pdf" => Some(DocumentKind::Pdf),
                "text/plain" => Some(DocumentKind::PlainText),
                _ => None,
            }
        });

        from_mime.or_else(|| {
            let lower = filename.to_lowercase();
            if lower.ends_with(".pdf") {
                Some(DocumentKind::Pdf)
            } else if lower.ends_with(".txt") {
                Some(DocumentKind::PlainText)
            } else {
                None
            }
        })
    }
}

/// An uploaded document before extraction.
#[derive(Debug, Clone)]
pub struct UploadedDocument {
    pub filename: String,
    pub content_type: Option<String>,
    pub data: bytes::Bytes,
}

impl UploadedDocument {
    pub fn size(&self) -> usize {
        self.data.len()
    }
}

/// Converts an uploaded document to plain text. A failure is fatal to the
/// whole screening run.
pub trait DocumentExtractor: Send + Sync {
    fn extract(&self, document: &UploadedDocument) -> Result<String, AppError>;
}

pub struct DefaultExtractor;

impl DocumentExtractor for DefaultExtractor {
    fn extract(&self, document: &UploadedDocument) -> Result<String, AppError> {
        let kind = DocumentKind::detect(document.content_type.as_deref(), &document.filename)
            .ok_or_else(|| {
                AppError::Extraction(format!(
                    "{}: unsupported document type {}",
                    document.filename,
                    document.content_type.as_deref().unwrap_or("(none)")
                ))
            })?;

        let text = match kind {
            DocumentKind::Pdf => extract_pdf(&document.data)
                .map_err(|e| AppError::Extraction(format!("{}: {e}", document.filename)))?,
            DocumentKind::PlainText => String::from_utf8(document.data.to_vec()).map_err(|e| {
                AppError::Extraction(format!("{}: not valid UTF-8 ({e})", document.filename))
            })?,
        };

        debug!(
            filename = %document.filename,
            kind = ?kind,
            chars = text.len(),
            "extracted document text"
        );
        Ok(text)
    }
}

/// pdf-extract panics on some malformed inputs instead of returning an error.
fn extract_pdf(data: &[u8]) -> Result<String, String> {
    match std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem(data)) {
        Ok(Ok(text)) => Ok(text),
        Ok(Err(e)) => Err(format!("{e:?}")),
        Err(_) => Err("PDF parser aborted on malformed input".to_string()),
    }
}
