//! PDF text extraction for uploaded job descriptions.
//!
//! The analysis core only ever consumes text; this module turns an uploaded
//! PDF into that text plus basic stats, with typed errors the HTTP layer
//! maps to caller-fixable responses. lopdf inspects document structure
//! (page count, encryption) and pdf-extract pulls the text.

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

pub mod handlers;

/// Upload size cap. Matches the dashboard's client-side limit.
pub const MAX_PDF_BYTES: usize = 5 * 1024 * 1024;

/// Below this many extracted characters the result is returned with a
/// scanned-document warning instead of being rejected outright.
const LOW_TEXT_THRESHOLD: usize = 50;

#[derive(Debug, Error)]
pub enum PdfError {
    #[error("No file provided")]
    Missing,

    #[error("File must be a PDF")]
    WrongMimeType,

    #[error("File is empty")]
    Empty,

    #[error("File size must be less than {} MB", MAX_PDF_BYTES / (1024 * 1024))]
    TooLarge,

    #[error("PDF is password-protected. Please remove the password and try again.")]
    PasswordProtected,

    #[error("PDF appears to be corrupted or invalid.")]
    Corrupted(String),

    #[error(
        "This appears to be a scanned PDF or contains only images. No selectable text was found."
    )]
    ScannedNoText,
}

/// Extracted text plus the stats the dashboard shows next to the upload.
#[derive(Debug, Clone, Serialize)]
pub struct PdfExtraction {
    pub text: String,
    pub pages: usize,
    pub characters: usize,
    pub words: usize,
    pub lines: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

/// Extracts text and stats from raw PDF bytes.
pub fn extract_pdf(bytes: &[u8]) -> Result<PdfExtraction, PdfError> {
    if bytes.is_empty() {
        return Err(PdfError::Empty);
    }
    if bytes.len() > MAX_PDF_BYTES {
        return Err(PdfError::TooLarge);
    }

    let document =
        lopdf::Document::load_mem(bytes).map_err(|e| PdfError::Corrupted(e.to_string()))?;

    if document.is_encrypted() {
        return Err(PdfError::PasswordProtected);
    }

    let pages = document.get_pages().len();

    let raw_text =
        pdf_extract::extract_text_from_mem(bytes).map_err(|e| PdfError::Corrupted(e.to_string()))?;

    let text = normalize_whitespace(&raw_text);
    if text.is_empty() {
        return Err(PdfError::ScannedNoText);
    }

    let characters = text.chars().count();
    let words = text.split_whitespace().count();
    let lines = text.lines().count();

    debug!(pages, characters, words, lines, "pdf text extracted");

    let warning = (characters < LOW_TEXT_THRESHOLD).then(|| {
        "Very little text found in PDF. This might be a scanned document.".to_string()
    });

    Ok(PdfExtraction {
        text,
        pages,
        characters,
        words,
        lines,
        warning,
    })
}

/// Collapses runs of horizontal whitespace to single spaces and drops blank
/// lines, keeping line structure intact.
fn normalize_whitespace(raw: &str) -> String {
    raw.lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_upload_rejected() {
        assert!(matches!(extract_pdf(&[]), Err(PdfError::Empty)));
    }

    #[test]
    fn test_oversized_upload_rejected() {
        let bytes = vec![0u8; MAX_PDF_BYTES + 1];
        assert!(matches!(extract_pdf(&bytes), Err(PdfError::TooLarge)));
    }

    #[test]
    fn test_non_pdf_bytes_are_corrupted() {
        let result = extract_pdf(b"this is definitely not a pdf document at all");
        assert!(matches!(result, Err(PdfError::Corrupted(_))));
    }

    #[test]
    fn test_normalize_whitespace_collapses_runs() {
        let raw = "Senior   Backend\t Engineer\n\n\n5+ years   experience\n";
        assert_eq!(
            normalize_whitespace(raw),
            "Senior Backend Engineer\n5+ years experience"
        );
    }

    #[test]
    fn test_normalize_whitespace_all_blank_is_empty() {
        assert_eq!(normalize_whitespace("  \n \t \n"), "");
    }
}
