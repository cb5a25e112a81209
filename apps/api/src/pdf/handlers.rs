//! Axum route handlers for PDF extraction.

use axum::extract::Multipart;
use axum::Json;
use bytes::Bytes;
use tracing::info;

use crate::errors::AppError;
use crate::pdf::{extract_pdf, PdfError, PdfExtraction};

/// POST /api/v1/extract
///
/// Accepts a multipart form with a `file` field and returns the extracted
/// text plus stats. Extraction runs on the blocking pool: parsing a dense
/// PDF can take long enough to stall the async worker.
pub async fn handle_extract(mut multipart: Multipart) -> Result<Json<PdfExtraction>, AppError> {
    let mut file: Option<(Option<String>, Bytes)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(vec![format!("Malformed multipart upload: {e}")]))?
    {
        if field.name() == Some("file") {
            let content_type = field.content_type().map(str::to_string);
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::Validation(vec![format!("Failed to read upload: {e}")]))?;
            file = Some((content_type, data));
        }
    }

    let (content_type, data) = file.ok_or(PdfError::Missing)?;

    if content_type.as_deref() != Some("application/pdf") {
        return Err(PdfError::WrongMimeType.into());
    }

    let extraction =
        tokio::task::spawn_blocking(move || extract_pdf(&data))
            .await
            .map_err(|e| anyhow::anyhow!("pdf extraction task panicked: {e}"))??;

    info!(
        pages = extraction.pages,
        characters = extraction.characters,
        "pdf upload extracted"
    );

    Ok(Json(extraction))
}
