use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::analysis::AnalysisError;
use crate::pdf::PdfError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Propagation policy: input problems are surfaced verbatim (the caller can
/// fix them); provider and pipeline failures are logged server-side and
/// translated to a generic message, never echoed.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error")]
    Validation(Vec<String>),

    #[error(transparent)]
    Pdf(#[from] PdfError),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, details) = match self {
            AppError::Validation(details) => (
                StatusCode::BAD_REQUEST,
                "Please provide a valid job description".to_string(),
                Some(details),
            ),
            AppError::Pdf(e) => (StatusCode::BAD_REQUEST, e.to_string(), None),
            AppError::Analysis(AnalysisError::Input(details)) => (
                StatusCode::BAD_REQUEST,
                "Please provide a valid job description".to_string(),
                Some(details),
            ),
            AppError::Analysis(AnalysisError::NotConfigured) => {
                tracing::error!("analysis requested but no provider is configured");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "No analysis provider configured. Set LOCAL_LLM_BASE_URL or GEMINI_API_KEY."
                        .to_string(),
                    None,
                )
            }
            AppError::Analysis(e) => {
                tracing::error!("analysis failed: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to generate analysis. Please try again with a different job description."
                        .to_string(),
                    None,
                )
            }
            AppError::Internal(e) => {
                tracing::error!("internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal server error occurred".to_string(),
                    None,
                )
            }
        };

        let body = match details {
            Some(details) => json!({ "error": message, "details": details }),
            None => json!({ "error": message }),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_errors_map_to_bad_request() {
        let response =
            AppError::Analysis(AnalysisError::Input(vec!["too short".to_string()])).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_pipeline_errors_map_to_server_error() {
        let response = AppError::Analysis(AnalysisError::NoJsonFound).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_pdf_errors_map_to_bad_request() {
        let response = AppError::Pdf(PdfError::WrongMimeType).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
