//! Axum route handlers for the Analysis API.

use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::Value;

use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    pub jd_text: String,
    pub mode: String,
}

/// POST /api/v1/analyze
///
/// Runs the full analysis pipeline and returns the validated payload with a
/// `_source` discriminator naming the provider that produced it.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<Value>, AppError> {
    let analysis = state.analyzer.analyze(&request.jd_text, &request.mode).await?;

    let mut body = analysis.payload;
    body.insert(
        "_source".to_string(),
        Value::String(analysis.source.as_str().to_string()),
    );

    Ok(Json(Value::Object(body)))
}
