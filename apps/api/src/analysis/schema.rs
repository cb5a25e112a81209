//! Mode-dependent structural validation of a parsed analysis payload.
//!
//! Required fields are a hard contract; the richer HR fields drift in and
//! out of model replies, so their absence is logged but never rejected.

use serde_json::{Map, Value};
use tracing::warn;

use crate::analysis::input::AnalysisMode;

const UNIVERSAL_FIELDS: &[&str] = &["skills", "codingTask", "questions"];
const DEV_FIELDS: &[&str] = &["skillGaps", "learningPath"];
const HR_OPTIONAL_FIELDS: &[&str] = &["salaryEstimation", "salaryAnalysis", "jdIntelligence"];

/// Checks the required top-level fields for `mode`, returning the names of
/// every missing field.
pub fn validate_schema(payload: &Map<String, Value>, mode: AnalysisMode) -> Result<(), Vec<String>> {
    let mut missing = Vec::new();

    for &field in UNIVERSAL_FIELDS {
        let ok = match (field, payload.get(field)) {
            // skills must be a non-empty list, not merely present
            ("skills", Some(Value::Array(skills))) => !skills.is_empty(),
            ("skills", _) => false,
            (_, Some(Value::Null)) | (_, None) => false,
            (_, Some(_)) => true,
        };
        if !ok {
            missing.push(field.to_string());
        }
    }

    if mode == AnalysisMode::Dev {
        for &field in DEV_FIELDS {
            match payload.get(field) {
                Some(Value::Null) | None => missing.push(field.to_string()),
                Some(_) => {}
            }
        }
    }

    if mode == AnalysisMode::Hr {
        for &field in HR_OPTIONAL_FIELDS {
            if matches!(payload.get(field), Some(Value::Null) | None) {
                warn!("analysis payload missing optional field `{field}`");
            }
        }
    }

    if missing.is_empty() {
        Ok(())
    } else {
        Err(missing)
    }
}
