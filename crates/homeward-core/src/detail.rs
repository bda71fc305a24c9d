//! OCR recognition detail payloads.
//!
//! The recognizer reports its result as JSON; the best-scoring line sits
//! under `best` and is `null` when nothing was read.

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DetailError {
    #[error("invalid detail JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("no 'best' result in detail")]
    NoBest,
    #[error("best result has no text")]
    NoText,
}

#[derive(Debug, Deserialize)]
struct RecognitionDetail {
    #[serde(default)]
    best: Option<serde_json::Value>,
}

/// Extract the text of the best OCR result.
pub fn best_text(detail: &str) -> Result<String, DetailError> {
    let detail: RecognitionDetail = serde_json::from_str(detail)?;
    let best = detail.best.ok_or(DetailError::NoBest)?;
    best.get("text")
        .and_then(|t| t.as_str())
        .map(str::to_string)
        .ok_or(DetailError::NoText)
}

/// Whether the detail carries any recognized text.
pub fn has_text(detail: &str) -> bool {
    best_text(detail).is_ok()
}
