//! Exchange outcome classification
//!
//! Maps an HTTP status and body to exactly one outcome. Classification is
//! total and deterministic: it never panics and never errors.

use serde::Deserialize;

use crate::conversation::response::extract_text;
use crate::error::{Failure, FailureKind};

/// Message used for every 2xx response that carries no completion text
pub const NO_CONTENT_MESSAGE: &str = "No content in response";

/// Placeholder used when a non-2xx response has no body at all
pub const NO_BODY_MESSAGE: &str = "No response body";

/// Result of one provider exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionResult {
    Text(String),
    Failure(Failure),
}

impl CompletionResult {
    pub fn is_text(&self) -> bool {
        matches!(self, CompletionResult::Text(_))
    }

    /// Failure kind, or `None` for text
    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            CompletionResult::Text(_) => None,
            CompletionResult::Failure(f) => Some(f.kind),
        }
    }

    pub fn into_result(self) -> Result<String, Failure> {
        match self {
            CompletionResult::Text(text) => Ok(text),
            CompletionResult::Failure(failure) => Err(failure),
        }
    }
}

impl From<Failure> for CompletionResult {
    fn from(failure: Failure) -> Self {
        CompletionResult::Failure(failure)
    }
}

/// Provider error envelope: `{"error": {"type": ..., "message": ...}}`
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: Option<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    #[serde(rename = "type")]
    error_type: Option<serde_json::Value>,
    message: Option<serde_json::Value>,
}

/// Render a JSON scalar the way a provider would print it
fn json_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Classify a received HTTP response
///
/// `body` is `None` when the body could not be read.
pub fn classify(status: u16, body: Option<&str>) -> CompletionResult {
    if !(200..300).contains(&status) {
        return classify_error(status, body).into();
    }

    match body.and_then(extract_text) {
        Some(text) => CompletionResult::Text(text),
        None => Failure::malformed(status, NO_CONTENT_MESSAGE).into(),
    }
}

/// Build a provider failure from a non-2xx response
///
/// Fields missing from the envelope fall back to type `"unknown"` and the
/// raw body as message.
fn classify_error(status: u16, body: Option<&str>) -> Failure {
    let raw = body.unwrap_or(NO_BODY_MESSAGE);
    let mut error_type = "unknown".to_string();
    let mut message = raw.to_string();

    if let Ok(ErrorEnvelope { error: Some(detail) }) = serde_json::from_str::<ErrorEnvelope>(raw) {
        if let Some(t) = detail.error_type.as_ref().filter(|v| !v.is_null()) {
            error_type = json_text(t);
        }
        if let Some(m) = detail.message.as_ref().filter(|v| !v.is_null()) {
            message = json_text(m);
        }
    }

    Failure::provider(status, error_type, message)
}
