//! Error types for Chatline
//!
//! This module defines the failure taxonomy for provider exchanges and the
//! error type returned by session operations.

use std::fmt::Write as _;

use thiserror::Error;

/// Category of a failed exchange
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// DNS, connect, timeout or I/O failure before any HTTP response
    Transport,
    /// Non-2xx response from the provider
    Provider,
    /// 2xx response without usable completion text
    MalformedResponse,
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailureKind::Transport => write!(f, "transport_error"),
            FailureKind::Provider => write!(f, "provider_error"),
            FailureKind::MalformedResponse => write!(f, "malformed_response"),
        }
    }
}

/// A failed exchange with enough detail to render a diagnostic
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct Failure {
    pub kind: FailureKind,
    /// HTTP status, when a response was received
    pub status: Option<u16>,
    /// Provider error type (e.g. `invalid_api_key`), provider errors only
    pub error_type: Option<String>,
    pub message: String,
}

impl Failure {
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::Transport,
            status: None,
            error_type: None,
            message: message.into(),
        }
    }

    pub fn provider(status: u16, error_type: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::Provider,
            status: Some(status),
            error_type: Some(error_type.into()),
            message: message.into(),
        }
    }

    pub fn malformed(status: u16, message: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::MalformedResponse,
            status: Some(status),
            error_type: None,
            message: message.into(),
        }
    }

    /// Multi-line diagnostic for display to an end user
    pub fn render(&self) -> String {
        let mut out = format!("API Error: {}", self.message);
        if let Some(status) = self.status {
            let _ = write!(out, "\nStatus Code: {}", status);
            let _ = write!(
                out,
                "\nError Type: {}",
                self.error_type.as_deref().unwrap_or("unknown")
            );
        }
        out
    }
}

/// Errors returned by session operations
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("Completion failed: {0}")]
    Completion(#[from] Failure),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),
}

impl ChatError {
    /// The exchange failure, if this error came from one
    pub fn failure(&self) -> Option<&Failure> {
        match self {
            ChatError::Completion(failure) => Some(failure),
            ChatError::HttpClient(_) => None,
        }
    }

    /// Diagnostic text suitable for showing to a user
    pub fn render(&self) -> String {
        match self {
            ChatError::Completion(failure) => failure.render(),
            ChatError::HttpClient(e) => format!("HTTP client error: {}", e),
        }
    }
}

/// Result type alias for convenience
pub type ChatResult<T> = Result<T, ChatError>;
