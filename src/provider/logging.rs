//! Exchange logging
//!
//! Structured logging with a short correlation id so every line emitted for
//! one provider exchange can be grouped together.

use std::time::Instant;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::error::{Failure, FailureKind};

/// Context for tracking one exchange with the provider
#[derive(Debug, Clone)]
pub struct ExchangeContext {
    /// Short identifier for log correlation
    pub trace_id: String,
    pub start_time: Instant,
    /// Name of the transport carrying the exchange
    pub transport: &'static str,
    /// Provider endpoint URL
    pub endpoint: String,
    pub model: String,
    /// Number of turns replayed in the request
    pub turns: usize,
}

impl ExchangeContext {
    pub fn new(transport: &'static str, endpoint: &str, model: &str, turns: usize) -> Self {
        Self {
            trace_id: Uuid::new_v4().to_string()[..8].to_string(),
            start_time: Instant::now(),
            transport,
            endpoint: endpoint.to_string(),
            model: model.to_string(),
            turns,
        }
    }

    pub fn elapsed_ms(&self) -> u128 {
        self.start_time.elapsed().as_millis()
    }

    pub fn log_start(&self, body_size: usize) {
        debug!(
            trace_id = %self.trace_id,
            transport = %self.transport,
            endpoint = %self.endpoint,
            model = %self.model,
            turns = %self.turns,
            body_size = %body_size,
            "Sending completion request"
        );
    }

    pub fn log_response(&self, status: u16, content_length: Option<u64>) {
        debug!(
            trace_id = %self.trace_id,
            status = %status,
            content_length = ?content_length,
            elapsed_ms = %self.elapsed_ms(),
            "Response received from provider"
        );
    }

    pub fn log_success(&self, text_len: usize) {
        info!(
            trace_id = %self.trace_id,
            model = %self.model,
            turns = %self.turns,
            text_len = %text_len,
            elapsed_ms = %self.elapsed_ms(),
            "Completion succeeded"
        );
    }

    /// Log a classified failure at a level matching its kind
    pub fn log_failure(&self, failure: &Failure) {
        match failure.kind {
            FailureKind::Transport => error!(
                trace_id = %self.trace_id,
                transport = %self.transport,
                endpoint = %self.endpoint,
                elapsed_ms = %self.elapsed_ms(),
                error = %failure.message,
                "Connection to provider failed"
            ),
            FailureKind::Provider => error!(
                trace_id = %self.trace_id,
                model = %self.model,
                status = ?failure.status,
                error_type = ?failure.error_type,
                error = %failure.message,
                elapsed_ms = %self.elapsed_ms(),
                "Provider returned an error"
            ),
            FailureKind::MalformedResponse => warn!(
                trace_id = %self.trace_id,
                model = %self.model,
                status = ?failure.status,
                elapsed_ms = %self.elapsed_ms(),
                "No content in provider response"
            ),
        }
    }

    pub fn create_span(&self) -> tracing::Span {
        tracing::info_span!(
            "completion",
            trace_id = %self.trace_id,
            transport = %self.transport,
            model = %self.model,
            turns = %self.turns,
        )
    }
}
