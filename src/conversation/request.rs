//! Request types for chat completions
//!
//! Builds the provider payload from a transcript. Validation is left to the
//! provider: an empty transcript is serialized as-is and any rejection comes
//! back as a provider error.

use serde::Serialize;

use super::transcript::Transcript;
use super::types::Turn;

/// Default sampling temperature
pub const DEFAULT_TEMPERATURE: f64 = 0.7;

/// Default cap on generated tokens
pub const DEFAULT_MAX_TOKENS: u32 = 1000;

/// Chat completion request
///
/// Built fresh for every exchange and never mutated afterwards.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CompletionRequest {
    /// Model identifier
    pub model: String,
    /// Conversation replayed in order
    pub messages: Vec<Turn>,
    /// Sampling temperature
    pub temperature: f64,
    /// Maximum tokens to generate
    pub max_tokens: u32,
    /// Always `false`, responses are single-shot
    pub stream: bool,
}

impl CompletionRequest {
    /// Build a request with the default sampling parameters
    pub fn new(transcript: &Transcript, model: &str) -> Self {
        Self::build(transcript, model, DEFAULT_TEMPERATURE, DEFAULT_MAX_TOKENS)
    }

    /// Build a request with explicit sampling parameters
    ///
    /// Nothing is validated here; the provider rejects what it cannot serve.
    pub fn build(transcript: &Transcript, model: &str, temperature: f64, max_tokens: u32) -> Self {
        Self {
            model: model.to_string(),
            messages: transcript.turns().to_vec(),
            temperature,
            max_tokens,
            stream: false,
        }
    }

    pub fn turn_count(&self) -> usize {
        self.messages.len()
    }
}
