//! Chatline - conversation client for chat completion APIs
//!
//! This library keeps a linear chat transcript, sends it to an
//! OpenAI-compatible provider and maps the reply, or the provider's error,
//! back into text the caller can display. When the configured API key is the
//! placeholder sentinel, replies come from an offline mock responder instead.

pub mod config;
pub mod conversation;
pub mod error;
pub mod provider;
pub mod session;

pub use crate::config::{Config, Credential};
pub use crate::conversation::{CompletionRequest, Role, Transcript, Turn};
pub use crate::error::{ChatError, ChatResult, Failure, FailureKind};
pub use crate::provider::{CompletionResult, CompletionTransport, HttpTransport};
pub use crate::session::{ChatSession, SamplingParams};
