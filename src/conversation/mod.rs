//! Conversation model
//!
//! Turns, transcripts, the request/response payloads exchanged with the
//! provider, and the offline mock responder.

pub mod mock;
pub mod request;
pub mod response;
pub mod transcript;
pub mod types;

pub use request::{CompletionRequest, DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE};
pub use response::{extract_text, ChatCompletionResponse, Choice, ChoiceMessage};
pub use transcript::Transcript;
pub use types::{Role, Turn};
