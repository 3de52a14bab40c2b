//! Provider module
//!
//! Sends completion requests to the remote provider and classifies the
//! outcome.

pub mod logging;
pub mod outcome;
pub mod transport;

pub use outcome::{classify, CompletionResult};
pub use transport::{CompletionTransport, HttpTransport};
