//! Mock infrastructure for testing external services
//!
//! Provides a wiremock-backed stand-in for the chat completions provider so
//! exchanges can be exercised without network access or a real API key.


pub use provider::*;
