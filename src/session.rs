//! Conversation session
//!
//! Ties the request builder, transport and mock responder together. The
//! session never owns a transcript: callers pass theirs in for every call.

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::{
    config::{Config, Credential},
    conversation::{mock, CompletionRequest, Transcript, DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE},
    error::{ChatError, ChatResult},
    provider::{CompletionTransport, HttpTransport},
};

/// Sampling parameters applied to every request of a session
#[derive(Debug, Clone, PartialEq)]
pub struct SamplingParams {
    pub temperature: f64,
    pub max_tokens: u32,
}

impl Default for SamplingParams {
    fn default() -> Self {
        Self {
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

/// Conversation session bound to one credential
pub struct ChatSession {
    transport: Arc<dyn CompletionTransport>,
    credential: Credential,
    default_model: String,
    sampling: SamplingParams,
}

impl ChatSession {
    /// Create a session from loaded configuration using the HTTP transport
    pub fn from_config(config: &Config) -> ChatResult<Self> {
        let transport = Arc::new(HttpTransport::new(config)?);
        info!(api_url = %config.api_url, model = %config.default_model, "Chat session initialized");

        Ok(Self::new(transport, config.credential(), config.default_model.clone()).with_sampling(
            SamplingParams {
                temperature: config.temperature,
                max_tokens: config.max_tokens,
            },
        ))
    }

    /// Create a session with an explicit transport
    pub fn new(
        transport: Arc<dyn CompletionTransport>,
        credential: Credential,
        default_model: impl Into<String>,
    ) -> Self {
        if credential.is_placeholder() {
            info!("Placeholder API key configured, replies will come from the mock responder");
        }

        Self {
            transport,
            credential,
            default_model: default_model.into(),
            sampling: SamplingParams::default(),
        }
    }

    pub fn with_sampling(mut self, sampling: SamplingParams) -> Self {
        self.sampling = sampling;
        self
    }

    pub fn default_model(&self) -> &str {
        &self.default_model
    }

    pub fn is_offline(&self) -> bool {
        self.credential.is_placeholder()
    }

    /// Ask one question without any conversation history
    pub async fn ask_question(&self, question: &str) -> ChatResult<String> {
        self.ask_question_with(question, &self.default_model).await
    }

    /// Ask one question using a specific model
    pub async fn ask_question_with(&self, question: &str, model: &str) -> ChatResult<String> {
        debug!(model = %model, "Asking single question");
        let mut transcript = Transcript::new();
        transcript.add_user_turn(question);
        self.send_conversation_with(&transcript, model).await
    }

    /// Send a conversation using the default model
    pub async fn send_conversation(&self, transcript: &Transcript) -> ChatResult<String> {
        self.send_conversation_with(transcript, &self.default_model).await
    }

    /// Send a conversation and return the assistant's reply
    ///
    /// The transcript is only read. On failure the caller decides whether
    /// anything gets recorded.
    #[instrument(skip(self, transcript), fields(turns = transcript.len()))]
    pub async fn send_conversation_with(
        &self,
        transcript: &Transcript,
        model: &str,
    ) -> ChatResult<String> {
        if self.credential.is_placeholder() {
            debug!("Using placeholder API key, returning mock response");
            return Ok(mock::respond(transcript));
        }

        if transcript.system_turn_count() > 1 {
            warn!(
                system_turns = transcript.system_turn_count(),
                "Transcript carries more than one system turn, sending as-is"
            );
        }

        let request = CompletionRequest::build(
            transcript,
            model,
            self.sampling.temperature,
            self.sampling.max_tokens,
        );

        self.transport
            .execute(&request, &self.credential)
            .await
            .into_result()
            .map_err(ChatError::from)
    }

    /// Run one conversational step on a caller-owned transcript
    ///
    /// Appends the user turn, sends the conversation and appends the reply.
    /// On failure the transcript is left exactly as it was.
    pub async fn chat(&self, transcript: &mut Transcript, user_text: &str) -> ChatResult<String> {
        let checkpoint = transcript.len();
        transcript.add_user_turn(user_text);

        match self.send_conversation(transcript).await {
            Ok(reply) => {
                transcript.add_assistant_turn(reply.clone());
                Ok(reply)
            }
            Err(e) => {
                transcript.truncate(checkpoint);
                Err(e)
            }
        }
    }
}
