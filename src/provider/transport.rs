//! Provider transport
//!
//! Defines the transport seam used by the session and the reqwest-backed
//! implementation that talks to an OpenAI-compatible chat completions
//! endpoint. One call is one POST: there is no retry and no streaming.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use tracing::Instrument;

use crate::{
    config::{Config, Credential},
    conversation::CompletionRequest,
    error::Failure,
    provider::{
        logging::ExchangeContext,
        outcome::{classify, CompletionResult},
    },
};

/// Trait defining a single provider exchange
///
/// Implementations must classify every outcome into a [`CompletionResult`]
/// and must not retry. Each call is independent and authenticates with the
/// credential it is given.
#[async_trait]
pub trait CompletionTransport: Send + Sync {
    /// Transport name for logging
    fn name(&self) -> &'static str;

    /// Send one request and classify the outcome
    async fn execute(&self, request: &CompletionRequest, credential: &Credential) -> CompletionResult;
}

/// HTTP transport for OpenAI-compatible providers
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Create a transport with the configured timeouts
    ///
    /// reqwest has no separate write phase timeout, so the write budget is
    /// folded into the overall request timeout.
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .read_timeout(config.read_timeout)
            .timeout(config.connect_timeout + config.write_timeout + config.read_timeout)
            .build()?;

        Ok(Self { client })
    }

    /// Create a transport around an existing client
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Build headers for a provider request
    fn request_headers(credential: &Credential) -> Result<HeaderMap, Failure> {
        let mut headers = HeaderMap::new();
        let bearer = HeaderValue::from_str(&format!("Bearer {}", credential.api_key))
            .map_err(|_| Failure::transport("API key contains characters not allowed in a header"))?;
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(headers)
    }

    async fn exchange(
        &self,
        ctx: &ExchangeContext,
        request: &CompletionRequest,
        credential: &Credential,
    ) -> Result<CompletionResult, Failure> {
        let headers = Self::request_headers(credential)?;
        let body = serde_json::to_vec(request)
            .map_err(|e| Failure::transport(format!("Failed to serialize request: {}", e)))?;

        ctx.log_start(body.len());

        let response = self
            .client
            .post(&credential.endpoint_url)
            .headers(headers)
            .body(body)
            .send()
            .await
            .map_err(|e| Failure::transport(describe_transport_error(&e)))?;

        let status = response.status().as_u16();
        ctx.log_response(status, response.content_length());

        // A body cut off mid-read is a communication failure, whatever the status.
        let text = response
            .text()
            .await
            .map_err(|e| Failure::transport(describe_transport_error(&e)))?;
        Ok(classify(status, Some(text.as_str())))
    }
}

#[async_trait]
impl CompletionTransport for HttpTransport {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn execute(&self, request: &CompletionRequest, credential: &Credential) -> CompletionResult {
        let ctx = ExchangeContext::new(
            self.name(),
            &credential.endpoint_url,
            &request.model,
            request.turn_count(),
        );
        let span = ctx.create_span();

        let outcome = self
            .exchange(&ctx, request, credential)
            .instrument(span)
            .await
            .unwrap_or_else(CompletionResult::Failure);

        match &outcome {
            CompletionResult::Text(text) => ctx.log_success(text.len()),
            CompletionResult::Failure(failure) => ctx.log_failure(failure),
        }

        outcome
    }
}

/// Human-readable description of a failure to send a request or read its reply
fn describe_transport_error(e: &reqwest::Error) -> String {
    if e.is_timeout() {
        format!("Request to provider timed out: {}", e)
    } else if e.is_connect() {
        format!("Failed to connect to provider: {}", e)
    } else {
        format!("Error communicating with provider: {}", e)
    }
}
