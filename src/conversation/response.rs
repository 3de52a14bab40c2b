//! Response types for chat completions
//!
//! Only the fields needed to pull out the generated text are modelled. Every
//! field is optional so that an unexpected shape yields "no text" instead of
//! a parse error.

use serde::Deserialize;

/// Message in a completion choice
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ChoiceMessage {
    /// Role of the message author
    #[serde(default)]
    pub role: Option<String>,
    /// Content of the message
    #[serde(default)]
    pub content: Option<String>,
}

/// A completion choice
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Choice {
    #[serde(default)]
    pub message: Option<ChoiceMessage>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Chat completion response (non-streaming)
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub choices: Vec<Choice>,
}

impl ChatCompletionResponse {
    /// Content of the first choice, if it carries one
    ///
    /// Later choices are ignored even when the first has no content.
    pub fn first_choice_content(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|choice| choice.message.as_ref())
            .and_then(|message| message.content.as_deref())
    }
}

/// Extract the generated text from a raw response body
///
/// Returns `None` when the body is not JSON, has no `choices`, has an empty
/// `choices` array, or the first choice lacks message content.
pub fn extract_text(raw: &str) -> Option<String> {
    let response: ChatCompletionResponse = serde_json::from_str(raw).ok()?;
    response.first_choice_content().map(str::to_string)
}
