//! Offline mock responder
//!
//! Used in place of the provider when the configured API key is the
//! placeholder sentinel. Replies are chosen by matching the most recent user
//! turn against an ordered rule list; the first matching rule wins.

use super::transcript::Transcript;

pub const GREETING_REPLY: &str = "Hello! I'm a mock AI assistant. Since you're using a placeholder API key, I'm providing simulated responses for testing purposes.";

pub const STATUS_REPLY: &str =
    "I'm just a simulated response for testing purposes, but thanks for asking!";

pub const WEATHER_REPLY: &str = "I can't check the actual weather since this is a simulated response. With a real API key I would ask the provider for accurate information.";

pub const IDENTITY_REPLY: &str = "I'm a simulated chat assistant for testing purposes. With a real API key you would be talking to the configured model.";

pub const MULTI_QUESTION_REPLY: &str = "I notice you've used multiple question marks. This is a simulated response since you're using a placeholder API key. For real responses, please configure a valid API key.";

pub const QUESTION_REPLY: &str = "That's an interesting question! This is a simulated response for testing purposes. With a valid API key, you would receive an actual response from the model.";

pub const PLACEHOLDER_NOTICE: &str = "This is a simulated response since you're using a placeholder API key. For real AI-powered responses, please set OPENAI_API_KEY in the environment or openai.api.key in config.properties.";

/// Predicate over the raw user message
type Matcher = fn(&str) -> bool;

/// Ordered (predicate, reply) rules. Order is significant.
const RULES: &[(Matcher, &str)] = &[
    (is_greeting, GREETING_REPLY),
    (asks_status, STATUS_REPLY),
    (mentions_weather, WEATHER_REPLY),
    (mentions_name, IDENTITY_REPLY),
    (has_repeated_question_marks, MULTI_QUESTION_REPLY),
    (is_question, QUESTION_REPLY),
];

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

fn is_greeting(message: &str) -> bool {
    contains_ci(message, "hello") || contains_ci(message, "hi")
}

fn asks_status(message: &str) -> bool {
    contains_ci(message, "how are you")
}

fn mentions_weather(message: &str) -> bool {
    contains_ci(message, "weather")
}

fn mentions_name(message: &str) -> bool {
    contains_ci(message, "name")
}

fn has_repeated_question_marks(message: &str) -> bool {
    message.contains("??")
}

fn is_question(message: &str) -> bool {
    message.ends_with('?')
}

/// Reply for a single user message
pub fn reply_for(message: &str) -> &'static str {
    RULES
        .iter()
        .find(|(matches, _)| matches(message))
        .map(|(_, reply)| *reply)
        .unwrap_or(PLACEHOLDER_NOTICE)
}

/// Canned reply for the transcript's most recent user turn
///
/// Pure: the same transcript always produces the same text.
pub fn respond(transcript: &Transcript) -> String {
    reply_for(transcript.last_user_content()).to_string()
}
