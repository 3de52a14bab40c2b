//! Conversation transcript
//!
//! An ordered, append-only list of turns. Insertion order is conversation
//! order and the whole list is replayed to the provider on every call.
//!
//! The transcript itself permits several system turns. The system-turn helpers
//! below keep at most one, at index 0.

use super::types::{Role, Turn};

/// Ordered conversation history owned by the caller
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    turns: Vec<Turn>,
}

impl Transcript {
    /// Create an empty transcript
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a transcript seeded with a system prompt
    pub fn with_system_prompt(prompt: impl Into<String>) -> Self {
        Self {
            turns: vec![Turn::system(prompt)],
        }
    }

    /// Append an arbitrary turn
    pub fn push(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    pub fn add_user_turn(&mut self, content: impl Into<String>) {
        self.push(Turn::user(content));
    }

    pub fn add_assistant_turn(&mut self, content: impl Into<String>) {
        self.push(Turn::assistant(content));
    }

    /// Install `prompt` as the single system turn at index 0
    ///
    /// Any other system turns are removed, so the transcript ends up with
    /// exactly one.
    pub fn set_system_turn(&mut self, prompt: impl Into<String>) {
        self.turns.retain(|t| t.role() != Role::System);
        self.turns.insert(0, Turn::system(prompt));
    }

    /// Remove every system turn, leaving the rest in order
    pub fn clear_system_turn(&mut self) {
        self.turns.retain(|t| t.role() != Role::System);
    }

    /// The active system turn, if the transcript starts with one
    pub fn system_turn(&self) -> Option<&Turn> {
        self.turns.first().filter(|t| t.role() == Role::System)
    }

    pub fn system_turn_count(&self) -> usize {
        self.turns.iter().filter(|t| t.role() == Role::System).count()
    }

    /// Forget every turn
    pub fn reset(&mut self) {
        self.turns.clear();
    }

    /// Drop turns past `len`. Used to roll back a failed exchange.
    pub(crate) fn truncate(&mut self, len: usize) {
        self.turns.truncate(len);
    }

    /// Most recent user turn content, or `""` when there is none
    pub fn last_user_content(&self) -> &str {
        self.turns
            .iter()
            .rev()
            .find(|t| t.role() == Role::User)
            .map(Turn::content)
            .unwrap_or("")
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Turn> {
        self.turns.iter()
    }

    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

impl From<Vec<Turn>> for Transcript {
    fn from(turns: Vec<Turn>) -> Self {
        Self { turns }
    }
}

impl<'a> IntoIterator for &'a Transcript {
    type Item = &'a Turn;
    type IntoIter = std::slice::Iter<'a, Turn>;

    fn into_iter(self) -> Self::IntoIter {
        self.turns.iter()
    }
}
