//! In-memory conversation state.

use serde::{Deserialize, Serialize};

use super::message::Message;

/// The ordered message log plus the transient request flags.
///
/// The log is append-only: operations either push new entries or replace the
/// whole sequence (bootstrap restore, session reset); no past entry is ever
/// edited in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationState {
    pub messages: Vec<Message>,
    /// True only while a send round trip is outstanding.
    pub is_sending: bool,
    /// True only while the startup history fetch is outstanding.
    pub is_loading_history: bool,
}

impl ConversationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a message to the end of the log.
    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Replaces the whole log.
    pub fn replace(&mut self, messages: Vec<Message>) {
        self.messages = messages;
    }
}
