//! Conversation message types.

use chrono::Local;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Which side of the conversation produced a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    /// Message from the user.
    User,
    /// Message from the backend bot.
    Bot,
}

/// A single message in the conversation log.
///
/// Timestamps are assigned at the moment the message is appended to local
/// state, never by the server, and are formatted for display (`HH:MM:SS`,
/// local time). Ids are unique within one conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub sender: Sender,
    pub text: String,
    pub timestamp: String,
}

impl Message {
    /// Creates a user message with a fresh id and the current local time.
    pub fn user(text: impl Into<String>) -> Self {
        Self::stamped(Sender::User, text)
    }

    /// Creates a bot message with a fresh id and the current local time.
    pub fn bot(text: impl Into<String>) -> Self {
        Self::stamped(Sender::Bot, text)
    }

    /// Creates a synthetic bot message with a fixed id (greeting and reset
    /// seeds open an otherwise empty log, so the fixed id stays unique).
    pub fn seeded(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            sender: Sender::Bot,
            text: text.into(),
            timestamp: display_timestamp(),
        }
    }

    fn stamped(sender: Sender, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            sender,
            text: text.into(),
            timestamp: display_timestamp(),
        }
    }
}

/// Human-readable local creation time, e.g. `14:03:59`.
fn display_timestamp() -> String {
    Local::now().format("%H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sender_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Sender::User).unwrap(), "\"user\"");
        assert_eq!(serde_json::to_string(&Sender::Bot).unwrap(), "\"bot\"");
    }

    #[test]
    fn wire_message_deserializes() {
        let json = r#"{"id":"1","sender":"bot","text":"hi","timestamp":"10:00:00"}"#;
        let message: Message = serde_json::from_str(json).unwrap();

        assert_eq!(message.id, "1");
        assert_eq!(message.sender, Sender::Bot);
        assert_eq!(message.text, "hi");
        assert_eq!(message.timestamp, "10:00:00");
    }

    #[test]
    fn generated_ids_are_unique() {
        let first = Message::user("one");
        let second = Message::user("two");

        assert_ne!(first.id, second.id);
    }
}
