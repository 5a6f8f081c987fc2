//! Transport abstraction for the remote chat backend.

use async_trait::async_trait;

use crate::conversation::Message;
use crate::error::Result;

/// Reply to a sent message: the answer text plus the session the backend
/// attributed it to (newly issued when the request carried none).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendReply {
    pub answer: String,
    pub session_id: String,
}

/// A single-exchange transport to the conversational backend.
///
/// Implementations perform one request per call with no client-side retry;
/// every failure surfaces uniformly as `ChatError::Transport`, with no
/// partial success.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Sends a user query, optionally within an existing session.
    async fn send_message(&self, query: &str, session_id: Option<&str>) -> Result<BackendReply>;

    /// Fetches the stored message log for a session.
    ///
    /// A session with no stored messages yields `Ok` with an empty log, not
    /// an error.
    async fn fetch_history(&self, session_id: &str) -> Result<Vec<Message>>;

    /// Invalidates a session server-side.
    async fn reset_session(&self, session_id: &str) -> Result<()>;
}
