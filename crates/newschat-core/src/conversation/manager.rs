//! Conversation lifecycle management.
//!
//! `ConversationManager` owns the message log and the session identifier and
//! is the only place that mutates them: startup restore, message submission,
//! and session reset. The presentation layer observes cloned snapshots on a
//! watch channel and never mutates state directly.

use std::sync::Arc;

use tokio::sync::{RwLock, watch};
use tokio_util::sync::CancellationToken;

use super::message::Message;
use super::state::ConversationState;
use crate::gateway::ChatBackend;
use crate::session_store::SessionStore;

/// Greeting shown for a fresh session (and when history cannot be restored).
const GREETING_TEXT: &str = "Hello! Ask me anything about the latest news.";
/// Bot message appended when a send fails.
const SEND_FAILED_TEXT: &str = "Sorry, I ran into an error.";
/// Bot message shown after a session reset.
const RESET_TEXT: &str = "Session reset. Hello!";
/// Fixed id for seeded messages; a seed always opens a fresh log.
const SEED_MESSAGE_ID: &str = "initial";

/// Outcome of a [`ConversationManager::submit`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitResult {
    /// The round trip finished; a bot reply (answer or apology) was appended.
    Completed,
    /// Empty input or a send already in flight; nothing changed.
    Ignored,
    /// The manager was shut down while the request was outstanding.
    Cancelled,
}

/// Coordinates the conversation state machine.
///
/// `ConversationManager` is responsible for:
/// - Restoring a persisted session and its history on startup
/// - Optimistically appending user messages and reconciling backend replies
/// - Enforcing the one-outstanding-send rule
/// - Resetting the session locally and remotely
///
/// Both collaborators are injected as trait objects so tests can substitute
/// in-memory fakes for the file store and the HTTP transport.
pub struct ConversationManager {
    store: Arc<dyn SessionStore>,
    backend: Arc<dyn ChatBackend>,
    session_id: RwLock<Option<String>>,
    state: RwLock<ConversationState>,
    state_tx: watch::Sender<ConversationState>,
    cancel: CancellationToken,
}

impl ConversationManager {
    /// Creates a new `ConversationManager` with the injected capabilities.
    pub fn new(store: Arc<dyn SessionStore>, backend: Arc<dyn ChatBackend>) -> Self {
        let (state_tx, _) = watch::channel(ConversationState::new());
        Self {
            store,
            backend,
            session_id: RwLock::new(None),
            state: RwLock::new(ConversationState::new()),
            state_tx,
            cancel: CancellationToken::new(),
        }
    }

    /// Establishes the initial conversation state.
    ///
    /// With a stored session id the backend history is fetched and restored.
    /// An empty or failed fetch degrades to the greeting instead of surfacing
    /// an error; the stored id is kept either way so the next send resumes
    /// the server-side session. Without a stored id the greeting is seeded
    /// directly and no network call is made.
    pub async fn bootstrap(&self) {
        let stored = match self.store.load().await {
            Ok(stored) => stored,
            Err(err) => {
                tracing::warn!("failed to load stored session id: {}", err);
                None
            }
        };

        let Some(session_id) = stored else {
            let mut state = self.state.write().await;
            state.replace(vec![Message::seeded(SEED_MESSAGE_ID, GREETING_TEXT)]);
            self.publish(&state);
            return;
        };

        {
            let mut state = self.state.write().await;
            state.is_loading_history = true;
            self.publish(&state);
        }
        *self.session_id.write().await = Some(session_id.clone());

        let history = tokio::select! {
            _ = self.cancel.cancelled() => {
                tracing::debug!("history fetch cancelled; starting from the greeting");
                Ok(Vec::new())
            }
            fetched = self.backend.fetch_history(&session_id) => fetched,
        };

        let mut state = self.state.write().await;
        match history {
            Ok(messages) if !messages.is_empty() => state.replace(messages),
            Ok(_) => state.replace(vec![Message::seeded(SEED_MESSAGE_ID, GREETING_TEXT)]),
            Err(err) => {
                tracing::warn!("failed to fetch history for session {}: {}", session_id, err);
                state.replace(vec![Message::seeded(SEED_MESSAGE_ID, GREETING_TEXT)]);
            }
        }
        state.is_loading_history = false;
        self.publish(&state);
    }

    /// Submits user input for a send round trip.
    ///
    /// The user message is appended optimistically before the network call
    /// and retained even when the call fails; a failure appends the fixed
    /// apology from the bot instead of rolling anything back.
    pub async fn submit(&self, input: &str) -> SubmitResult {
        let query = input.trim();
        if query.is_empty() {
            return SubmitResult::Ignored;
        }

        // Check-and-latch under one lock so a second submit cannot slip in
        // between the in-flight check and the flag update.
        {
            let mut state = self.state.write().await;
            if state.is_sending {
                return SubmitResult::Ignored;
            }
            state.push(Message::user(query));
            state.is_sending = true;
            self.publish(&state);
        }

        let current = self.session_id.read().await.clone();
        let reply = tokio::select! {
            _ = self.cancel.cancelled() => {
                let mut state = self.state.write().await;
                state.is_sending = false;
                self.publish(&state);
                return SubmitResult::Cancelled;
            }
            reply = self.backend.send_message(query, current.as_deref()) => reply,
        };

        match reply {
            Ok(reply) => {
                if current.is_none() {
                    self.adopt_session(reply.session_id).await;
                }
                let mut state = self.state.write().await;
                state.push(Message::bot(reply.answer));
                state.is_sending = false;
                self.publish(&state);
            }
            Err(err) => {
                tracing::warn!("send failed: {}", err);
                let mut state = self.state.write().await;
                state.push(Message::bot(SEND_FAILED_TEXT));
                state.is_sending = false;
                self.publish(&state);
            }
        }
        SubmitResult::Completed
    }

    /// Invalidates the current session and clears local state.
    ///
    /// A no-op when no session is held. The remote call's failure is logged
    /// only; the store and the in-memory log always reset.
    pub async fn reset(&self) {
        let Some(session_id) = self.session_id.read().await.clone() else {
            return;
        };

        let remote = tokio::select! {
            _ = self.cancel.cancelled() => {
                tracing::debug!("remote reset cancelled; clearing local state anyway");
                Ok(())
            }
            cleared = self.backend.reset_session(&session_id) => cleared,
        };
        if let Err(err) = remote {
            tracing::warn!("remote reset failed for session {}: {}", session_id, err);
        }

        if let Err(err) = self.store.clear().await {
            tracing::warn!("failed to clear stored session id: {}", err);
        }
        *self.session_id.write().await = None;

        let mut state = self.state.write().await;
        state.replace(vec![Message::seeded(SEED_MESSAGE_ID, RESET_TEXT)]);
        self.publish(&state);
    }

    /// Returns a snapshot of the current conversation state.
    pub async fn state(&self) -> ConversationState {
        self.state.read().await.clone()
    }

    /// Returns a receiver observing every state transition.
    pub fn subscribe(&self) -> watch::Receiver<ConversationState> {
        self.state_tx.subscribe()
    }

    /// Returns the currently held session id, if any.
    pub async fn session_id(&self) -> Option<String> {
        self.session_id.read().await.clone()
    }

    /// Cancels any outstanding backend call. The affected operation resets
    /// its transient flag before returning, so no flag stays latched.
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }

    /// Persists and adopts a session id issued by the backend.
    async fn adopt_session(&self, session_id: String) {
        if let Err(err) = self.store.save(&session_id).await {
            // The id still lives in memory; only resumability of the next
            // launch is affected.
            tracing::warn!("failed to persist session id: {}", err);
        }
        *self.session_id.write().await = Some(session_id);
    }

    fn publish(&self, state: &ConversationState) {
        self.state_tx.send_replace(state.clone());
    }
}
