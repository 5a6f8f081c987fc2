pub mod conversation;
pub mod error;
pub mod gateway;
pub mod session_store;

// Re-export common types
pub use conversation::{ConversationManager, ConversationState, Message, Sender, SubmitResult};
pub use error::{ChatError, Result};
pub use gateway::{BackendReply, ChatBackend};
pub use session_store::SessionStore;
