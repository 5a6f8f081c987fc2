//! Conversation domain module.
//!
//! - `message`: message types (`Sender`, `Message`)
//! - `state`: the in-memory log plus transient request flags
//! - `manager`: lifecycle management (`ConversationManager`)

mod manager;
mod message;
mod state;

pub use manager::{ConversationManager, SubmitResult};
pub use message::{Message, Sender};
pub use state::ConversationState;
