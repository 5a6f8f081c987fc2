//! Persistence seam for the session identifier.

use async_trait::async_trait;

use crate::error::Result;

/// Durable storage for the single opaque session identifier.
///
/// The identifier is treated as an opaque string; implementations perform no
/// format validation. `save` overwrites and `clear` tolerates an already
/// absent value, so both are idempotent.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Returns the persisted identifier, if any. No side effects.
    async fn load(&self) -> Result<Option<String>>;

    /// Overwrites the persisted identifier.
    async fn save(&self, session_id: &str) -> Result<()>;

    /// Removes the persisted identifier; a no-op when absent.
    async fn clear(&self) -> Result<()>;
}
