//! File-backed session identifier storage.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use newschat_core::error::{ChatError, Result};
use newschat_core::session_store::SessionStore;
use tokio::fs;

use crate::paths::NewschatPaths;

/// Persists the session identifier as the contents of a single text file.
///
/// The identifier is opaque and stored verbatim (surrounding whitespace is
/// trimmed on load). A missing file means no session.
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    /// Creates a store backed by the given file path.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Creates a store at the default location
    /// (`~/.config/newschat/session.txt`).
    pub fn default_location() -> Result<Self> {
        let path =
            NewschatPaths::session_file().map_err(|err| ChatError::storage(err.to_string()))?;
        Ok(Self::new(path))
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn load(&self) -> Result<Option<String>> {
        match fs::read_to_string(&self.path).await {
            Ok(contents) => {
                let id = contents.trim();
                if id.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(id.to_string()))
                }
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    async fn save(&self, session_id: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::write(&self.path, session_id).await?;
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> FileSessionStore {
        FileSessionStore::new(dir.path().join("session.txt"))
    }

    #[tokio::test]
    async fn load_without_file_is_none() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        assert_eq!(store.load().await.unwrap(), None);
    }

    #[tokio::test]
    async fn save_then_load_roundtrips() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store.save("abc123").await.unwrap();

        assert_eq!(store.load().await.unwrap(), Some("abc123".to_string()));
    }

    #[tokio::test]
    async fn save_overwrites_previous_id() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store.save("abc123").await.unwrap();
        store.save("def456").await.unwrap();

        assert_eq!(store.load().await.unwrap(), Some("def456".to_string()));
    }

    #[tokio::test]
    async fn load_trims_surrounding_whitespace() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("session.txt"), "abc123\n").unwrap();
        let store = store_in(&dir);

        assert_eq!(store.load().await.unwrap(), Some("abc123".to_string()));
    }

    #[tokio::test]
    async fn empty_file_reads_as_no_session() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("session.txt"), "\n").unwrap();
        let store = store_in(&dir);

        assert_eq!(store.load().await.unwrap(), None);
    }

    #[tokio::test]
    async fn clear_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        // Clearing with nothing stored is not an error
        store.clear().await.unwrap();

        store.save("abc123").await.unwrap();
        store.clear().await.unwrap();
        store.clear().await.unwrap();

        assert_eq!(store.load().await.unwrap(), None);
    }

    #[tokio::test]
    async fn save_creates_missing_parent_directories() {
        let dir = TempDir::new().unwrap();
        let store = FileSessionStore::new(dir.path().join("nested").join("session.txt"));

        store.save("abc123").await.unwrap();

        assert_eq!(store.load().await.unwrap(), Some("abc123".to_string()));
    }
}
