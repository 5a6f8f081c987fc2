//! Unified path management for newschat client files.
//!
//! Everything the client persists lives under one platform config directory,
//! resolved the same way on Linux, macOS, and Windows.

use std::path::PathBuf;

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Platform config directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => {
                write!(f, "Cannot determine the platform config directory")
            }
        }
    }
}

impl std::error::Error for PathError {}

/// Well-known locations for newschat client state.
///
/// # Directory Structure
///
/// ```text
/// ~/.config/newschat/
/// ├── config.toml    # CLI configuration
/// └── session.txt    # persisted session identifier
/// ```
pub struct NewschatPaths;

impl NewschatPaths {
    /// Returns the newschat configuration directory.
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join("newschat"))
            .ok_or(PathError::ConfigDirNotFound)
    }

    /// Returns the path to the CLI configuration file.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the path to the persisted session identifier.
    pub fn session_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("session.txt"))
    }
}
