//! Persistent slot holding the session token.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use parking_lot::Mutex;
use tracing::debug;

use crate::error::StorageError;

const TOKEN_FILE_NAME: &str = "token";

/// A durable key-value slot for the session token.
///
/// Access is synchronous. Implementations are shared between the
/// [`ApiClient`](crate::ApiClient) and the [`Store`](crate::Store), so they
/// must be usable through a shared reference.
pub trait TokenStorage: Send + Sync {
    /// Returns the stored token, if any.
    fn get(&self) -> Result<Option<String>, StorageError>;

    /// Replaces the stored token.
    fn set(&self, token: &str) -> Result<(), StorageError>;

    /// Removes the stored token. Removing an absent token is not an error.
    fn remove(&self) -> Result<(), StorageError>;
}

/// Keeps the token in memory for the lifetime of the value.
#[derive(Debug, Default)]
pub struct MemoryTokenStorage {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStorage {
    /// Creates an empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a storage that already holds `token`.
    #[must_use]
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
        }
    }
}

impl TokenStorage for MemoryTokenStorage {
    fn get(&self) -> Result<Option<String>, StorageError> {
        Ok(self.token.lock().clone())
    }

    fn set(&self, token: &str) -> Result<(), StorageError> {
        *self.token.lock() = Some(token.to_string());
        Ok(())
    }

    fn remove(&self) -> Result<(), StorageError> {
        self.token.lock().take();
        Ok(())
    }
}

/// Persists the token in a plain file.
#[derive(Debug, Clone)]
pub struct FileTokenStorage {
    path: PathBuf,
}

impl FileTokenStorage {
    /// Stores the token at `path`. Parent directories are created on first write.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Stores the token in the per-user data directory of the application.
    pub fn in_data_dir() -> Result<Self, StorageError> {
        let dirs = ProjectDirs::from("com", "moviecatalog", "movie-catalog-client")
            .ok_or(StorageError::Unavailable)?;

        Ok(Self::new(dirs.data_dir().join(TOKEN_FILE_NAME)))
    }

    /// Location of the token file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStorage for FileTokenStorage {
    fn get(&self) -> Result<Option<String>, StorageError> {
        debug!(path = %self.path.display(), "Reading session token");

        match fs::read_to_string(&self.path) {
            Ok(content) => {
                let token = content.trim();
                Ok((!token.is_empty()).then(|| token.to_string()))
            }
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(None),
            Err(error) => Err(error.into()),
        }
    }

    fn set(&self, token: &str) -> Result<(), StorageError> {
        debug!(path = %self.path.display(), "Writing session token");

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(&self.path, token)?;
        Ok(())
    }

    fn remove(&self) -> Result<(), StorageError> {
        debug!(path = %self.path.display(), "Removing session token");

        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(()),
            Err(error) => Err(error.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_storage_round_trip() {
        let storage = MemoryTokenStorage::new();
        assert_eq!(storage.get().unwrap(), None);

        storage.set("abc").unwrap();
        assert_eq!(storage.get().unwrap().as_deref(), Some("abc"));

        storage.remove().unwrap();
        storage.remove().unwrap();
        assert_eq!(storage.get().unwrap(), None);
    }

    #[test]
    fn file_storage_creates_parents_and_removes() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileTokenStorage::new(dir.path().join("nested").join("token"));

        assert_eq!(storage.get().unwrap(), None);

        storage.set("jwt-value").unwrap();
        assert_eq!(storage.get().unwrap().as_deref(), Some("jwt-value"));

        storage.remove().unwrap();
        assert!(!storage.path().exists());
        storage.remove().unwrap();
    }

    #[test]
    fn file_storage_treats_blank_file_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("token");
        fs::write(&path, "  \n").unwrap();

        assert_eq!(FileTokenStorage::new(path).get().unwrap(), None);
    }
}
