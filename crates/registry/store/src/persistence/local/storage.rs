//! Client-local key-value storage, modelled on the Web Storage API.

mod error;

pub use self::error::StorageError;

use std::{collections::HashMap, io, path::PathBuf};

use async_trait::async_trait;
use tokio::{fs, sync::Mutex};

/// A string-to-string storage area local to one client.
#[async_trait]
pub trait KeyValueStorage: Send + Sync {
    /// Returns the value stored under `key`, or `None` if there is none.
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-process storage, optionally limited to a byte quota like browser storage is.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: Mutex<HashMap<String, String>>,
    quota: Option<usize>,
}

impl MemoryStorage {
    /// Creates an unbounded storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a storage that rejects writes once keys and values together exceed
    /// `quota` bytes.
    pub fn with_quota(quota: usize) -> Self {
        Self { items: Mutex::default(), quota: Some(quota) }
    }
}

#[async_trait]
impl KeyValueStorage for MemoryStorage {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.lock().await.get(key).cloned())
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut items = self.items.lock().await;

        if let Some(quota) = self.quota {
            let used: usize = items
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| k.len() + v.len())
                .sum();

            let needed = used + key.len() + value.len();
            if needed > quota {
                return Err(StorageError::QuotaExceeded { needed, quota });
            }
        }

        items.insert(key.to_owned(), value.to_owned());

        Ok(())
    }
}

/// Storage that keeps each key in its own file inside a directory.
///
/// This gives the local record store persistence across restarts on hosts without a
/// browser.
#[derive(Debug, Clone)]
pub struct DirectoryStorage {
    dir: PathBuf,
}

impl DirectoryStorage {
    /// Opens the storage rooted at `dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub async fn open<P>(dir: P) -> Result<Self, StorageError>
    where
        P: Into<PathBuf>,
    {
        let dir = dir.into();
        fs::create_dir_all(&dir).await?;

        Ok(Self { dir })
    }

    fn item_path(&self, key: &str) -> Result<PathBuf, StorageError> {
        let is_plain_name = !key.is_empty()
            && key != "."
            && key != ".."
            && !key.contains(['/', '\\', '\0']);

        is_plain_name
            .then(|| self.dir.join(key))
            .ok_or_else(|| StorageError::invalid_key(key.to_owned()))
    }
}

#[async_trait]
impl KeyValueStorage for DirectoryStorage {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.item_path(key)?).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::write(self.item_path(key)?, value).await.map_err(From::from)
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[tokio::test]
    async fn memory_storage_replaces_values() {
        let storage = MemoryStorage::new();

        storage.set_item("k", "one").await.unwrap();
        storage.set_item("k", "two").await.unwrap();

        assert_eq!(storage.get_item("k").await.unwrap().as_deref(), Some("two"));
        assert_eq!(storage.get_item("other").await.unwrap(), None);
    }

    #[tokio::test]
    async fn memory_quota_counts_keys_and_values_across_items() {
        let storage = MemoryStorage::with_quota(10);

        storage.set_item("a", "1234").await.unwrap();
        storage.set_item("a", "123456789").await.unwrap();

        let err = storage.set_item("b", "12").await.unwrap_err();

        assert!(matches!(err, StorageError::QuotaExceeded { needed: 13, quota: 10 }));
        assert_eq!(storage.get_item("b").await.unwrap(), None);
    }

    #[tokio::test]
    async fn directory_storage_survives_reopening() {
        let temp_dir = TempDir::new().unwrap();

        DirectoryStorage::open(temp_dir.path()).await.unwrap().set_item("k", "v").await.unwrap();

        let storage = DirectoryStorage::open(temp_dir.path()).await.unwrap();

        assert_eq!(storage.get_item("k").await.unwrap().as_deref(), Some("v"));
        assert_eq!(storage.get_item("missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn directory_storage_rejects_path_like_keys() {
        let temp_dir = TempDir::new().unwrap();
        let storage = DirectoryStorage::open(temp_dir.path()).await.unwrap();

        for key in ["", "..", "nested/key"] {
            let err = storage.set_item(key, "v").await.unwrap_err();
            assert!(matches!(err, StorageError::InvalidKey(_)), "key {key:?} was accepted");
        }
    }
}
