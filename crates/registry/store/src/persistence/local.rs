pub mod storage;

use async_trait::async_trait;
use user_registry_domain::AccountRecord;

use crate::{RecordStore, RecordStoreError, error::Result};

use self::storage::KeyValueStorage;

/// The key under which the serialized record collection is kept.
pub const STORAGE_KEY: &str = "buy-this-product-users";

/// A record store that keeps the whole collection under [`STORAGE_KEY`] of a client-local
/// key-value storage.
///
/// This store never reports failures. Unreadable or missing data loads as an empty
/// collection and failed writes are logged and dropped.
#[derive(Debug)]
pub struct LocalStore<S> {
    storage: S,
}

impl<S> LocalStore<S> {
    /// Creates a store on top of `storage`.
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Returns the underlying storage.
    pub fn storage(&self) -> &S {
        &self.storage
    }
}

#[async_trait]
impl<S> RecordStore for LocalStore<S>
where
    S: KeyValueStorage,
{
    #[tracing::instrument(skip_all, fields(key = STORAGE_KEY))]
    async fn load_all(&self) -> Result<Vec<AccountRecord>> {
        let records = match self.storage.get_item(STORAGE_KEY).await {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                tracing::warn!("failed to parse stored users, treating them as empty: {e}");
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!("failed to read stored users, treating them as empty: {e}");
                Vec::new()
            },
        };

        Ok(records)
    }

    #[tracing::instrument(skip_all, fields(key = STORAGE_KEY, count = records.len()))]
    async fn save_all(&self, records: &[AccountRecord]) -> Result<()> {
        let saved = match serde_json::to_string(records) {
            Ok(raw) => self.storage.set_item(STORAGE_KEY, &raw).await.map_err(From::from),
            Err(e) => Err(RecordStoreError::from(e)),
        };

        if let Err(e) = saved {
            tracing::error!("failed to save users: {e}");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::{storage::MemoryStorage, *};

    fn record(username: &str, mobile_number: &str) -> AccountRecord {
        AccountRecord::builder()
            .name("Test User")
            .mobile_number(mobile_number)
            .username(username)
            .password("secret")
            .created_at(Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap())
            .build()
    }

    #[tokio::test]
    async fn missing_key_loads_as_empty() {
        let store = LocalStore::new(MemoryStorage::new());

        assert!(store.load_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn corrupt_value_loads_as_empty() {
        let storage = MemoryStorage::new();
        storage.set_item(STORAGE_KEY, "[{\"name\":").await.unwrap();

        let store = LocalStore::new(storage);

        assert!(store.load_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn records_are_kept_under_the_fixed_key() {
        let store = LocalStore::new(MemoryStorage::new());

        store.save_all(&[record("ann1", "9812345678")]).await.unwrap();

        let raw = store.storage().get_item(STORAGE_KEY).await.unwrap().unwrap();
        assert!(raw.starts_with('['));
        assert!(raw.contains(r#""password":"secret""#));
        assert_eq!(store.load_all().await.unwrap(), vec![record("ann1", "9812345678")]);
    }

    #[tokio::test]
    async fn failed_write_is_swallowed() {
        let store = LocalStore::new(MemoryStorage::with_quota(32));

        let result = store.save_all(&[record("ann1", "9812345678")]).await;

        assert!(result.is_ok());
        assert!(store.load_all().await.unwrap().is_empty());
    }
}
