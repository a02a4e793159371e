//! Persistence layer for the user registry.
//!
//! This crate provides the [`RecordStore`] capability used by the account service and its two
//! interchangeable implementations:
//!
//! - [`JsonFileStore`] keeps every record in a single JSON array inside one file. It is the
//!   backend used when the registry runs next to its server-side data directory.
//! - [`LocalStore`] keeps the same array serialized under one fixed key of a client-local
//!   [`KeyValueStorage`], mirroring what a browser does with `localStorage`. Reads never fail
//!   and writes are best effort.
//!
//! Neither variant indexes anything: every operation loads or rewrites the whole collection.
//!
//! # Usage
//!
//! ```ignore
//! let store = JsonFileStore::open("data/users.json").await?;
//!
//! let mut records = store.load_all().await?;
//! records.push(record);
//! store.save_all(&records).await?;
//! ```

mod error;
mod persistence;

pub use self::{
    error::RecordStoreError,
    persistence::{
        file::JsonFileStore,
        local::{
            LocalStore, STORAGE_KEY,
            storage::{DirectoryStorage, KeyValueStorage, MemoryStorage, StorageError},
        },
    },
};

use async_trait::async_trait;
use user_registry_domain::AccountRecord;

use self::error::Result;

/// Durable collection of account records.
///
/// Implementations only know how to read and replace the whole collection; uniqueness and
/// validation are the account service's concern.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Loads every stored record, in insertion order.
    async fn load_all(&self) -> Result<Vec<AccountRecord>>;

    /// Replaces the stored collection with `records`.
    async fn save_all(&self, records: &[AccountRecord]) -> Result<()>;
}
