use crate::persistence::local::storage::StorageError;

pub type Result<T, E = RecordStoreError> = core::result::Result<T, E>;

/// Errors that can occur when interacting with a record store.
#[derive(Debug, thiserror::Error)]
pub enum RecordStoreError {
    /// Reading or writing the data file failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The record collection could not be serialized.
    ///
    /// Parse failures on read are not reported through this variant: an unreadable
    /// collection is treated as empty.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The underlying key-value storage rejected an operation.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}
