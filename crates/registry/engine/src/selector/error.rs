use user_registry_store::{RecordStoreError, StorageError};

#[derive(Debug, thiserror::Error)]
pub enum SelectStoreError {
    #[error("file store error: {0}")]
    File(#[from] RecordStoreError),

    #[error("local storage error: {0}")]
    LocalStorage(#[from] StorageError),
}
