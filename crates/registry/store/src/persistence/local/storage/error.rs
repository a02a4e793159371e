use std::borrow::Cow;

/// Errors reported by a [`KeyValueStorage`](super::KeyValueStorage).
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The backing medium failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The write would exceed the storage quota.
    #[error("quota exceeded: {needed} bytes needed, {quota} bytes allowed")]
    QuotaExceeded {
        /// Bytes the storage would hold after the write.
        needed: usize,
        /// Bytes the storage may hold.
        quota: usize,
    },

    /// The key cannot be used by this storage.
    #[error("invalid storage key: {0:?}")]
    InvalidKey(Cow<'static, str>),
}

impl StorageError {
    pub(crate) fn invalid_key<E>(key: E) -> Self
    where
        Cow<'static, str>: From<E>,
    {
        Self::InvalidKey(key.into())
    }
}
