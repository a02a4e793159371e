use std::borrow::Cow;

/// Represents errors that can occur outside of an envelope exchange.
#[derive(Debug, thiserror::Error)]
pub enum RegistryClientError {
    /// The base url could not be parsed or cannot carry a path.
    #[error("invalid base url: {0}")]
    InvalidBaseUrl(Cow<'static, str>),

    /// The underlying http client could not be built.
    #[error("http client error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend refused to list accounts for an export.
    #[error("export failed: {0}")]
    Export(Cow<'static, str>),

    /// Writing the export file failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The exported accounts could not be serialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<url::ParseError> for RegistryClientError {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidBaseUrl(err.to_string().into())
    }
}
