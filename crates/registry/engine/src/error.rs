use user_registry_domain::FailureKind;
use user_registry_store::RecordStoreError;

use crate::validation::ValidationError;

/// Why an account operation failed.
///
/// The `Display` text of each variant is the message placed in the failure envelope.
#[derive(Debug, thiserror::Error)]
pub enum AccountServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Does not say which of the two fields collided.
    #[error("Username or mobile number already exists")]
    DuplicateAccount,

    /// Does not say whether the username exists.
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("{operation}: {source}")]
    Store {
        operation: Operation,
        source: RecordStoreError,
    },
}

/// The account operation a store failure happened in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum Operation {
    #[strum(to_string = "Failed to create account")]
    Signup,

    #[strum(to_string = "Login failed")]
    Login,

    #[strum(to_string = "Failed to retrieve users")]
    ListAccounts,
}

impl AccountServiceError {
    pub(crate) fn store(operation: Operation) -> impl FnOnce(RecordStoreError) -> Self {
        move |source| Self::Store { operation, source }
    }

    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Validation(_) => FailureKind::Validation,
            Self::DuplicateAccount => FailureKind::Conflict,
            Self::InvalidCredentials => FailureKind::Unauthorized,
            Self::Store { .. } => FailureKind::Storage,
        }
    }
}
