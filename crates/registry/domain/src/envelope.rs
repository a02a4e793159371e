//! The uniform result envelope returned by every account operation.

use alloc::borrow::Cow;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Coarse classification of a failed operation.
///
/// This never appears on the wire; transport collaborators use it to pick a status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum FailureKind {
    /// Missing or malformed input.
    Validation,

    /// The username or mobile number is already registered.
    Conflict,

    /// No account matches the supplied credentials.
    Unauthorized,

    /// The record store failed unexpectedly.
    Storage,
}

/// `{ success, message, data? }`
///
/// `data` is omitted from the serialized form when absent.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Envelope<T> {
    success: bool,

    message: Cow<'static, str>,

    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    data: Option<T>,

    #[cfg_attr(feature = "serde", serde(skip))]
    failure: Option<FailureKind>,
}

impl<T> Envelope<T> {
    /// Creates a successful envelope carrying `data`.
    pub fn success<M>(message: M, data: T) -> Self
    where
        Cow<'static, str>: From<M>,
    {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
            failure: None,
        }
    }

    /// Creates a failed envelope without data.
    pub fn failure<M>(kind: FailureKind, message: M) -> Self
    where
        Cow<'static, str>: From<M>,
    {
        Self {
            success: false,
            message: message.into(),
            data: None,
            failure: Some(kind),
        }
    }

    /// Creates a failed envelope that still carries data, as servers do for some rejections.
    pub fn failure_with_data<M>(message: M, data: Option<T>) -> Self
    where
        Cow<'static, str>: From<M>,
    {
        Self { success: false, message: message.into(), data, failure: None }
    }

    /// Whether the operation succeeded.
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Returns the human readable outcome.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the payload, if any.
    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    /// Consumes the envelope and returns its payload, if any.
    pub fn into_data(self) -> Option<T> {
        self.data
    }

    /// Returns how the operation failed.
    ///
    /// Only envelopes built in-process carry this; deserialized envelopes return `None`.
    pub fn failure_kind(&self) -> Option<FailureKind> {
        self.failure
    }

    /// Maps the payload, keeping the outcome untouched.
    pub fn map<U, F>(self, f: F) -> Envelope<U>
    where
        F: FnOnce(T) -> U,
    {
        Envelope {
            success: self.success,
            message: self.message,
            data: self.data.map(f),
            failure: self.failure,
        }
    }
}
