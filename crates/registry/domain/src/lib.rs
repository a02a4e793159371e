//! Domain types for the user registry.
//!
//! This crate provides the account record persisted by the record stores, the
//! password-free profile returned to callers, and the uniform result envelope produced by
//! every account operation.

#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod account;
pub mod envelope;

#[cfg(feature = "serde")]
mod with_serde;

pub use self::{
    account::{AccountProfile, AccountRecord},
    envelope::{Envelope, FailureKind},
};
