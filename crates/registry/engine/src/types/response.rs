//! Response types for account service operations.

use user_registry_domain::{AccountProfile, Envelope};

/// Outcome of a signup, carrying the new account on success.
pub type SignupResponse = Envelope<AccountProfile>;

/// Outcome of a login, carrying the matched account on success.
pub type LoginResponse = Envelope<AccountProfile>;

/// Outcome of listing every stored account.
pub type ListAccountsResponse = Envelope<Vec<AccountProfile>>;
