//! Request types for account service operations.

use bon::Builder;
use dissolve_derive::Dissolve;

/// Request to register a new account.
///
/// Fields are taken as supplied; the account service validates them.
#[derive(Debug, Clone, Default, Builder, Dissolve)]
pub struct SignupRequest {
    /// Display name
    #[builder(into, default)]
    name: String,

    /// Mobile number, expected to be ten digits starting with 6, 7, 8 or 9
    #[builder(into, default)]
    mobile_number: String,

    /// Requested login name
    #[builder(into, default)]
    username: String,

    /// Plaintext password
    #[builder(into, default)]
    password: String,
}

/// Request to verify a username and password pair.
#[derive(Debug, Clone, Default, Builder, Dissolve)]
pub struct LoginRequest {
    /// Login name
    #[builder(into, default)]
    username: String,

    /// Plaintext password
    #[builder(into, default)]
    password: String,
}

impl SignupRequest {
    pub fn username(&self) -> &str {
        &self.username
    }
}

impl LoginRequest {
    pub fn username(&self) -> &str {
        &self.username
    }
}
