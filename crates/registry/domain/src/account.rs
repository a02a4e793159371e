//! Account records and the password-free profile projection.

use alloc::string::String;

use bon::Builder;
use chrono::{DateTime, Utc};
use dissolve_derive::Dissolve;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "serde")]
use crate::with_serde;

/// A registered account as it is persisted by a record store.
///
/// Records are created once by signup and never change afterwards, so fields are only
/// exposed through read accessors. The password is stored verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Builder, Dissolve)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct AccountRecord {
    /// Display name of the account holder.
    #[builder(into)]
    name: String,

    /// Ten digit mobile number, unique within a store.
    #[builder(into)]
    mobile_number: String,

    /// Login name, unique within a store.
    #[builder(into)]
    username: String,

    /// Plaintext password.
    #[builder(into)]
    password: String,

    /// The instant the account was created.
    #[cfg_attr(feature = "serde", serde(with = "with_serde::iso_timestamp"))]
    created_at: DateTime<Utc>,
}

/// An account with its password omitted.
///
/// This is the only shape in which accounts leave the account service. It can only be
/// obtained from an [`AccountRecord`] through its [`From`] impl (or by deserializing a
/// response), which keeps the password out of every result.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct AccountProfile {
    /// Display name of the account holder.
    name: String,

    /// Ten digit mobile number.
    mobile_number: String,

    /// Login name.
    username: String,

    /// The instant the account was created.
    #[cfg_attr(feature = "serde", serde(with = "with_serde::iso_timestamp"))]
    created_at: DateTime<Utc>,
}

impl AccountRecord {
    /// Returns the display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the mobile number.
    pub fn mobile_number(&self) -> &str {
        &self.mobile_number
    }

    /// Returns the username.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the plaintext password.
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Returns the creation timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Whether a new account with this username or mobile number would collide with `self`.
    pub fn conflicts_with(&self, username: &str, mobile_number: &str) -> bool {
        self.username == username || self.mobile_number == mobile_number
    }

    /// Whether both credentials match exactly.
    pub fn matches_credentials(&self, username: &str, password: &str) -> bool {
        self.username == username && self.password == password
    }
}

impl AccountProfile {
    /// Returns the display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the mobile number.
    pub fn mobile_number(&self) -> &str {
        &self.mobile_number
    }

    /// Returns the username.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the creation timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl From<AccountRecord> for AccountProfile {
    fn from(record: AccountRecord) -> Self {
        let AccountRecordDissolved { name, mobile_number, username, created_at, .. } =
            record.dissolve();

        Self { name, mobile_number, username, created_at }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn ann() -> AccountRecord {
        AccountRecord::builder()
            .name("Ann")
            .mobile_number("9812345678")
            .username("ann1")
            .password("pw1")
            .created_at(Utc.with_ymd_and_hms(2025, 3, 1, 10, 15, 30).unwrap())
            .build()
    }

    #[test]
    fn conflicts_on_either_identity_field() {
        let record = ann();

        assert!(record.conflicts_with("ann1", "7000000000"));
        assert!(record.conflicts_with("bob1", "9812345678"));
        assert!(!record.conflicts_with("bob1", "7000000000"));
    }

    #[test]
    fn credentials_must_match_exactly() {
        let record = ann();

        assert!(record.matches_credentials("ann1", "pw1"));
        assert!(!record.matches_credentials("ann1", "pw2"));
        assert!(!record.matches_credentials("Ann1", "pw1"));
        assert!(!record.matches_credentials("ann1", "pw1 "));
    }

    #[test]
    fn profile_keeps_everything_but_the_password() {
        let record = ann();
        let created_at = record.created_at();

        let profile = AccountProfile::from(record);

        assert_eq!(profile.name(), "Ann");
        assert_eq!(profile.mobile_number(), "9812345678");
        assert_eq!(profile.username(), "ann1");
        assert_eq!(profile.created_at(), created_at);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn record_uses_camel_case_and_millisecond_timestamps() {
        let value = serde_json::to_value(ann()).unwrap();

        assert_eq!(
            value,
            serde_json::json!({
                "name": "Ann",
                "mobileNumber": "9812345678",
                "username": "ann1",
                "password": "pw1",
                "createdAt": "2025-03-01T10:15:30.000Z",
            })
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn profile_json_has_no_password_field() {
        let value = serde_json::to_value(AccountProfile::from(ann())).unwrap();

        assert!(value.get("password").is_none());
        assert_eq!(value["username"], "ann1");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn record_accepts_any_rfc3339_timestamp() {
        let record: AccountRecord = serde_json::from_str(
            r#"{"name":"Ann","mobileNumber":"9812345678","username":"ann1","password":"pw1","createdAt":"2025-03-01T15:45:30+05:30"}"#,
        )
        .unwrap();

        assert_eq!(record, ann());
    }
}
