//! Input rules applied before an account operation touches the store.
//!
//! Every check is a pure function returning `Ok(())` or the reason the input was rejected;
//! the reason's `Display` text is what callers see.

/// Reasons an input is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// One of the signup fields is empty.
    #[error("All fields are required")]
    MissingFields,

    /// The mobile number is not ten digits starting with 6, 7, 8 or 9.
    #[error("Mobile number must be exactly 10 digits and start with 6, 7, 8, or 9")]
    InvalidMobileNumber,

    /// The username or password of a login is empty.
    #[error("Username and password are required")]
    MissingCredentials,
}

/// Fails unless every signup field is non-empty.
pub fn check_required_fields(
    name: &str,
    mobile_number: &str,
    username: &str,
    password: &str,
) -> Result<(), ValidationError> {
    [name, mobile_number, username, password]
        .iter()
        .all(|field| !field.is_empty())
        .then_some(())
        .ok_or(ValidationError::MissingFields)
}

/// Fails unless `mobile_number` matches `^[6-9][0-9]{9}$`.
pub fn check_mobile_number(mobile_number: &str) -> Result<(), ValidationError> {
    match mobile_number.as_bytes() {
        [b'6'..=b'9', rest @ ..] if rest.len() == 9 && rest.iter().all(u8::is_ascii_digit) => {
            Ok(())
        },
        _ => Err(ValidationError::InvalidMobileNumber),
    }
}

/// Fails unless both login credentials are non-empty.
pub fn check_credentials(username: &str, password: &str) -> Result<(), ValidationError> {
    (!username.is_empty() && !password.is_empty())
        .then_some(())
        .ok_or(ValidationError::MissingCredentials)
}
