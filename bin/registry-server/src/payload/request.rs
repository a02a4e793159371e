use dissolve_derive::Dissolve;
use serde::Deserialize;
use serde_with::DefaultOnNull;

/// Absent or `null` fields deserialize as empty strings and are rejected by validation.
#[serde_with::serde_as]
#[derive(Debug, Default, Dissolve, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SignupRequestPayload {
    #[serde_as(as = "DefaultOnNull")]
    name: String,

    #[serde_as(as = "DefaultOnNull")]
    mobile_number: String,

    #[serde_as(as = "DefaultOnNull")]
    username: String,

    #[serde_as(as = "DefaultOnNull")]
    password: String,
}

#[serde_with::serde_as]
#[derive(Debug, Default, Dissolve, Deserialize)]
#[serde(default)]
pub struct LoginRequestPayload {
    #[serde_as(as = "DefaultOnNull")]
    username: String,

    #[serde_as(as = "DefaultOnNull")]
    password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_and_absent_signup_fields_become_empty() {
        let payload: SignupRequestPayload = serde_json::from_str(
            r#"{"name":null,"mobileNumber":"9812345678","username":"ann1"}"#,
        )
        .unwrap();

        let SignupRequestPayloadDissolved { name, mobile_number, username, password } =
            payload.dissolve();

        assert_eq!(name, "");
        assert_eq!(mobile_number, "9812345678");
        assert_eq!(username, "ann1");
        assert_eq!(password, "");
    }

    #[test]
    fn null_login_fields_become_empty() {
        let payload: LoginRequestPayload =
            serde_json::from_str(r#"{"username":null,"password":null}"#).unwrap();

        let LoginRequestPayloadDissolved { username, password } = payload.dissolve();

        assert!(username.is_empty());
        assert!(password.is_empty());
    }

    #[test]
    fn non_string_fields_are_still_rejected() {
        assert!(serde_json::from_str::<LoginRequestPayload>(r#"{"username":42}"#).is_err());
    }
}
