//! A client for the user registry backend.
//!
//! Every call resolves to an [`Envelope`], whether the backend answered, answered with
//! garbage, or could not be reached at all. Only construction and exports report errors.

mod error;
mod payload;

pub use self::{
    error::RegistryClientError,
    payload::{HealthStatus, LoginPayload, SignupPayload},
};

use std::path::Path;

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use url::Url;
use user_registry_domain::{AccountProfile, Envelope};

/// Base url of a backend running next to the client during development.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8081/api";

const EMPTY_RESPONSE: &str =
    "Server returned empty response. Please check if the backend server is running.";

const INVALID_JSON_RESPONSE: &str =
    "Invalid JSON response from server. Please check if the backend server is running correctly.";

/// A client for the `/api/users` contract of the registry backend.
#[derive(Debug, Clone)]
pub struct RegistryClient {
    http: Client,
    base_url: Url,
}

impl RegistryClient {
    /// Creates a client for the backend rooted at `base_url`, e.g. `http://localhost:8081/api`.
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` is not an absolute http(s) url or the http client
    /// cannot be built.
    pub fn new(base_url: &str) -> Result<Self, RegistryClientError> {
        let mut base_url = Url::parse(base_url)?;

        if base_url.cannot_be_a_base() || !matches!(base_url.scheme(), "http" | "https") {
            return Err(RegistryClientError::InvalidBaseUrl(base_url.to_string().into()));
        }

        // joined paths are relative to the last segment
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let http = Client::builder().build()?;

        Ok(Self { http, base_url })
    }

    /// Returns the url every endpoint is resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Registers a new account.
    #[tracing::instrument(skip_all)]
    pub async fn signup(&self, payload: &SignupPayload) -> Envelope<AccountProfile> {
        match self.endpoint("users/signup") {
            Ok(url) => self.exchange(self.http.post(url).json(payload)).await,
            Err(envelope) => envelope,
        }
    }

    /// Checks credentials and returns the matching profile.
    #[tracing::instrument(skip_all)]
    pub async fn login(&self, payload: &LoginPayload) -> Envelope<AccountProfile> {
        match self.endpoint("users/login") {
            Ok(url) => self.exchange(self.http.post(url).json(payload)).await,
            Err(envelope) => envelope,
        }
    }

    /// Lists every registered account, without passwords.
    #[tracing::instrument(skip_all)]
    pub async fn list_accounts(&self) -> Envelope<Vec<AccountProfile>> {
        match self.endpoint("users") {
            Ok(url) => self.exchange(self.http.get(url)).await,
            Err(envelope) => envelope,
        }
    }

    /// Probes whether the backend is up.
    #[tracing::instrument(skip_all)]
    pub async fn health(&self) -> Envelope<HealthStatus> {
        match self.endpoint("health") {
            Ok(url) => self.exchange(self.http.get(url)).await,
            Err(envelope) => envelope,
        }
    }

    /// Lists every account and writes the profiles to `path` as pretty printed JSON.
    ///
    /// Returns how many profiles were written.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend does not list the accounts or the file cannot be
    /// written.
    #[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub async fn export_accounts<P>(&self, path: P) -> Result<usize, RegistryClientError>
    where
        P: AsRef<Path>,
    {
        let envelope = self.list_accounts().await;

        if !envelope.is_success() {
            return Err(RegistryClientError::Export(envelope.message().to_owned().into()));
        }

        let profiles = envelope.into_data().unwrap_or_default();
        let bytes = serde_json::to_vec_pretty(&profiles)?;

        tokio::fs::write(path, bytes).await?;
        tracing::info!(count = profiles.len(), "exported accounts");

        Ok(profiles.len())
    }

    fn endpoint<T>(&self, path: &str) -> Result<Url, Envelope<T>> {
        self.base_url.join(path).map_err(|e| Envelope::failure_with_data(e.to_string(), None))
    }

    async fn exchange<T>(&self, request: RequestBuilder) -> Envelope<T>
    where
        T: DeserializeOwned,
    {
        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!("failed to reach backend: {e}");
                return Envelope::failure_with_data(e.to_string(), None);
            },
        };

        let status = response.status();
        tracing::debug!(%status, "backend answered");

        match response.text().await {
            Ok(body) => decode_envelope(&body),
            Err(e) => {
                tracing::error!(%status, "failed to read backend response: {e}");
                Envelope::failure_with_data(e.to_string(), None)
            },
        }
    }
}

/// Decodes a backend response body, whatever its status code.
fn decode_envelope<T>(body: &str) -> Envelope<T>
where
    T: DeserializeOwned,
{
    if body.trim().is_empty() {
        tracing::error!("backend returned an empty body");
        return Envelope::failure_with_data(EMPTY_RESPONSE, None);
    }

    serde_json::from_str(body).unwrap_or_else(|e| {
        tracing::error!("failed to parse backend response: {e}");
        Envelope::failure_with_data(INVALID_JSON_RESPONSE, None)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_gains_a_trailing_slash() {
        let client = RegistryClient::new(DEFAULT_BASE_URL).unwrap();

        assert_eq!(client.base_url().as_str(), "http://localhost:8081/api/");
        assert_eq!(
            client.base_url().join("users/signup").unwrap().as_str(),
            "http://localhost:8081/api/users/signup"
        );
    }

    #[test]
    fn non_http_base_urls_are_rejected() {
        assert!(matches!(
            RegistryClient::new("mailto:someone@example.com"),
            Err(RegistryClientError::InvalidBaseUrl(_))
        ));
        assert!(matches!(
            RegistryClient::new("not a url"),
            Err(RegistryClientError::InvalidBaseUrl(_))
        ));
    }

    #[test]
    fn empty_body_decodes_to_a_failure() {
        let envelope = decode_envelope::<Vec<AccountProfile>>("  \n");

        assert!(!envelope.is_success());
        assert_eq!(envelope.message(), EMPTY_RESPONSE);
    }

    #[test]
    fn html_body_decodes_to_a_failure() {
        let envelope = decode_envelope::<AccountProfile>("<html>Bad Gateway</html>");

        assert!(!envelope.is_success());
        assert_eq!(envelope.message(), INVALID_JSON_RESPONSE);
    }

    #[test]
    fn failure_body_keeps_the_backend_message() {
        let envelope = decode_envelope::<AccountProfile>(
            r#"{"success":false,"message":"Invalid username or password"}"#,
        );

        assert!(!envelope.is_success());
        assert_eq!(envelope.message(), "Invalid username or password");
        assert!(envelope.data().is_none());
    }

    #[test]
    fn success_body_carries_the_profile() {
        let envelope = decode_envelope::<AccountProfile>(
            r#"{
                "success": true,
                "message": "Login successful!",
                "data": {
                    "name": "Ann",
                    "mobileNumber": "9812345678",
                    "username": "ann1",
                    "createdAt": "2025-03-01T10:15:30.123Z"
                }
            }"#,
        );

        assert!(envelope.is_success());
        assert_eq!(envelope.into_data().unwrap().username(), "ann1");
    }

    #[test]
    fn signup_payload_uses_camel_case() {
        let payload = SignupPayload::builder()
            .name("Ann")
            .mobile_number("9812345678")
            .username("ann1")
            .password("pw1")
            .build();

        let json = serde_json::to_value(&payload).unwrap();

        assert_eq!(json["mobileNumber"], "9812345678");
        assert!(json.get("mobile_number").is_none());
    }

    #[tokio::test]
    async fn unreachable_backend_yields_a_failure_envelope() {
        let client = RegistryClient::new("http://127.0.0.1:9/api").unwrap();

        let envelope = client.list_accounts().await;

        assert!(!envelope.is_success());
        assert!(!envelope.message().is_empty());
    }
}
