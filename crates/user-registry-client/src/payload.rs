use bon::Builder;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Body of a signup request.
#[derive(Debug, Clone, Builder, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupPayload {
    #[builder(into)]
    name: String,

    #[builder(into)]
    mobile_number: String,

    #[builder(into)]
    username: String,

    #[builder(into)]
    password: String,
}

/// Body of a login request.
#[derive(Debug, Clone, Builder, Serialize)]
pub struct LoginPayload {
    #[builder(into)]
    username: String,

    #[builder(into)]
    password: String,
}

/// Liveness report returned by the backend health endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct HealthStatus {
    timestamp: DateTime<Utc>,
}

impl HealthStatus {
    /// When the backend produced the report.
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}
