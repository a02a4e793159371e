use bon::Builder;
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Builder, Serialize)]
pub struct HealthResponsePayload {
    timestamp: DateTime<Utc>,
}
