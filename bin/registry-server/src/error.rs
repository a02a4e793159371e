use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use user_registry_domain::Envelope;

#[derive(Debug, thiserror::Error)]
pub(crate) enum AppError {
    #[error("Invalid request payload: {0}")]
    InvalidPayload(#[from] JsonRejection),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let code = match self {
            AppError::InvalidPayload(_) => StatusCode::BAD_REQUEST,
        };

        tracing::warn!("client error: {self}");

        let envelope = Envelope::<()>::failure_with_data(self.to_string(), None);

        (code, Json(envelope)).into_response()
    }
}
