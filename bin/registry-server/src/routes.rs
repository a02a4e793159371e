use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use chrono::Utc;
use user_registry_domain::{Envelope, FailureKind};
use user_registry_engine::{
    request::{LoginRequest, SignupRequest},
    response::{ListAccountsResponse, LoginResponse, SignupResponse},
};

use crate::{
    App, AppDissolved,
    error::AppError,
    payload::{
        request::{
            LoginRequestPayload, LoginRequestPayloadDissolved, SignupRequestPayload,
            SignupRequestPayloadDissolved,
        },
        response::HealthResponsePayload,
    },
};

#[tracing::instrument]
pub async fn health() -> Json<Envelope<HealthResponsePayload>> {
    let payload = HealthResponsePayload::builder().timestamp(Utc::now()).build();

    Json(Envelope::success("Backend is running", payload))
}

#[tracing::instrument(skip_all)]
pub async fn signup(
    State(app): State<App>,
    payload: Result<Json<SignupRequestPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<SignupResponse>), AppError> {
    let AppDissolved { service } = app.dissolve();

    let Json(payload) = payload?;
    let SignupRequestPayloadDissolved { name, mobile_number, username, password } =
        payload.dissolve();

    let request = SignupRequest::builder()
        .name(name)
        .mobile_number(mobile_number)
        .username(username)
        .password(password)
        .build();

    let response = service.signup(request).await;

    Ok((status_code(&response), Json(response)))
}

#[tracing::instrument(skip_all)]
pub async fn login(
    State(app): State<App>,
    payload: Result<Json<LoginRequestPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<LoginResponse>), AppError> {
    let AppDissolved { service } = app.dissolve();

    let Json(payload) = payload?;
    let LoginRequestPayloadDissolved { username, password } = payload.dissolve();

    let request = LoginRequest::builder().username(username).password(password).build();

    let response = service.login(request).await;

    Ok((status_code(&response), Json(response)))
}

#[tracing::instrument(skip_all)]
pub async fn list_accounts(State(app): State<App>) -> (StatusCode, Json<ListAccountsResponse>) {
    let AppDissolved { service } = app.dissolve();

    let response = service.list_accounts().await;

    (status_code(&response), Json(response))
}

fn status_code<T>(envelope: &Envelope<T>) -> StatusCode {
    match envelope.failure_kind() {
        None => StatusCode::OK,
        Some(FailureKind::Validation | FailureKind::Conflict) => StatusCode::BAD_REQUEST,
        Some(FailureKind::Unauthorized) => StatusCode::UNAUTHORIZED,
        Some(FailureKind::Storage) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
