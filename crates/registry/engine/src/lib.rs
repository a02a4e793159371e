#![allow(missing_docs)]

mod error;
pub mod selector;
mod types;
pub mod validation;

pub use self::{
    error::{AccountServiceError, Operation},
    types::{request, response},
};

use std::sync::Arc;

use chrono::{SubsecRound, Utc};
use user_registry_domain::{AccountProfile, AccountRecord, Envelope, FailureKind};
use user_registry_store::RecordStore;

use self::types::{
    request::{LoginRequest, LoginRequestDissolved, SignupRequest, SignupRequestDissolved},
    response::{ListAccountsResponse, LoginResponse, SignupResponse},
};

/// Registers, authenticates and lists accounts on top of a [`RecordStore`].
///
/// Every operation returns an [`Envelope`]; failures never escape as errors. The service
/// behaves identically whichever store it was built with.
#[derive(Clone)]
pub struct AccountService {
    store: Arc<dyn RecordStore>,
}

impl AccountService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    pub fn from_store<S>(store: S) -> Self
    where
        S: RecordStore + 'static,
    {
        Self::new(Arc::new(store))
    }

    #[tracing::instrument(skip_all, fields(username = request.username()))]
    pub async fn signup(&self, request: SignupRequest) -> SignupResponse {
        let result = self.try_signup(request).await.map(AccountProfile::from);

        into_envelope(result, "Account created successfully!")
    }

    #[tracing::instrument(skip_all, fields(username = request.username()))]
    pub async fn login(&self, request: LoginRequest) -> LoginResponse {
        let result = self.try_login(request).await.map(AccountProfile::from);

        into_envelope(result, "Login successful!")
    }

    #[tracing::instrument(skip_all)]
    pub async fn list_accounts(&self) -> ListAccountsResponse {
        let result = self
            .store
            .load_all()
            .await
            .map(|records| records.into_iter().map(AccountProfile::from).collect())
            .map_err(AccountServiceError::store(Operation::ListAccounts));

        into_envelope(result, "Users retrieved successfully")
    }

    async fn try_signup(&self, request: SignupRequest) -> Result<AccountRecord, AccountServiceError> {
        let SignupRequestDissolved { name, mobile_number, username, password } = request.dissolve();

        validation::check_required_fields(&name, &mobile_number, &username, &password)?;
        validation::check_mobile_number(&mobile_number)?;

        let mut records = self
            .store
            .load_all()
            .await
            .map_err(AccountServiceError::store(Operation::Signup))?;

        if records.iter().any(|record| record.conflicts_with(&username, &mobile_number)) {
            return Err(AccountServiceError::DuplicateAccount);
        }

        let record = AccountRecord::builder()
            .name(name)
            .mobile_number(mobile_number)
            .username(username)
            .password(password)
            // persisted with millisecond precision
            .created_at(Utc::now().trunc_subsecs(3))
            .build();

        records.push(record.clone());

        self.store
            .save_all(&records)
            .await
            .map_err(AccountServiceError::store(Operation::Signup))?;

        tracing::info!(total = records.len(), "account created");

        Ok(record)
    }

    async fn try_login(&self, request: LoginRequest) -> Result<AccountRecord, AccountServiceError> {
        let LoginRequestDissolved { username, password } = request.dissolve();

        validation::check_credentials(&username, &password)?;

        self.store
            .load_all()
            .await
            .map_err(AccountServiceError::store(Operation::Login))?
            .into_iter()
            .find(|record| record.matches_credentials(&username, &password))
            .ok_or(AccountServiceError::InvalidCredentials)
    }
}

fn into_envelope<T>(result: Result<T, AccountServiceError>, message: &'static str) -> Envelope<T> {
    match result {
        Ok(data) => Envelope::success(message, data),
        Err(e) => {
            let kind = e.kind();

            match kind {
                FailureKind::Storage => tracing::error!(failure = %kind, "{e}"),
                _ => tracing::warn!(failure = %kind, "{e}"),
            }

            Envelope::failure(kind, e.to_string())
        },
    }
}
