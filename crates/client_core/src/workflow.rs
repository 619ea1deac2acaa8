//! Shorten → check → extend orchestration with per-operation state.
//!
//! The three operations are independent: each has its own state machine and
//! the controller never holds its state lock across a network call, so they
//! can be in flight at the same time. Only Extend depends on another
//! operation, through the [`CheckedReference`] a successful Check leaves
//! behind.

use chrono::{DateTime, Utc};
use shared::{domain::ShortCode, protocol::UrlStatus};
use tokio::sync::{broadcast, Mutex};
use tracing::{debug, info};
use url::Url;

use crate::{
    api::ApiClient,
    error::ClientError,
    transform::{extract_code, transform_lifetime},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WorkflowOperation {
    Shorten,
    Check,
    Extend,
}

#[derive(Debug, Clone, PartialEq)]
pub enum OperationState<T> {
    Idle,
    Pending,
    Succeeded(T),
    Failed(ClientError),
}

impl<T> Default for OperationState<T> {
    fn default() -> Self {
        OperationState::Idle
    }
}

impl<T> OperationState<T> {
    pub fn is_pending(&self) -> bool {
        matches!(self, OperationState::Pending)
    }

    pub fn result(&self) -> Option<&T> {
        match self {
            OperationState::Succeeded(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ClientError> {
        match self {
            OperationState::Failed(err) => Some(err),
            _ => None,
        }
    }
}

/// Proof of a successful Check, required by Extend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckedReference {
    pub code: ShortCode,
    /// The short URL exactly as the user entered it.
    pub raw_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortenOutcome {
    pub original_url: String,
    pub short_url: String,
    /// Lifetime choice as submitted, e.g. `"30"` or `"forever"`.
    pub lifetime: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkflowState {
    pub shorten_input: String,
    pub check_input: String,
    pub shorten: OperationState<ShortenOutcome>,
    /// Latest known status of the checked URL. A successful Extend replaces it
    /// only while `checked` still names the extended code.
    pub check: OperationState<UrlStatus>,
    pub extend: OperationState<UrlStatus>,
    pub checked: Option<CheckedReference>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowEvent {
    Pending(WorkflowOperation),
    Succeeded(WorkflowOperation),
    Failed {
        operation: WorkflowOperation,
        error: ClientError,
    },
}

pub struct WorkflowController {
    client: ApiClient,
    inner: Mutex<WorkflowState>,
    events: broadcast::Sender<WorkflowEvent>,
}

impl WorkflowController {
    pub fn new(client: ApiClient) -> Self {
        let (events, _) = broadcast::channel(64);
        Self {
            client,
            inner: Mutex::new(WorkflowState::default()),
            events,
        }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<WorkflowEvent> {
        self.events.subscribe()
    }

    pub async fn snapshot(&self) -> WorkflowState {
        self.inner.lock().await.clone()
    }

    pub async fn checked_reference(&self) -> Option<CheckedReference> {
        self.inner.lock().await.checked.clone()
    }

    pub async fn set_shorten_input(&self, input: impl Into<String>) {
        self.inner.lock().await.shorten_input = input.into();
    }

    pub async fn set_check_input(&self, input: impl Into<String>) {
        self.inner.lock().await.check_input = input.into();
    }

    /// Shortens the current shorten input. The input is cleared on success
    /// and kept on failure.
    pub async fn shorten(&self, lifetime: &str, length: &str) -> Result<ShortenOutcome, ClientError> {
        let input = self.inner.lock().await.shorten_input.clone();
        let url = match validate_long_url(&input) {
            Ok(url) => url,
            Err(err) => {
                self.fail(WorkflowOperation::Shorten, err.clone()).await;
                return Err(err);
            }
        };

        self.begin(WorkflowOperation::Shorten).await;
        match self.client.shorten_url(&url, lifetime, length).await {
            Ok(response) => {
                let outcome = ShortenOutcome {
                    original_url: url,
                    short_url: response.url,
                    lifetime: lifetime.to_string(),
                    created_at: Utc::now(),
                };
                info!(short_url = %outcome.short_url, "url shortened");
                {
                    let mut guard = self.inner.lock().await;
                    guard.shorten_input.clear();
                    guard.shorten = OperationState::Succeeded(outcome.clone());
                }
                self.emit(WorkflowEvent::Succeeded(WorkflowOperation::Shorten));
                Ok(outcome)
            }
            Err(err) => {
                self.fail(WorkflowOperation::Shorten, err.clone()).await;
                Err(err)
            }
        }
    }

    /// Checks the current check input. On success the status and a
    /// [`CheckedReference`] for the literal input are stored and the input
    /// is cleared.
    pub async fn check(&self) -> Result<UrlStatus, ClientError> {
        let input = self.inner.lock().await.check_input.clone();
        let code = match validate_short_url(&input) {
            Ok(code) => code,
            Err(err) => {
                self.fail(WorkflowOperation::Check, err.clone()).await;
                return Err(err);
            }
        };

        self.begin(WorkflowOperation::Check).await;
        match self.client.check_url_status(&input).await {
            Ok(status) => {
                info!(code = %code, expired = status.expired, "url status checked");
                {
                    let mut guard = self.inner.lock().await;
                    guard.check_input.clear();
                    guard.check = OperationState::Succeeded(status.clone());
                    guard.checked = Some(CheckedReference {
                        code: ShortCode(code),
                        raw_url: input,
                    });
                }
                self.emit(WorkflowEvent::Succeeded(WorkflowOperation::Check));
                Ok(status)
            }
            Err(err) => {
                self.fail(WorkflowOperation::Check, err.clone()).await;
                Err(err)
            }
        }
    }

    /// Extends the lifetime of the last successfully checked URL.
    ///
    /// Fails with [`ClientError::NoPriorCheck`] without touching the network
    /// when nothing has been checked yet.
    pub async fn extend(&self, lifetime: &str) -> Result<UrlStatus, ClientError> {
        let Some(reference) = self.checked_reference().await else {
            self.fail(WorkflowOperation::Extend, ClientError::NoPriorCheck)
                .await;
            return Err(ClientError::NoPriorCheck);
        };

        let code = match extract_code(&reference.raw_url) {
            Ok(code) => ShortCode(code),
            Err(err) => {
                self.fail(WorkflowOperation::Extend, err.clone()).await;
                return Err(err);
            }
        };

        self.begin(WorkflowOperation::Extend).await;
        match self.client.extend_url_lifetime(code.as_str(), lifetime).await {
            Ok(status) => {
                info!(
                    code = %code,
                    lifetime_days = ?transform_lifetime(lifetime),
                    "url lifetime extended"
                );
                {
                    let mut guard = self.inner.lock().await;
                    guard.extend = OperationState::Succeeded(status.clone());
                    // A Check of another URL may have settled while this was in flight.
                    if guard.checked.as_ref().map(|r| &r.code) == Some(&code) {
                        guard.check = OperationState::Succeeded(status.clone());
                    }
                }
                self.emit(WorkflowEvent::Succeeded(WorkflowOperation::Extend));
                Ok(status)
            }
            Err(err) => {
                self.fail(WorkflowOperation::Extend, err.clone()).await;
                Err(err)
            }
        }
    }

    async fn begin(&self, operation: WorkflowOperation) {
        {
            let mut guard = self.inner.lock().await;
            match operation {
                WorkflowOperation::Shorten => guard.shorten = OperationState::Pending,
                WorkflowOperation::Check => guard.check = OperationState::Pending,
                WorkflowOperation::Extend => guard.extend = OperationState::Pending,
            }
        }
        self.emit(WorkflowEvent::Pending(operation));
    }

    async fn fail(&self, operation: WorkflowOperation, error: ClientError) {
        if error.is_user_error() {
            debug!(?operation, error = %error, "operation rejected locally");
        }
        {
            let mut guard = self.inner.lock().await;
            match operation {
                WorkflowOperation::Shorten => guard.shorten = OperationState::Failed(error.clone()),
                WorkflowOperation::Check => guard.check = OperationState::Failed(error.clone()),
                WorkflowOperation::Extend => guard.extend = OperationState::Failed(error.clone()),
            }
        }
        self.emit(WorkflowEvent::Failed { operation, error });
    }

    fn emit(&self, event: WorkflowEvent) {
        let _ = self.events.send(event);
    }
}

fn validate_long_url(input: &str) -> Result<String, ClientError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ClientError::validation("Please enter a URL"));
    }
    Url::parse(trimmed).map_err(|_| ClientError::validation("Please enter a valid URL"))?;
    Ok(trimmed.to_string())
}

fn validate_short_url(input: &str) -> Result<String, ClientError> {
    if input.trim().is_empty() {
        return Err(ClientError::validation("Please enter a short URL"));
    }
    extract_code(input).map_err(|_| ClientError::validation("Please enter a valid short URL"))
}

#[cfg(test)]
#[path = "tests/workflow_tests.rs"]
mod tests;
