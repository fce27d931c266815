//! Shared handle to a migration form
//!
//! The lock is only held while reading or editing the form, never while the
//! deployer runs, so edits keep working during a submission.

use std::sync::Arc;
use tokio::sync::RwLock;

use crate::core::form::{MigrationForm, Readiness};
use crate::core::submission::SubmissionState;
use crate::domain::entities::{NetworkIdentity, NewTokenField, RowId};
use crate::domain::repositories::DeploymentRepository;
use crate::shared::types::MigrationResult;

#[derive(Debug, Clone)]
pub struct MigrationSession {
    form: Arc<RwLock<MigrationForm>>,
}

impl MigrationSession {
    pub fn new(form: MigrationForm) -> Self {
        Self {
            form: Arc::new(RwLock::new(form)),
        }
    }

    /// Copy of the form as it is right now
    pub async fn snapshot(&self) -> MigrationForm {
        self.form.read().await.clone()
    }

    pub async fn state(&self) -> SubmissionState {
        self.form.read().await.state().clone()
    }

    pub async fn readiness(&self, network: &NetworkIdentity) -> Readiness {
        self.form.read().await.readiness(network)
    }

    pub async fn add_row(&self) -> RowId {
        self.form.write().await.add_row()
    }

    pub async fn remove_row(&self, index: usize) -> MigrationResult<bool> {
        self.form.write().await.remove_row(index)
    }

    pub async fn update_address(&self, index: usize, text: impl Into<String>) -> MigrationResult<()> {
        self.form.write().await.update_address(index, text)
    }

    pub async fn update_chain_id(&self, index: usize, text: impl Into<String>) -> MigrationResult<()> {
        self.form.write().await.update_chain_id(index, text)
    }

    pub async fn update_new_token_field(&self, field: NewTokenField) {
        self.form.write().await.update_new_token_field(field);
    }

    /// Submit the form through `deployer`.
    ///
    /// A second call while one is running gets
    /// [`MigrationError::SubmissionInProgress`](crate::shared::error::MigrationError::SubmissionInProgress).
    /// Dropping the future before the deployer answers (a timeout, an
    /// aborted task) abandons the attempt.
    pub async fn submit<D>(&self, deployer: &D) -> MigrationResult<SubmissionState>
    where
        D: DeploymentRepository + ?Sized,
    {
        let pending = self.form.write().await.begin_submission()?;
        let mut guard = AbandonGuard {
            form: Arc::clone(&self.form),
            attempt: Some(pending.attempt()),
        };
        let outcome = pending.run(deployer).await;
        let mut form = self.form.write().await;
        guard.attempt = None;
        Ok(form.complete_submission(pending, outcome).clone())
    }
}

/// Abandons a running attempt if `submit` is dropped before completing it
struct AbandonGuard {
    form: Arc<RwLock<MigrationForm>>,
    attempt: Option<u64>,
}

impl Drop for AbandonGuard {
    fn drop(&mut self) {
        let Some(attempt) = self.attempt.take() else {
            return;
        };

        if let Ok(mut form) = self.form.try_write() {
            form.abandon_submission(attempt);
            return;
        }

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                let form = Arc::clone(&self.form);
                handle.spawn(async move {
                    form.write().await.abandon_submission(attempt);
                });
            }
            Err(_) => log::error!(
                "Cannot abandon migration attempt {}: form is locked and no runtime is available",
                attempt
            ),
        }
    }
}

impl Default for MigrationSession {
    fn default() -> Self {
        Self::new(MigrationForm::default())
    }
}
