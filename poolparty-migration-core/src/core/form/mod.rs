//! Migration form: the builder API hosts drive
//!
//! A [`MigrationForm`] owns the source rows, the new token parameters and
//! the submission state. Submitting is split in two so a host can keep
//! editing while the deployer runs:
//!
//! 1. [`MigrationForm::begin_submission`] assembles a request, enters
//!    `Submitting` and hands back a [`PendingSubmission`]
//! 2. the host awaits [`PendingSubmission::run`]
//! 3. [`MigrationForm::complete_submission`] records the outcome
//!
//! [`MigrationForm::assemble_and_submit`] does all three in one call.
//! A host that drops the run before step 3 calls
//! [`MigrationForm::abandon_submission`] so the form can submit again.

use serde::Serialize;

use crate::core::rows::RowCollection;
use crate::core::submission::{
    assemble, partition_rows, Assembly, AssemblyPolicy, ExcludedRow, PendingSubmission,
    SubmissionState,
};
use crate::domain::entities::{
    NetworkIdentity, NetworkStatus, NewTokenField, NewTokenFieldName, NewTokenParameters, RowId,
    SourceTokenEntry,
};
use crate::domain::repositories::{DeploymentReceipt, DeploymentRepository};
use crate::infrastructure::config::MigrationConfig;
use crate::shared::constants::MSG_SUBMISSION_ABANDONED;
use crate::shared::error::{MigrationError, SubmitError};
use crate::shared::types::{Identifier, MigrationResult};
use crate::shared::utils::generate_identifier;
use crate::shared::validation::FieldError;

/// Field a validation error belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FieldLocation {
    ChainId(RowId),
    NewToken(NewTokenFieldName),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldIssue {
    pub location: FieldLocation,
    pub error: FieldError,
}

/// Everything a host needs to decide whether to enable "Submit".
///
/// The network status is reported only; a mismatch does not clear `can_submit`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Readiness {
    pub includable_sources: usize,
    pub excluded: Vec<ExcludedRow>,
    pub field_errors: Vec<FieldIssue>,
    pub malformed_addresses: Vec<RowId>,
    pub network: NetworkStatus,
    pub network_notice: Option<String>,
    pub submitting: bool,
    pub can_submit: bool,
}

#[derive(Debug, Clone)]
pub struct MigrationForm {
    rows: RowCollection,
    new_token: NewTokenParameters,
    state: SubmissionState,
    notice: Option<String>,
    policy: AssemblyPolicy,
    identifier_prefix: String,
    identifier: Option<Identifier>,
    attempts: u64,
}

impl MigrationForm {
    /// Create a form with one empty row
    pub fn new(config: &MigrationConfig) -> Self {
        Self {
            rows: RowCollection::new(),
            new_token: NewTokenParameters::new(),
            state: SubmissionState::Idle,
            notice: None,
            policy: config.assembly_policy(),
            identifier_prefix: config.identifier_prefix.clone(),
            identifier: None,
            attempts: 0,
        }
    }

    pub fn rows(&self) -> &[SourceTokenEntry] {
        self.rows.rows()
    }

    pub fn row_collection(&self) -> &RowCollection {
        &self.rows
    }

    pub fn new_token(&self) -> &NewTokenParameters {
        &self.new_token
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    /// Top-level message: a blocked submission or a deployer failure
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Use a fixed correlation identifier instead of generating one per attempt
    pub fn set_identifier(&mut self, identifier: Option<Identifier>) {
        self.identifier = identifier;
    }

    pub fn add_row(&mut self) -> RowId {
        self.rows.add_row()
    }

    pub fn remove_row(&mut self, index: usize) -> MigrationResult<bool> {
        self.rows.remove_row(index)
    }

    pub fn remove_row_by_id(&mut self, id: RowId) -> MigrationResult<bool> {
        self.rows.remove_row_by_id(id)
    }

    pub fn update_address(&mut self, index: usize, text: impl Into<String>) -> MigrationResult<()> {
        self.rows.update_address(index, text)
    }

    pub fn update_chain_id(&mut self, index: usize, text: impl Into<String>) -> MigrationResult<()> {
        self.rows.update_chain_id(index, text)
    }

    pub fn update_new_token_field(&mut self, field: NewTokenField) {
        self.new_token.apply(field);
    }

    /// Every field currently showing an error
    pub fn field_errors(&self) -> Vec<FieldIssue> {
        let rows = self.rows.rows().iter().filter_map(|row| {
            row.chain_id_error().map(|error| FieldIssue {
                location: FieldLocation::ChainId(row.id()),
                error,
            })
        });
        let new_token = self
            .new_token
            .field_errors()
            .into_iter()
            .map(|(name, error)| FieldIssue {
                location: FieldLocation::NewToken(name),
                error,
            });
        rows.chain(new_token).collect()
    }

    /// Rows with address text that is not a well-formed address
    pub fn malformed_addresses(&self) -> Vec<RowId> {
        self.rows
            .rows()
            .iter()
            .filter(|row| row.has_address() && !row.is_address_well_formed())
            .map(|row| row.id())
            .collect()
    }

    /// Assemble without submitting
    pub fn preview(&self) -> MigrationResult<Assembly> {
        assemble(
            self.rows.rows(),
            &self.new_token,
            self.next_identifier(),
            &self.policy,
        )
    }

    pub fn readiness(&self, network: &NetworkIdentity) -> Readiness {
        let partition = partition_rows(self.rows.rows());
        let submitting = self.state.is_submitting();
        let network_status = network.status();

        let policy_ok = (!self.policy.strict_addresses || partition.malformed.is_empty())
            && (!self.policy.require_token_identity || self.new_token.has_identity());
        let can_submit = !partition.sources.is_empty()
            && !submitting
            && self.new_token.invalid_fields().is_empty()
            && policy_ok;

        Readiness {
            includable_sources: partition.sources.len(),
            excluded: partition.excluded,
            field_errors: self.field_errors(),
            malformed_addresses: self.malformed_addresses(),
            network: network_status,
            network_notice: network.notice(),
            submitting,
            can_submit,
        }
    }

    /// Capture the current request and enter `Submitting`.
    ///
    /// Fails with [`MigrationError::SubmissionInProgress`] while another
    /// attempt is running, and with the assembly error (the form goes back
    /// to `Idle` and shows it as the notice) when nothing can be sent.
    pub fn begin_submission(&mut self) -> MigrationResult<PendingSubmission> {
        if let SubmissionState::Submitting { attempt, .. } = &self.state {
            return Err(MigrationError::SubmissionInProgress(*attempt));
        }

        let assembly = match self.preview() {
            Ok(assembly) => assembly,
            Err(e) => {
                log::warn!("Migration submission blocked: {}", e);
                self.notice = Some(e.to_string());
                self.state = SubmissionState::Idle;
                return Err(e);
            }
        };

        self.attempts += 1;
        self.notice = None;
        self.state = SubmissionState::Submitting {
            attempt: self.attempts,
            identifier: assembly.request.identifier.clone(),
        };
        Ok(PendingSubmission::new(self.attempts, assembly))
    }

    /// Record the deployer's answer for `pending`.
    ///
    /// Rows and parameters are left as they are either way. A completion
    /// for an attempt that is no longer running is ignored.
    pub fn complete_submission(
        &mut self,
        pending: PendingSubmission,
        outcome: Result<DeploymentReceipt, SubmitError>,
    ) -> &SubmissionState {
        let attempt = pending.attempt();
        match &self.state {
            SubmissionState::Submitting { attempt: current, .. } if *current == attempt => {}
            _ => {
                log::warn!("Ignoring stale completion for attempt {}", attempt);
                return &self.state;
            }
        }

        self.state = match outcome {
            Ok(receipt) => {
                self.notice = None;
                SubmissionState::Succeeded { attempt, receipt }
            }
            Err(error) => {
                self.notice = Some(MigrationError::Submission(error.clone()).to_string());
                SubmissionState::Failed { attempt, error }
            }
        };
        &self.state
    }

    /// Give up on `attempt` without an answer from the deployer.
    ///
    /// A matching `Submitting` state becomes `Failed` with a transport
    /// error, so the next submit is accepted. Returns whether anything
    /// changed.
    pub fn abandon_submission(&mut self, attempt: u64) -> bool {
        match &self.state {
            SubmissionState::Submitting { attempt: current, .. } if *current == attempt => {}
            _ => return false,
        }

        log::warn!("Migration attempt {} abandoned before the deployer answered", attempt);
        let error = SubmitError::transport(MSG_SUBMISSION_ABANDONED);
        self.notice = Some(MigrationError::Submission(error.clone()).to_string());
        self.state = SubmissionState::Failed { attempt, error };
        true
    }

    /// Assemble, submit and record the outcome in one call.
    ///
    /// Dropping the returned future mid-flight abandons the attempt.
    pub async fn assemble_and_submit<D>(&mut self, deployer: &D) -> MigrationResult<SubmissionState>
    where
        D: DeploymentRepository + ?Sized,
    {
        let pending = self.begin_submission()?;
        let guard = AbandonOnDrop {
            attempt: Some(pending.attempt()),
            form: self,
        };
        let outcome = pending.run(deployer).await;
        Ok(guard.complete(pending, outcome))
    }

    fn next_identifier(&self) -> Identifier {
        self.identifier
            .clone()
            .unwrap_or_else(|| generate_identifier(&self.identifier_prefix))
    }
}

impl Default for MigrationForm {
    fn default() -> Self {
        Self::new(&MigrationConfig::default())
    }
}

/// Abandons a running attempt unless it is completed first
struct AbandonOnDrop<'a> {
    form: &'a mut MigrationForm,
    attempt: Option<u64>,
}

impl AbandonOnDrop<'_> {
    fn complete(
        mut self,
        pending: PendingSubmission,
        outcome: Result<DeploymentReceipt, SubmitError>,
    ) -> SubmissionState {
        self.attempt = None;
        self.form.complete_submission(pending, outcome).clone()
    }
}

impl Drop for AbandonOnDrop<'_> {
    fn drop(&mut self) {
        if let Some(attempt) = self.attempt.take() {
            self.form.abandon_submission(attempt);
        }
    }
}
