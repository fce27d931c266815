//! Submission assembly and outcome tracking
//!
//! [`assemble`] turns the rows and new token parameters into a
//! [`MigrationRequest`]. A [`PendingSubmission`] owns that request, so
//! edits made while the deployer is running never reach it.

use serde::Serialize;

use crate::domain::entities::{
    ExclusionReason, MigrationRequest, NewTokenParameters, RowId, SourceToken, SourceTokenEntry,
};
use crate::domain::repositories::{DeploymentReceipt, DeploymentRepository};
use crate::shared::error::{MigrationError, SubmitError};
use crate::shared::types::{Identifier, MigrationResult};
use crate::shared::validation::is_address_well_formed;

/// Rules applied on top of the row filter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssemblyPolicy {
    /// Block when an included row has a malformed address
    pub strict_addresses: bool,
    /// Block when the new token has no name or symbol
    pub require_token_identity: bool,
}

/// A partially filled row left out of `sources`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExcludedRow {
    pub id: RowId,
    pub index: usize,
    pub reason: ExclusionReason,
}

/// Assembled request plus the rows that did not make it in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assembly {
    pub request: MigrationRequest,
    pub excluded: Vec<ExcludedRow>,
}

/// Rows split into what would be sent and what would not
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowPartition {
    pub sources: Vec<SourceToken>,
    pub excluded: Vec<ExcludedRow>,
    /// Included rows whose address fails the format check
    pub malformed: Vec<RowId>,
}

/// Apply the row filter.
///
/// Rows need a non-blank address and a parsed chain id. Untouched rows are
/// dropped quietly; partially filled ones land in `excluded`.
pub fn partition_rows(rows: &[SourceTokenEntry]) -> RowPartition {
    let mut partition = RowPartition::default();

    for (index, row) in rows.iter().enumerate() {
        match (row.exclusion_reason(), row.chain_id_value()) {
            (None, Some(chain_id)) => {
                let address = row.address().trim();
                if !is_address_well_formed(address) {
                    partition.malformed.push(row.id());
                }
                partition.sources.push(SourceToken {
                    address: address.to_string(),
                    chain_id,
                });
            }
            (Some(reason), _) if !row.is_untouched() => {
                partition.excluded.push(ExcludedRow {
                    id: row.id(),
                    index,
                    reason,
                });
            }
            _ => {}
        }
    }
    partition
}

/// Build the request for `rows` and `params`.
///
/// Nothing left after [`partition_rows`] is [`MigrationError::EmptyRequest`];
/// a decimals or supply field holding an error is
/// [`MigrationError::InvalidTokenFields`].
pub fn assemble(
    rows: &[SourceTokenEntry],
    params: &NewTokenParameters,
    identifier: Identifier,
    policy: &AssemblyPolicy,
) -> MigrationResult<Assembly> {
    let RowPartition {
        sources,
        excluded,
        malformed,
    } = partition_rows(rows);

    for row in &excluded {
        log::warn!("Excluding source {} from migration: {}", row.id, row.reason);
    }

    if sources.is_empty() {
        return Err(MigrationError::EmptyRequest);
    }
    let invalid_fields = params.invalid_fields();
    if !invalid_fields.is_empty() {
        return Err(MigrationError::InvalidTokenFields(invalid_fields));
    }
    if policy.strict_addresses && !malformed.is_empty() {
        return Err(MigrationError::MalformedAddresses(malformed));
    }
    if policy.require_token_identity && !params.has_identity() {
        return Err(MigrationError::MissingTokenIdentity);
    }

    Ok(Assembly {
        request: MigrationRequest {
            sources,
            identifier,
            token_info: params.to_token_info(),
        },
        excluded,
    })
}

/// Where a form is in its submit cycle
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting {
        attempt: u64,
        identifier: Identifier,
    },
    Succeeded {
        attempt: u64,
        receipt: DeploymentReceipt,
    },
    Failed {
        attempt: u64,
        error: SubmitError,
    },
}

impl SubmissionState {
    pub fn is_submitting(&self) -> bool {
        matches!(self, SubmissionState::Submitting { .. })
    }

    pub fn attempt(&self) -> Option<u64> {
        match self {
            SubmissionState::Idle => None,
            SubmissionState::Submitting { attempt, .. }
            | SubmissionState::Succeeded { attempt, .. }
            | SubmissionState::Failed { attempt, .. } => Some(*attempt),
        }
    }
}

/// An accepted submission waiting for the deployer
#[derive(Debug, Clone)]
pub struct PendingSubmission {
    attempt: u64,
    assembly: Assembly,
}

impl PendingSubmission {
    pub(crate) fn new(attempt: u64, assembly: Assembly) -> Self {
        Self { attempt, assembly }
    }

    pub fn attempt(&self) -> u64 {
        self.attempt
    }

    pub fn request(&self) -> &MigrationRequest {
        &self.assembly.request
    }

    pub fn excluded(&self) -> &[ExcludedRow] {
        &self.assembly.excluded
    }

    /// Hand the captured request to `deployer`
    pub async fn run<D>(&self, deployer: &D) -> Result<DeploymentReceipt, SubmitError>
    where
        D: DeploymentRepository + ?Sized,
    {
        let request = &self.assembly.request;
        log::info!(
            "Submitting migration {} (attempt {}, {} sources)",
            request.identifier,
            self.attempt,
            request.sources.len()
        );

        let result = deployer
            .submit(&request.sources, &request.identifier, &request.token_info)
            .await;

        match &result {
            Ok(receipt) => log::info!(
                "Migration {} deployed (tx: {})",
                request.identifier,
                receipt.transaction_hash.as_deref().unwrap_or("n/a")
            ),
            Err(e) => log::warn!("Migration {} failed: {}", request.identifier, e),
        }
        result
    }
}
