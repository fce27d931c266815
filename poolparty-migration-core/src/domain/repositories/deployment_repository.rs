//! Deployment repository: the submit capability
//!
//! The migration core never deploys anything itself. Hosts plug in an
//! implementation that sends the assembled request to the party factory.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::entities::{SourceToken, TokenInfo};
use crate::shared::error::SubmitError;
use crate::shared::types::Identifier;

/// What the deployer reports back for an accepted request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentReceipt {
    pub identifier: Identifier,
    pub transaction_hash: Option<String>,
    pub submitted_at: u64,
}

/// Deployment repository trait
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DeploymentRepository: Send + Sync {
    /// Deploy a migration for `sources` with the new token described by `token_info`
    async fn submit(
        &self,
        sources: &[SourceToken],
        identifier: &str,
        token_info: &TokenInfo,
    ) -> Result<DeploymentReceipt, SubmitError>;
}
