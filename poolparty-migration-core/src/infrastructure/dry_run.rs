//! Deployer that only logs what it would send
//!
//! Useful for wiring a host before the party factory contract is available:
//! every request is accepted, logged as JSON and kept for inspection.

use async_trait::async_trait;
use std::sync::Mutex;

use crate::domain::entities::{MigrationRequest, SourceToken, TokenInfo};
use crate::domain::repositories::{DeploymentReceipt, DeploymentRepository};
use crate::shared::error::SubmitError;
use crate::shared::utils::current_timestamp;

#[derive(Debug, Default)]
pub struct DryRunDeployer {
    submitted: Mutex<Vec<MigrationRequest>>,
}

impl DryRunDeployer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests accepted so far, oldest first
    pub fn submitted(&self) -> Vec<MigrationRequest> {
        self.submitted
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl DeploymentRepository for DryRunDeployer {
    async fn submit(
        &self,
        sources: &[SourceToken],
        identifier: &str,
        token_info: &TokenInfo,
    ) -> Result<DeploymentReceipt, SubmitError> {
        let request = MigrationRequest {
            sources: sources.to_vec(),
            identifier: identifier.to_string(),
            token_info: token_info.clone(),
        };
        let payload = request
            .to_json()
            .map_err(|e| SubmitError::transport(e.to_string()))?;
        log::info!("Dry run deployment: {}", payload);

        self.submitted
            .lock()
            .map_err(|_| SubmitError::transport("dry run log poisoned"))?
            .push(request);

        Ok(DeploymentReceipt {
            identifier: identifier.to_string(),
            transaction_hash: None,
            submitted_at: current_timestamp(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_dry_run_records_requests() {
        let deployer = DryRunDeployer::new();
        let sources = vec![SourceToken { address: "0xABC".to_string(), chain_id: 1 }];
        let token_info = TokenInfo {
            total_supply: 5,
            decimals: 2,
            name: "Pool".to_string(),
            symbol: "POOL".to_string(),
            is_ownable: false,
        };

        let receipt = deployer
            .submit(&sources, "dry-1", &token_info)
            .await
            .expect("Dry run should accept the request");

        assert_eq!(receipt.identifier, "dry-1");
        assert!(receipt.transaction_hash.is_none());

        let submitted = deployer.submitted();
        assert_eq!(submitted.len(), 1);
        assert_eq!(submitted[0].sources, sources);
        assert_eq!(submitted[0].token_info, token_info);
    }
}
