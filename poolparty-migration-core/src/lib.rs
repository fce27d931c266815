//! Pool Party Migration Core
//!
//! Builder for pool party migration requests.
//! Collects source tokens and new token parameters, validates every field
//! as it is typed and assembles one request for an external deployer.
//!
//! ## Architecture
//!
//! - **Core**: Validation, rows, request assembly, form state, burn drafts
//! - **Domain**: Entities and the deployer trait
//! - **Infrastructure**: Environment config and a dry run deployer
//! - **Shared**: Common types, constants, and utilities
//!
//! ## Usage
//!
//! ```rust,no_run
//! use poolparty_migration_core::{DryRunDeployer, MigrationForm, NewTokenField};
//!
//! # async fn run() -> Result<(), poolparty_migration_core::MigrationError> {
//! let mut form = MigrationForm::default();
//! form.update_address(0, "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed")?;
//! form.update_chain_id(0, "1")?;
//! form.update_new_token_field(NewTokenField::Symbol("POOL".to_string()));
//!
//! let state = form.assemble_and_submit(&DryRunDeployer::new()).await?;
//! println!("{:?}", state);
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod domain;
pub mod infrastructure;
pub mod shared;

// Re-export specific components
pub use crate::core::{
    BurnDraft, FieldError, FieldIssue, FieldLocation, MigrationForm, MigrationSession, Readiness,
    SubmissionState, ValidatedField,
};

// Re-export domain entities
pub use crate::domain::entities::{
    chain_name, BurnIntent, KnownNetwork, MigrationRequest, NetworkIdentity, NetworkStatus, NewTokenField,
    RowId, SourceToken, TokenInfo,
};
pub use crate::domain::repositories::{DeploymentReceipt, DeploymentRepository};

// Re-export infrastructure and shared types
pub use crate::infrastructure::{DryRunDeployer, MigrationConfig};
pub use crate::shared::error::{MigrationError, SubmitError};
pub use crate::shared::types::MigrationResult;

/// Initialize logging; safe to call more than once
pub fn init() -> MigrationResult<()> {
    if env_logger::try_init().is_err() {
        log::debug!("Logger already initialized");
    }
    Ok(())
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Build an empty form from .env or safe defaults
pub fn init_migration_form() -> MigrationResult<MigrationForm> {
    let config = MigrationConfig::from_env()?;
    log::info!(
        "Migration form ready (expected chain {}, prefix {:?})",
        config.expected_chain_id,
        config.identifier_prefix
    );
    Ok(MigrationForm::new(&config))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_twice() {
        assert!(init().is_ok());
        assert!(init().is_ok());
    }

    #[test]
    fn test_form_flow_with_dry_run() {
        let mut form = MigrationForm::default();
        form.update_address(0, "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed")
            .expect("Failed to update address");
        form.update_chain_id(0, "1").expect("Failed to update chain id");

        let deployer = DryRunDeployer::new();
        let state = tokio_test::block_on(form.assemble_and_submit(&deployer))
            .expect("Submission should be attempted");

        assert!(matches!(state, SubmissionState::Succeeded { .. }));
        assert_eq!(deployer.submitted().len(), 1);
    }

    #[test]
    fn test_version_info() {
        assert_eq!(NAME, "poolparty-migration-core");
        assert!(!VERSION.is_empty());
    }
}
