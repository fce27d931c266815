//! Error handling for the migration core
//!
//! This module defines the error types used throughout the migration core.
//! Per-field validation problems are *not* errors: they live on the field as
//! [`FieldError`](crate::shared::validation::FieldError) data.

use thiserror::Error;

use crate::domain::entities::{NewTokenFieldName, RowId};

/// Failure reported by the external submit capability
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Deployment rejected: {0}")]
    Rejected(String),
}

impl SubmitError {
    /// Create a transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    /// Create a rejection error
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected(message.into())
    }
}

/// Migration error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MigrationError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Row not found: index {index} (rows: {len})")]
    RowNotFound { index: usize, len: usize },

    #[error("Add at least one token with a contract address and a chain id.")]
    EmptyRequest,

    #[error("Malformed contract address in rows: {0:?}")]
    MalformedAddresses(Vec<RowId>),

    #[error("New token name and symbol are required.")]
    MissingTokenIdentity,

    #[error("Fix the new token fields before submitting: {0:?}")]
    InvalidTokenFields(Vec<NewTokenFieldName>),

    #[error("A submission is already in progress (attempt {0})")]
    SubmissionInProgress(u64),

    #[error("Submission failed: {0}")]
    Submission(#[from] SubmitError),
}

impl MigrationError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn row_not_found(index: usize, len: usize) -> Self {
        Self::RowNotFound { index, len }
    }

    /// Errors that stop a submission before the capability is called
    pub fn blocks_submission(&self) -> bool {
        matches!(
            self,
            Self::EmptyRequest
                | Self::MalformedAddresses(_)
                | Self::MissingTokenIdentity
                | Self::InvalidTokenFields(_)
        )
    }
}

impl From<serde_json::Error> for MigrationError {
    fn from(err: serde_json::Error) -> Self {
        Self::validation(format!("JSON error: {}", err))
    }
}
