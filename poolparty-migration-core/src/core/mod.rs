//! Core migration functionality
//!
//! This module contains the row collection, request assembly, the form
//! state machine and the migrate (burn) draft. Field validation lives in
//! [`crate::shared::validation`] so domain entities can use it.

pub mod rows;
pub mod submission;
pub mod form;
pub mod session;
pub mod burn;

pub use burn::BurnDraft;
pub use form::{FieldIssue, FieldLocation, MigrationForm, Readiness};
pub use rows::RowCollection;
pub use session::MigrationSession;
pub use submission::{
    assemble, partition_rows, Assembly, AssemblyPolicy, ExcludedRow, PendingSubmission,
    RowPartition, SubmissionState,
};
pub use crate::shared::validation::{validate_integer, FieldError, IntegerValue, ValidatedField};
