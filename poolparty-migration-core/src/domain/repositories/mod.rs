//! Domain repositories
//!
//! This module contains the traits for the external operations the
//! migration core depends on but does not implement.

pub mod deployment_repository;

// Re-export repositories
pub use deployment_repository::*;
