//! Infrastructure layer - environment and collaborator implementations
//!
//! This module contains configuration loading and the deployers that ship
//! with the crate. Real deployers live in the host application.

pub mod config;
pub mod dry_run;

// Re-export infrastructure components
pub use config::*;
pub use dry_run::*;
