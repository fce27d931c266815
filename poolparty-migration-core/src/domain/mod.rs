//! Domain layer - entities and repositories
//!
//! This module contains the domain model of a token migration: source rows,
//! new token parameters, the assembled request and the networks involved.

pub mod entities;
pub mod repositories;

// Re-export domain components
pub use entities::*;
pub use repositories::*;
