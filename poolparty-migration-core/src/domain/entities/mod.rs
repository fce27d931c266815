//! Domain entities and value objects
//!
//! This module contains the core domain entities and value objects
//! that represent the business concepts of a token migration.

pub mod source_token;
pub mod new_token;
pub mod migration_request;
pub mod network;
pub mod burn;

// Re-export entities
pub use source_token::*;
pub use new_token::*;
pub use migration_request::*;
pub use network::*;
pub use burn::*;
