//! Domain layer - entities and repositories
//!
//! This module contains the data model of a batch token transfer and the
//! ports the core uses to reach the chain and the token catalog.

pub mod entities;
pub mod repositories;

// Re-export domain components
pub use entities::*;
pub use repositories::*;
