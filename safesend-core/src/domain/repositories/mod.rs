//! Domain repositories
//!
//! Ports to the outside world: the host wallet's chain access and the token
//! catalog source.

pub mod chain_provider;
pub mod catalog_source;

// Re-export repositories
pub use chain_provider::*;
pub use catalog_source::*;
