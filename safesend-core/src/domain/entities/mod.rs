//! Domain entities and value objects
//!
//! This module contains the core domain entities and value objects
//! of a token batch transfer.

pub mod token;
pub mod selection;
pub mod batch;

// Re-export entities
pub use token::*;
pub use selection::*;
pub use batch::*;
