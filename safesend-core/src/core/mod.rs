//! Core SafeSend functionality
//!
//! This module contains the amount codec, the balance reader, the transfer
//! batch builder, the catalog loader and the session that ties them together.

pub mod amounts;
pub mod balances;
pub mod batch;
pub mod catalog;
pub mod session;
