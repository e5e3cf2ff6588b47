use std::collections::HashMap;

pub use ethers::types::{Address, Bytes, U256};

// Basic types for token operations
pub type ChainId = u64;
pub type Decimals = u8;
/// Human readable decimal amount, e.g. `"2.5"`.
pub type HumanAmount = String;
/// Provider-returned transaction or Safe transaction hash.
pub type TransactionHash = String;

/// Raw token balances keyed by token contract address.
pub type BalanceMap = HashMap<Address, U256>;

// Result types for better error handling
pub type SafeSendResult<T> = Result<T, crate::shared::error::SafeSendError>;
