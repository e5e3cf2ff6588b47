//! Constants for SafeSend
//!
//! This module contains all constants used throughout the crate.

/// Token list used by the hosted app
pub const DEFAULT_CATALOG_URL: &str =
    "https://raw.githubusercontent.com/berachain/metadata/refs/heads/main/src/tokens/mainnet.json";
pub const DEFAULT_RPC_URL: &str = "https://rpc.berachain.com";

// Performance constants
pub const DEFAULT_BALANCE_TIMEOUT_MS: u64 = 10_000; // milliseconds
pub const DEFAULT_LOG_LEVEL: &str = "info";

// ABI function signatures
pub const TRANSFER_SIGNATURE: &str = "transfer(address,uint256)";
pub const BALANCE_OF_SIGNATURE: &str = "balanceOf(address)";
pub const MULTI_SEND_SIGNATURE: &str = "multiSend(bytes)";

// ABI function selectors
pub const TRANSFER_SELECTOR: [u8; 4] = [0xa9, 0x05, 0x9c, 0xbb];
pub const BALANCE_OF_SELECTOR: [u8; 4] = [0x70, 0xa0, 0x82, 0x31];
pub const MULTI_SEND_SELECTOR: [u8; 4] = [0x8d, 0x80, 0xff, 0x0a];

// Address format
pub const ADDRESS_HEX_LENGTH: usize = 40;

/// `MultiSend` operation byte for a plain call
pub const MULTI_SEND_OPERATION_CALL: u8 = 0;

// Metric names
pub const METRIC_BALANCE_QUERY_FAILURES: &str = "safesend_balance_query_failures_total";
pub const METRIC_BATCHES_SUBMITTED: &str = "safesend_batches_submitted_total";
pub const METRIC_BATCH_SUBMISSION_FAILURES: &str = "safesend_batch_submission_failures_total";
