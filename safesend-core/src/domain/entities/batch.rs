//! Transfer batch entities
//!
//! A batch is the ordered list of contract calls handed to the wallet for
//! atomic execution.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::types::{Address, Bytes, TransactionHash, U256};
use crate::shared::utils::{bytes_to_hex, checksum_address};

/// One contract call of a batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallDescriptor {
    pub to: Address,
    pub value: U256,
    pub data: Bytes,
}

impl CallDescriptor {
    /// Token call carrying no native currency
    pub fn token_call(to: Address, data: Bytes) -> Self {
        Self {
            to,
            value: U256::zero(),
            data,
        }
    }
}

/// JSON form of a call as accepted by the Safe transaction APIs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseTransaction {
    pub to: String,
    pub value: String,
    pub data: String,
}

impl From<&CallDescriptor> for BaseTransaction {
    fn from(call: &CallDescriptor) -> Self {
        Self {
            to: checksum_address(&call.to),
            value: call.value.to_string(),
            data: bytes_to_hex(&call.data),
        }
    }
}

/// Ordered calls, one per token selection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransferBatch {
    pub calls: Vec<CallDescriptor>,
}

impl TransferBatch {
    pub fn new(calls: Vec<CallDescriptor>) -> Self {
        Self { calls }
    }

    pub fn len(&self) -> usize {
        self.calls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CallDescriptor> {
        self.calls.iter()
    }

    pub fn to_base_transactions(&self) -> Vec<BaseTransaction> {
        self.calls.iter().map(BaseTransaction::from).collect()
    }
}

/// Receipt of a batch accepted by the wallet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub id: Uuid,
    pub tx_hash: TransactionHash,
    pub call_count: usize,
    pub submitted_at: DateTime<Utc>,
}

impl Submission {
    pub fn new(tx_hash: impl Into<TransactionHash>, call_count: usize) -> Self {
        Self {
            id: Uuid::new_v4(),
            tx_hash: tx_hash.into(),
            call_count,
            submitted_at: Utc::now(),
        }
    }
}
