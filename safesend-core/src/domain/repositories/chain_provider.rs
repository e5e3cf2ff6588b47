//! Chain access capability injected by the host wallet

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::entities::batch::TransferBatch;
use crate::shared::types::{Address, Bytes, ChainId, SafeSendResult, TransactionHash};

/// Chain provider trait
///
/// Read-only contract calls plus a single batch submission. Nothing in the
/// core depends on a particular wallet SDK beyond this trait.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChainProvider: Send + Sync {
    /// Chain the wallet is connected to
    fn chain_id(&self) -> ChainId;

    /// Address of the Safe holding the tokens
    fn holder(&self) -> Address;

    /// Execute a read-only call and return the raw return data
    async fn call(&self, to: Address, data: Bytes) -> SafeSendResult<Bytes>;

    /// Submit the whole batch as one atomic transaction
    async fn send(&self, batch: &TransferBatch) -> SafeSendResult<TransactionHash>;
}

#[async_trait]
impl<P: ChainProvider + ?Sized> ChainProvider for Arc<P> {
    fn chain_id(&self) -> ChainId {
        (**self).chain_id()
    }

    fn holder(&self) -> Address {
        (**self).holder()
    }

    async fn call(&self, to: Address, data: Bytes) -> SafeSendResult<Bytes> {
        (**self).call(to, data).await
    }

    async fn send(&self, batch: &TransferBatch) -> SafeSendResult<TransactionHash> {
        (**self).send(batch).await
    }
}
