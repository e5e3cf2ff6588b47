//! JSON-RPC chain provider
//!
//! Reads go through `eth_call`. A batch is submitted with one EIP-5792
//! `wallet_sendCalls` request from the Safe, which the wallet executes
//! atomically.

use async_trait::async_trait;
use ethers::providers::{Http, JsonRpcClient, Middleware, Provider};
use ethers::types::transaction::eip2718::TypedTransaction;
use ethers::types::TransactionRequest;
use serde_json::{json, Value};

use crate::domain::entities::batch::TransferBatch;
use crate::domain::repositories::chain_provider::ChainProvider;
use crate::infrastructure::config::SafeSendConfig;
use crate::shared::error::SafeSendError;
use crate::shared::types::{Address, Bytes, ChainId, SafeSendResult, TransactionHash, U256};
use crate::shared::utils::{bytes_to_hex, checksum_address};

pub const SEND_CALLS_METHOD: &str = "wallet_sendCalls";
pub const SEND_CALLS_VERSION: &str = "1.0";

/// Chain provider over an `ethers` JSON-RPC client
pub struct RpcChainProvider<C = Http> {
    provider: Provider<C>,
    chain_id: ChainId,
    safe: Address,
}

impl RpcChainProvider<Http> {
    /// Connect to `rpc_url`, asking the node for its chain id unless configured.
    pub async fn connect(config: &SafeSendConfig) -> SafeSendResult<Self> {
        let provider = Provider::<Http>::try_from(config.rpc_url.as_str())
            .map_err(|e| SafeSendError::config(format!("Failed to create HTTP provider: {}", e)))?;
        let safe = config.safe_address()?;

        let chain_id = match config.chain_id {
            Some(chain_id) => chain_id,
            None => {
                let reported = provider
                    .get_chainid()
                    .await
                    .map_err(|e| SafeSendError::network(format!("Failed to get chain id: {}", e)))?;
                chain_id_from(reported)?
            }
        };

        log::info!(
            "Connected to chain {} for Safe {}",
            chain_id,
            checksum_address(&safe)
        );
        Ok(Self::new(provider, chain_id, safe))
    }
}

impl<C: JsonRpcClient> RpcChainProvider<C> {
    pub fn new(provider: Provider<C>, chain_id: ChainId, safe: Address) -> Self {
        Self {
            provider,
            chain_id,
            safe,
        }
    }

    /// `wallet_sendCalls` parameters for the batch
    pub fn send_calls_params(&self, batch: &TransferBatch) -> Value {
        let calls: Vec<Value> = batch
            .iter()
            .map(|call| {
                json!({
                    "to": checksum_address(&call.to),
                    "value": format!("0x{:x}", call.value),
                    "data": bytes_to_hex(&call.data),
                })
            })
            .collect();

        json!({
            "version": SEND_CALLS_VERSION,
            "chainId": format!("0x{:x}", self.chain_id),
            "from": checksum_address(&self.safe),
            "atomicRequired": true,
            "calls": calls,
        })
    }
}

/// Narrow an `eth_chainId` answer to a chain id
fn chain_id_from(reported: U256) -> SafeSendResult<ChainId> {
    u64::try_from(reported)
        .map_err(|_| SafeSendError::network(format!("Chain id {} does not fit in 64 bits", reported)))
}

/// Batch identifier from a `wallet_sendCalls` response.
///
/// Older wallets answer with a bare string, newer ones with `{ "id": ... }`.
fn batch_id(response: &Value) -> Option<TransactionHash> {
    match response {
        Value::String(id) => Some(id.clone()),
        Value::Object(object) => object.get("id").and_then(Value::as_str).map(str::to_string),
        _ => None,
    }
}

#[async_trait]
impl<C: JsonRpcClient + 'static> ChainProvider for RpcChainProvider<C> {
    fn chain_id(&self) -> ChainId {
        self.chain_id
    }

    fn holder(&self) -> Address {
        self.safe
    }

    async fn call(&self, to: Address, data: Bytes) -> SafeSendResult<Bytes> {
        let tx: TypedTransaction = TransactionRequest::new().to(to).data(data).into();
        self.provider
            .call(&tx, None)
            .await
            .map_err(|e| SafeSendError::balance_query_failed(format!("eth_call to {}: {}", checksum_address(&to), e)))
    }

    async fn send(&self, batch: &TransferBatch) -> SafeSendResult<TransactionHash> {
        if batch.is_empty() {
            return Err(SafeSendError::EmptySelection);
        }

        let params = self.send_calls_params(batch);
        log::debug!("{} with {} calls", SEND_CALLS_METHOD, batch.len());

        let response: Value = self
            .provider
            .request(SEND_CALLS_METHOD, [params])
            .await
            .map_err(|e| SafeSendError::submission_failed(e.to_string()))?;

        batch_id(&response).ok_or_else(|| {
            SafeSendError::submission_failed(format!("Unexpected {} response: {}", SEND_CALLS_METHOD, response))
        })
    }
}
