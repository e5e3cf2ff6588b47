//! ERC20 balance reader
//!
//! One read-only `balanceOf` call per token, all in flight at once. A failed,
//! malformed or timed out query degrades to a zero balance for that token
//! only and is reported through the log and the failure counter.

use ethers::abi::{self, ParamType, Token as AbiToken};
use futures::future::join_all;
use std::time::Duration;

use crate::domain::entities::token::Token;
use crate::domain::repositories::chain_provider::ChainProvider;
use crate::shared::constants::{BALANCE_OF_SELECTOR, DEFAULT_BALANCE_TIMEOUT_MS, METRIC_BALANCE_QUERY_FAILURES};
use crate::shared::error::SafeSendError;
use crate::shared::types::{Address, BalanceMap, Bytes, SafeSendResult, U256};
use crate::shared::utils::checksum_address;

/// Balance reader for a chain provider
pub struct BalanceReader<P> {
    provider: P,
    timeout: Duration,
}

impl<P: ChainProvider> BalanceReader<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            timeout: Duration::from_millis(DEFAULT_BALANCE_TIMEOUT_MS),
        }
    }

    /// Bound every single query by `timeout`
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Raw balance of `holder` in `token`. Never fails; errors read as zero.
    pub async fn balance_of(&self, token: Address, holder: Address) -> U256 {
        match self.query(token, holder).await {
            Ok(balance) => balance,
            Err(e) => {
                log::warn!(
                    "Balance query for token {} failed, showing zero: {}",
                    checksum_address(&token),
                    e
                );
                metrics::counter!(METRIC_BALANCE_QUERY_FAILURES).increment(1);
                U256::zero()
            }
        }
    }

    /// Balances for every token, returned once all queries have finished.
    pub async fn load_all(&self, tokens: &[Token], holder: Address) -> BalanceMap {
        log::info!("Loading balances for {} tokens", tokens.len());

        let queries = tokens.iter().map(|token| async move {
            let balance = self.balance_of(token.address, holder).await;
            (token.address, balance)
        });

        let balances: BalanceMap = join_all(queries).await.into_iter().collect();
        log::debug!("Loaded {} balances", balances.len());
        balances
    }

    async fn query(&self, token: Address, holder: Address) -> SafeSendResult<U256> {
        let call = self.provider.call(token, encode_balance_of(holder));
        let data = tokio::time::timeout(self.timeout, call).await.map_err(|_| {
            SafeSendError::balance_query_failed(format!("timed out after {:?}", self.timeout))
        })??;
        decode_uint256(&data)
    }
}

/// ABI-encode `balanceOf(address)`
pub fn encode_balance_of(holder: Address) -> Bytes {
    let mut data = BALANCE_OF_SELECTOR.to_vec();
    data.extend(abi::encode(&[AbiToken::Address(holder)]));
    Bytes::from(data)
}

/// Decode a single `uint256` return value
pub fn decode_uint256(data: &[u8]) -> SafeSendResult<U256> {
    let mut tokens = abi::decode(&[ParamType::Uint(256)], data)
        .map_err(|e| SafeSendError::balance_query_failed(format!("Malformed balanceOf response: {}", e)))?;
    match tokens.pop() {
        Some(AbiToken::Uint(value)) => Ok(value),
        _ => Err(SafeSendError::balance_query_failed("balanceOf returned no uint256")),
    }
}
