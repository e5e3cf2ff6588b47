//! SafeSend Core
//!
//! Batch ERC20 transfers out of a Safe multisig.
//!
//! ## Architecture
//!
//! - **Core**: Amount codec, balance reader, batch builder, catalog loader, send session
//! - **Domain**: Tokens, selections, batches and the chain/catalog ports
//! - **Infrastructure**: Configuration, HTTP catalog, JSON-RPC provider
//! - **Shared**: Common types, constants, errors and utilities
//!
//! ## Usage
//!
//! ```rust,no_run
//! use safesend_core::{init_safesend_core, SafeSendConfig};
//!
//! # async fn run() -> Result<(), safesend_core::SafeSendError> {
//! let config = SafeSendConfig::load()?;
//! let mut core = init_safesend_core(config).await?;
//! core.refresh().await?;
//!
//! let token = core.session().tokens()[0].clone();
//! core.session_mut().select(token, "2.5")?;
//! core.session_mut().set_recipient("0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed");
//! let submission = core.session_mut().submit().await?;
//! println!("Submitted {}", submission.tx_hash);
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

// Re-export main modules for easy access
pub mod core;
pub mod domain;
pub mod infrastructure;
pub mod shared;

use crate::domain::repositories::catalog_source::CatalogSource;
use crate::domain::repositories::chain_provider::ChainProvider;

// Re-export specific components
pub use crate::core::amounts::{format_units, to_human, to_raw};
pub use crate::core::balances::BalanceReader;
pub use crate::core::batch::{encode_multi_send, encode_transfer, TransferBatchBuilder};
pub use crate::core::catalog::CatalogLoader;
pub use crate::core::session::SendSession;

// Re-export domain entities
pub use crate::domain::entities::batch::{BaseTransaction, CallDescriptor, Submission, TransferBatch};
pub use crate::domain::entities::selection::{SelectionSet, TokenSelection};
pub use crate::domain::entities::token::{CatalogEntry, Token, TokenList};

// Re-export infrastructure and shared types
pub use crate::infrastructure::{HttpCatalogSource, RpcChainProvider, SafeSendConfig};
pub use crate::shared::error::SafeSendError;
pub use crate::shared::types::{Address, BalanceMap, ChainId, SafeSendResult, U256};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Initialize `env_logger` at `level` unless `RUST_LOG` says otherwise.
///
/// Safe to call more than once; later calls are ignored.
pub fn init_logging(level: &str) {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).try_init();
}

/// Connect to the configured RPC endpoint and catalog
pub async fn init_safesend_core(
    config: SafeSendConfig,
) -> SafeSendResult<SafeSendCore<HttpCatalogSource, Arc<RpcChainProvider>>> {
    init_logging(&config.log_level);
    log::info!("Starting {} v{}", NAME, VERSION);

    let provider = Arc::new(RpcChainProvider::connect(&config).await?);
    let source = HttpCatalogSource::new(config.catalog_url.clone());
    Ok(SafeSendCore::from_parts(config, source, provider))
}

/// Main SafeSend struct wiring the catalog, the provider and the session
pub struct SafeSendCore<S, P> {
    config: SafeSendConfig,
    loader: CatalogLoader<S>,
    reader: BalanceReader<P>,
    session: SendSession<P>,
}

impl<S, P> SafeSendCore<S, P>
where
    S: CatalogSource,
    P: ChainProvider + Clone,
{
    pub fn from_parts(config: SafeSendConfig, source: S, provider: P) -> Self {
        let reader = BalanceReader::new(provider.clone()).with_timeout(config.balance_timeout());
        Self {
            config,
            loader: CatalogLoader::new(source),
            reader,
            session: SendSession::new(provider),
        }
    }

    pub fn config(&self) -> &SafeSendConfig {
        &self.config
    }

    /// Reload the catalog, then the Safe's balances. Returns the token count.
    pub async fn refresh(&mut self) -> SafeSendResult<usize> {
        self.session.load_tokens(&self.loader).await?;
        self.session.load_balances(&self.reader).await;
        Ok(self.session.tokens().len())
    }

    pub fn session(&self) -> &SendSession<P> {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut SendSession<P> {
        &mut self.session
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::catalog_source::StaticCatalogSource;
    use crate::domain::repositories::chain_provider::MockChainProvider;

    const CATALOG: &str = r#"{
        "name": "Test list",
        "tokens": [
            { "chainId": 80094, "address": "0x0000000000000000000000000000000000000001", "name": "Honey", "symbol": "HONEY", "decimals": 18 },
            { "chainId": 1, "address": "0x0000000000000000000000000000000000000002", "name": "Tether", "symbol": "USDT", "decimals": 6 }
        ]
    }"#;

    #[tokio::test]
    async fn test_refresh_loads_tokens_and_balances() {
        let mut provider = MockChainProvider::new();
        provider.expect_chain_id().return_const(80094u64);
        provider.expect_holder().return_const(Address::repeat_byte(0x5a));
        provider
            .expect_call()
            .times(1)
            .returning(|_, _| Ok(ethers::abi::encode(&[ethers::abi::Token::Uint(U256::exp10(18))]).into()));

        let source = StaticCatalogSource::from_json(CATALOG).unwrap();
        let mut core = SafeSendCore::from_parts(SafeSendConfig::default(), source, Arc::new(provider));

        assert_eq!(core.refresh().await.unwrap(), 1);
        let honey = core.session().tokens()[0].clone();
        assert_eq!(core.session().formatted_balance(&honey), "1");
        assert_eq!(core.config().balance_timeout_ms, 10_000);
    }

    #[test]
    fn test_init_logging_twice() {
        init_logging("debug");
        init_logging("info");
        assert_eq!(NAME, "safesend-core");
    }
}
