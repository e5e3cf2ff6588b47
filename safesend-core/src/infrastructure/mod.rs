//! Infrastructure layer - external integrations
//!
//! This module contains the configuration loader and the adapters that reach
//! the outside world: the HTTP token catalog and the JSON-RPC chain provider.

pub mod catalog_http;
pub mod config;
pub mod rpc;

// Re-export infrastructure components
pub use catalog_http::HttpCatalogSource;
pub use config::SafeSendConfig;
pub use rpc::RpcChainProvider;
