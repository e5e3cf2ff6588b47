//! Configuration loading
//!
//! Layered: built-in defaults, then an optional config file, then
//! `SAFESEND_*` environment variables. A `.env` file is read first.

use config::{Config, Environment, File};
use dotenv::dotenv;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;
use std::time::Duration;

use crate::shared::constants::{
    DEFAULT_BALANCE_TIMEOUT_MS, DEFAULT_CATALOG_URL, DEFAULT_LOG_LEVEL, DEFAULT_RPC_URL,
};
use crate::shared::error::SafeSendError;
use crate::shared::types::{Address, ChainId, SafeSendResult};
use crate::shared::utils::parse_address;

pub const ENV_PREFIX: &str = "SAFESEND";
pub const CONFIG_FILE_VAR: &str = "SAFESEND_CONFIG_FILE";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafeSendConfig {
    pub catalog_url: String,
    pub rpc_url: String,
    /// Safe whose tokens are sent
    #[serde(default)]
    pub safe_address: Option<String>,
    /// Overrides the chain id reported by the RPC endpoint
    #[serde(default)]
    pub chain_id: Option<ChainId>,
    pub balance_timeout_ms: u64,
    pub log_level: String,
}

impl Default for SafeSendConfig {
    fn default() -> Self {
        Self {
            catalog_url: DEFAULT_CATALOG_URL.to_string(),
            rpc_url: DEFAULT_RPC_URL.to_string(),
            safe_address: None,
            chain_id: None,
            balance_timeout_ms: DEFAULT_BALANCE_TIMEOUT_MS,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl SafeSendConfig {
    /// Load from `.env`, the file named by `SAFESEND_CONFIG_FILE` and the environment.
    pub fn load() -> SafeSendResult<Self> {
        dotenv().ok();
        let path = env::var(CONFIG_FILE_VAR).ok();
        Self::load_with(path.as_deref().map(Path::new), ENV_PREFIX)
    }

    /// Load with an explicit config file and environment prefix.
    pub fn load_with(path: Option<&Path>, env_prefix: &str) -> SafeSendResult<Self> {
        let defaults = Self::default();
        let mut builder = Config::builder()
            .set_default("catalog_url", defaults.catalog_url)?
            .set_default("rpc_url", defaults.rpc_url)?
            .set_default("balance_timeout_ms", defaults.balance_timeout_ms)?
            .set_default("log_level", defaults.log_level)?;

        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(true));
        }

        let config: Self = builder
            .add_source(Environment::with_prefix(env_prefix).try_parsing(true))
            .build()?
            .try_deserialize()?;

        config.validate()?;
        log::debug!("Loaded configuration: {:?}", config);
        Ok(config)
    }

    pub fn validate(&self) -> SafeSendResult<()> {
        for (name, url) in [("catalog_url", &self.catalog_url), ("rpc_url", &self.rpc_url)] {
            reqwest::Url::parse(url)
                .map_err(|e| SafeSendError::config(format!("{} {:?} is not a valid URL: {}", name, url, e)))?;
        }

        if let Some(safe_address) = &self.safe_address {
            parse_address(safe_address)
                .map_err(|e| SafeSendError::config(format!("safe_address: {}", e)))?;
        }

        if self.balance_timeout_ms == 0 {
            return Err(SafeSendError::config("balance_timeout_ms must be greater than zero"));
        }

        Ok(())
    }

    pub fn safe_address(&self) -> SafeSendResult<Address> {
        let safe_address = self
            .safe_address
            .as_deref()
            .ok_or_else(|| SafeSendError::config("safe_address is not set"))?;
        parse_address(safe_address).map_err(|e| SafeSendError::config(format!("safe_address: {}", e)))
    }

    pub fn balance_timeout(&self) -> Duration {
        Duration::from_millis(self.balance_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = SafeSendConfig::load_with(None, "SAFESEND_TEST_DEFAULTS").unwrap();

        assert_eq!(config, SafeSendConfig::default());
        assert_eq!(config.balance_timeout(), Duration::from_secs(10));
        assert!(config.safe_address().is_err());
    }

    #[test]
    fn test_file_overrides_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
rpc_url = "http://localhost:8545"
safe_address = "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed"
chain_id = 80094
balance_timeout_ms = 2500
"#
        )
        .unwrap();

        let config = SafeSendConfig::load_with(Some(file.path()), "SAFESEND_TEST_FILE").unwrap();

        assert_eq!(config.rpc_url, "http://localhost:8545");
        assert_eq!(config.chain_id, Some(80094));
        assert_eq!(config.balance_timeout(), Duration::from_millis(2500));
        assert_eq!(config.catalog_url, DEFAULT_CATALOG_URL);
        assert_eq!(
            config.safe_address().unwrap(),
            parse_address("0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed").unwrap()
        );
    }

    #[test]
    fn test_environment_overrides_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, r#"log_level = "warn""#).unwrap();

        env::set_var("SAFESEND_TEST_ENV_LOG_LEVEL", "debug");
        env::set_var("SAFESEND_TEST_ENV_BALANCE_TIMEOUT_MS", "750");
        let config = SafeSendConfig::load_with(Some(file.path()), "SAFESEND_TEST_ENV").unwrap();
        env::remove_var("SAFESEND_TEST_ENV_LOG_LEVEL");
        env::remove_var("SAFESEND_TEST_ENV_BALANCE_TIMEOUT_MS");

        assert_eq!(config.log_level, "debug");
        assert_eq!(config.balance_timeout_ms, 750);
    }

    #[test]
    fn test_validation() {
        let mut config = SafeSendConfig::default();
        assert!(config.validate().is_ok());

        config.balance_timeout_ms = 0;
        assert!(matches!(config.validate(), Err(SafeSendError::Config(_))));

        let mut config = SafeSendConfig::default();
        config.rpc_url = "not a url".to_string();
        assert!(matches!(config.validate(), Err(SafeSendError::Config(_))));

        let mut config = SafeSendConfig::default();
        config.safe_address = Some("0x1234".to_string());
        assert!(matches!(config.validate(), Err(SafeSendError::Config(_))));
    }

    #[test]
    fn test_missing_config_file() {
        let result = SafeSendConfig::load_with(Some(Path::new("/nonexistent/safesend.toml")), "SAFESEND_TEST_MISSING");
        assert!(matches!(result, Err(SafeSendError::Config(_))));
    }
}
