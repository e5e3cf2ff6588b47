//! Token entity for SafeSend
//!
//! Mirrors the token list JSON schema (camelCase field names).

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use crate::shared::types::{Address, ChainId, Decimals};
use crate::shared::utils::checksum_address;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    pub chain_id: ChainId,
    pub address: Address,
    pub name: String,
    pub symbol: String,
    pub decimals: Decimals,
    #[serde(rename = "logoURI", default, skip_serializing_if = "Option::is_none")]
    pub logo_uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<TokenExtensions>,
}

impl Token {
    /// EIP-55 rendering of the contract address.
    pub fn checksum_address(&self) -> String {
        checksum_address(&self.address)
    }

    /// Case-insensitive substring match on name or symbol.
    pub fn matches(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.name.to_lowercase().contains(&term) || self.symbol.to_lowercase().contains(&term)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenExtensions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coingecko_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pyth_price_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagInfo {
    pub name: String,
    pub description: String,
}

/// Catalog document as published by the token list source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenList {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "logoURI", default, skip_serializing_if = "Option::is_none")]
    pub logo_uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<HashMap<String, TagInfo>>,
    pub tokens: Vec<CatalogEntry>,
}

impl TokenList {
    pub fn new(name: impl Into<String>, tokens: Vec<Token>) -> Self {
        Self {
            name: name.into(),
            logo_uri: None,
            tags: None,
            tokens: tokens.into_iter().map(CatalogEntry::Token).collect(),
        }
    }

    /// Tokens of `chain_id` in catalog order.
    ///
    /// Entries of that chain that do not fit the token schema are skipped
    /// with a warning. Entries of other chains are never inspected.
    pub fn tokens_for(&self, chain_id: ChainId) -> Vec<Token> {
        self.tokens
            .iter()
            .filter(|entry| entry.chain_id() == Some(chain_id))
            .filter_map(|entry| match entry {
                CatalogEntry::Token(token) => Some(token.clone()),
                CatalogEntry::Unparsed(raw) => {
                    log::warn!("Skipping malformed catalog entry for chain {}: {}", chain_id, raw);
                    None
                }
            })
            .collect()
    }
}

/// One element of a catalog's `tokens` array.
///
/// Lists cover many chains, some with non-EVM addresses, so an element that
/// does not parse as a [`Token`] is kept raw instead of failing the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CatalogEntry {
    Token(Token),
    Unparsed(Value),
}

impl CatalogEntry {
    pub fn chain_id(&self) -> Option<ChainId> {
        match self {
            Self::Token(token) => Some(token.chain_id),
            Self::Unparsed(raw) => raw.get("chainId").and_then(Value::as_u64),
        }
    }

    pub fn token(&self) -> Option<&Token> {
        match self {
            Self::Token(token) => Some(token),
            Self::Unparsed(_) => None,
        }
    }
}

impl From<Token> for CatalogEntry {
    fn from(token: Token) -> Self {
        Self::Token(token)
    }
}
