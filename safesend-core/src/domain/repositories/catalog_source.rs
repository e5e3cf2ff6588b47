//! Token catalog source

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::entities::token::TokenList;
use crate::shared::types::SafeSendResult;

/// Catalog source trait
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetch the complete catalog document
    async fn fetch(&self) -> SafeSendResult<TokenList>;
}

#[async_trait]
impl<S: CatalogSource + ?Sized> CatalogSource for Arc<S> {
    async fn fetch(&self) -> SafeSendResult<TokenList> {
        (**self).fetch().await
    }
}

/// Catalog already held in memory
#[derive(Debug, Clone)]
pub struct StaticCatalogSource {
    list: TokenList,
}

impl StaticCatalogSource {
    pub fn new(list: TokenList) -> Self {
        Self { list }
    }

    pub fn from_json(json: &str) -> SafeSendResult<Self> {
        Ok(Self::new(serde_json::from_str(json)?))
    }
}

#[async_trait]
impl CatalogSource for StaticCatalogSource {
    async fn fetch(&self) -> SafeSendResult<TokenList> {
        Ok(self.list.clone())
    }
}
