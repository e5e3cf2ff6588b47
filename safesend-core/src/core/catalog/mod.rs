//! Token catalog loading
//!
//! Fetches the token list once per chain context and keeps only the entries
//! for the active chain, in catalog order.

use crate::domain::entities::token::Token;
use crate::domain::repositories::catalog_source::CatalogSource;
use crate::shared::error::SafeSendError;
use crate::shared::types::{ChainId, SafeSendResult};

/// Catalog loader over any catalog source
pub struct CatalogLoader<S> {
    source: S,
}

impl<S: CatalogSource> CatalogLoader<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Tokens of `chain_id`. Any fetch or parse failure is `CatalogUnavailable`.
    pub async fn load(&self, chain_id: ChainId) -> SafeSendResult<Vec<Token>> {
        let list = self.source.fetch().await.map_err(|e| match e {
            SafeSendError::CatalogUnavailable(_) => e,
            other => SafeSendError::catalog_unavailable(other.to_string()),
        })?;

        let total = list.tokens.len();
        let tokens = list.tokens_for(chain_id);

        log::info!(
            "Loaded {} of {} catalog tokens for chain {}",
            tokens.len(),
            total,
            chain_id
        );
        Ok(tokens)
    }
}

/// Tokens whose name or symbol contains `term`, ignoring case.
pub fn search<'a>(tokens: &'a [Token], term: &str) -> Vec<&'a Token> {
    let term = term.trim();
    tokens.iter().filter(|token| token.matches(term)).collect()
}
