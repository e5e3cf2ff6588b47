//! Send session
//!
//! In-memory state of one batch transfer: the chain's token catalog, the
//! Safe's balances, the user's selections and the recipient. Drives the
//! catalog loader, the balance reader, the batch builder and the provider's
//! batch submission.

use crate::core::amounts::{format_units, to_raw};
use crate::core::balances::BalanceReader;
use crate::core::batch::TransferBatchBuilder;
use crate::core::catalog::{search, CatalogLoader};
use crate::domain::entities::batch::Submission;
use crate::domain::entities::selection::{SelectionSet, TokenSelection};
use crate::domain::entities::token::Token;
use crate::domain::repositories::catalog_source::CatalogSource;
use crate::domain::repositories::chain_provider::ChainProvider;
use crate::shared::constants::{METRIC_BATCHES_SUBMITTED, METRIC_BATCH_SUBMISSION_FAILURES};
use crate::shared::error::SafeSendError;
use crate::shared::types::{Address, BalanceMap, SafeSendResult, U256};
use crate::shared::utils::is_valid_address;

const MISSING_INPUT_MESSAGE: &str = "Please select at least one token and enter a recipient address";

pub struct SendSession<P> {
    provider: P,
    tokens: Vec<Token>,
    balances: BalanceMap,
    selections: SelectionSet,
    recipient: String,
    error: Option<String>,
}

impl<P: ChainProvider> SendSession<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            tokens: Vec::new(),
            balances: BalanceMap::new(),
            selections: SelectionSet::new(),
            recipient: String::new(),
            error: None,
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Load the catalog for the provider's chain.
    ///
    /// On failure the token list is left empty and the error message is kept
    /// for display.
    pub async fn load_tokens<S: CatalogSource>(&mut self, loader: &CatalogLoader<S>) -> SafeSendResult<&[Token]> {
        match loader.load(self.provider.chain_id()).await {
            Ok(tokens) => {
                self.tokens = tokens;
                self.error = None;
                Ok(&self.tokens)
            }
            Err(e) => {
                log::error!("Failed to load token catalog: {}", e);
                self.tokens.clear();
                self.error = Some(e.user_message().to_string());
                Err(e)
            }
        }
    }

    /// Replace the balance map with fresh balances of the Safe for every loaded token.
    pub async fn load_balances<Q: ChainProvider>(&mut self, reader: &BalanceReader<Q>) -> &BalanceMap {
        if self.tokens.is_empty() {
            self.balances.clear();
            return &self.balances;
        }
        self.balances = reader.load_all(&self.tokens, self.provider.holder()).await;
        &self.balances
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn search(&self, term: &str) -> Vec<&Token> {
        search(&self.tokens, term)
    }

    pub fn balances(&self) -> &BalanceMap {
        &self.balances
    }

    /// Raw balance, zero when unknown
    pub fn balance(&self, token: &Address) -> U256 {
        self.balances.get(token).copied().unwrap_or_default()
    }

    pub fn formatted_balance(&self, token: &Token) -> String {
        format_units(self.balance(&token.address), token.decimals)
    }

    /// Select `token` with a typed amount, replacing any previous selection of it.
    pub fn select(&mut self, token: Token, amount: &str) -> SafeSendResult<()> {
        to_raw(amount, token.decimals)?;
        log::debug!("Selected {} {}", amount, token.symbol);
        self.selections.upsert(TokenSelection::new(token, amount.trim(), false));
        Ok(())
    }

    /// Select the whole balance of `token`.
    pub fn select_max(&mut self, token: Token) -> String {
        let amount = self.formatted_balance(&token);
        log::debug!("Selected max {} {}", amount, token.symbol);
        self.selections.upsert(TokenSelection::new(token, amount.clone(), true));
        amount
    }

    pub fn remove(&mut self, token: &Address) -> Option<TokenSelection> {
        self.selections.remove(token)
    }

    pub fn selections(&self) -> &SelectionSet {
        &self.selections
    }

    pub fn is_selected(&self, token: &Address) -> bool {
        self.selections.contains(token)
    }

    pub fn set_recipient(&mut self, recipient: impl Into<String>) {
        self.recipient = recipient.into();
    }

    pub fn recipient(&self) -> &str {
        &self.recipient
    }

    /// An empty recipient is not flagged as invalid until submission.
    pub fn is_recipient_valid(&self) -> bool {
        self.recipient.is_empty() || is_valid_address(&self.recipient)
    }

    pub fn can_submit(&self) -> bool {
        !self.selections.is_empty() && !self.recipient.is_empty() && is_valid_address(&self.recipient)
    }

    /// Message of the last blocking error
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Build the batch and hand it to the provider as one submission.
    ///
    /// Clears the selections and recipient on success. On failure they are
    /// kept so the user can retry.
    pub async fn submit(&mut self) -> SafeSendResult<Submission> {
        let batch = match TransferBatchBuilder::build(&self.recipient, &self.selections.to_vec()) {
            Ok(batch) => batch,
            Err(e) => {
                let message = if self.recipient.is_empty() || e == SafeSendError::EmptySelection {
                    MISSING_INPUT_MESSAGE
                } else {
                    e.user_message()
                };
                self.error = Some(message.to_string());
                return Err(e);
            }
        };

        log::info!("Submitting batch of {} transfers", batch.len());
        match self.provider.send(&batch).await {
            Ok(tx_hash) => {
                let submission = Submission::new(tx_hash, batch.len());
                log::info!("Batch {} submitted: {}", submission.id, submission.tx_hash);
                metrics::counter!(METRIC_BATCHES_SUBMITTED).increment(1);
                self.selections.clear();
                self.recipient.clear();
                self.error = None;
                Ok(submission)
            }
            Err(e) => {
                let e = match e {
                    SafeSendError::SubmissionFailed(_) => e,
                    other => SafeSendError::submission_failed(other.to_string()),
                };
                log::error!("Transaction failed: {}", e);
                metrics::counter!(METRIC_BATCH_SUBMISSION_FAILURES).increment(1);
                self.error = Some(e.user_message().to_string());
                Err(e)
            }
        }
    }
}
