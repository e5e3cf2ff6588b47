//! Token selections chosen for a batch transfer

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::entities::token::Token;
use crate::shared::types::{Address, HumanAmount};

/// A token picked for transfer with its human readable amount
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenSelection {
    pub token: Token,
    pub amount: HumanAmount,
    /// Amount was filled from the full balance rather than typed
    pub is_max: bool,
}

impl TokenSelection {
    pub fn new(token: Token, amount: impl Into<HumanAmount>, is_max: bool) -> Self {
        Self {
            token,
            amount: amount.into(),
            is_max,
        }
    }

    pub fn address(&self) -> Address {
        self.token.address
    }
}

/// Selections keyed by token address, iterated in the order tokens were first picked.
#[derive(Debug, Clone, Default)]
pub struct SelectionSet {
    entries: HashMap<Address, TokenSelection>,
    order: Vec<Address>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a selection, replacing any existing one for the same token in place.
    /// Returns the replaced selection.
    pub fn upsert(&mut self, selection: TokenSelection) -> Option<TokenSelection> {
        let address = selection.address();
        let previous = self.entries.insert(address, selection);
        if previous.is_none() {
            self.order.push(address);
        }
        previous
    }

    pub fn remove(&mut self, address: &Address) -> Option<TokenSelection> {
        let removed = self.entries.remove(address)?;
        self.order.retain(|a| a != address);
        Some(removed)
    }

    pub fn get(&self, address: &Address) -> Option<&TokenSelection> {
        self.entries.get(address)
    }

    pub fn contains(&self, address: &Address) -> bool {
        self.entries.contains_key(address)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &TokenSelection> + '_ {
        self.order.iter().filter_map(move |address| self.entries.get(address))
    }

    /// Selections in order, cloned for batch construction.
    pub fn to_vec(&self) -> Vec<TokenSelection> {
        self.iter().cloned().collect()
    }
}
