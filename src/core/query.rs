//! Balance query service
//!
//! Read path over the account store. Queries never validate currencies: an
//! account may expose any currency it already holds.

use crate::core::traits::AccountStore;
use crate::types::{AccountBalanceResponse, LedgerError};
use std::sync::Arc;

/// Read-only balance lookups
#[derive(Debug)]
pub struct BalanceQueryService<S> {
    store: Arc<S>,
}

impl<S: AccountStore> BalanceQueryService<S> {
    /// Create a new query service over a shared store
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Get a snapshot of the balances of the account identified by `iban`
    ///
    /// # Errors
    ///
    /// - `AccountNotFound` if no account has this IBAN
    pub fn get_balance(&self, iban: &str) -> Result<AccountBalanceResponse, LedgerError> {
        self.store
            .find_by_iban(iban)
            .map(|account| AccountBalanceResponse::from(&account))
            .ok_or_else(|| LedgerError::account_not_found(iban))
    }
}
