//! Account operation service
//!
//! This module provides the `AccountService` that routes operation records
//! to the balance ledger or the query service, sharing one account store
//! between them.
//!
//! # Architecture
//!
//! ```text
//! AccountService
//!     ├── BalanceLedger<S, V>      (deposits and debits)
//!     └── BalanceQueryService<S>   (balance snapshots)
//!              └── Arc<S: AccountStore>
//! ```

use crate::core::ledger::BalanceLedger;
use crate::core::query::BalanceQueryService;
use crate::core::traits::{AccountStore, CurrencyValidator};
use crate::types::{
    Account, AccountBalanceResponse, LedgerError, OperationOutcome, OperationRecord,
};
use rust_decimal::Decimal;
use std::sync::Arc;

/// Entry point for all account operations
///
/// Safe to share across threads behind an `Arc`; atomicity of each
/// operation is provided by the store.
#[derive(Debug)]
pub struct AccountService<S, V> {
    ledger: BalanceLedger<S, V>,
    query: BalanceQueryService<S>,
}

impl<S, V> AccountService<S, V>
where
    S: AccountStore,
    V: CurrencyValidator,
{
    /// Create a new service over a shared store
    pub fn new(store: Arc<S>, currencies: V) -> Self {
        Self {
            ledger: BalanceLedger::new(Arc::clone(&store), currencies),
            query: BalanceQueryService::new(store),
        }
    }

    /// Execute a single operation record
    ///
    /// Balance queries yield a snapshot; deposits and debits yield the full
    /// updated account.
    ///
    /// # Errors
    ///
    /// Any [`LedgerError`] raised by the query service or the ledger.
    pub fn execute(&self, record: &OperationRecord) -> Result<OperationOutcome, LedgerError> {
        match record {
            OperationRecord::Balance { iban } => {
                self.get_balance(iban).map(OperationOutcome::Balance)
            }
            OperationRecord::Deposit { iban, request } => self
                .deposit(iban, request.currency(), request.amount())
                .map(OperationOutcome::Updated),
            OperationRecord::Debit { iban, request } => self
                .debit(iban, request.currency(), request.amount())
                .map(OperationOutcome::Updated),
        }
    }

    /// See [`BalanceQueryService::get_balance`]
    pub fn get_balance(&self, iban: &str) -> Result<AccountBalanceResponse, LedgerError> {
        self.query.get_balance(iban)
    }

    /// See [`BalanceLedger::deposit`]
    pub fn deposit(&self, iban: &str, currency: &str, amount: Decimal) -> Result<Account, LedgerError> {
        self.ledger.deposit(iban, currency, amount)
    }

    /// See [`BalanceLedger::debit`]
    pub fn debit(&self, iban: &str, currency: &str, amount: Decimal) -> Result<Account, LedgerError> {
        self.ledger.debit(iban, currency, amount)
    }
}

/// Log the outcome of one operation
///
/// Rejections are warnings carrying the taxonomy code; they never stop
/// processing.
pub(crate) fn log_outcome(record: &OperationRecord, result: &Result<OperationOutcome, LedgerError>) {
    match result {
        Ok(OperationOutcome::Balance(snapshot)) => tracing::info!(
            iban = %snapshot.iban,
            balances = ?snapshot.balances,
            "balance"
        ),
        Ok(OperationOutcome::Updated(account)) => tracing::debug!(
            op = record.op().as_str(),
            iban = account.iban(),
            "operation applied"
        ),
        Err(e) => tracing::warn!(
            op = record.op().as_str(),
            iban = record.iban(),
            code = e.code(),
            status = e.category().http_status(),
            "{}",
            e
        ),
    }
}
