//! Balance ledger
//!
//! This module provides the `BalanceLedger` that applies deposits and debits
//! to an account's currency-balance map.
//!
//! The ledger enforces the balance rules:
//! - A missing account is reported before anything else
//! - Currency codes are validated before any existence or sufficiency check
//! - Deposits may open a new currency entry; debits never do
//! - A debit larger than the held balance is rejected, never clamped
//! - All arithmetic is exact decimal arithmetic with overflow checks
//!
//! Each operation runs inside a single [`AccountStore::update`], which makes
//! the read-modify-write atomic for that account.

use crate::core::traits::{AccountStore, CurrencyValidator};
use crate::types::{Account, LedgerError};
use rust_decimal::Decimal;
use std::sync::Arc;

/// Balance mutation engine
///
/// Generic over its collaborators so the store and the currency table can
/// be swapped out (e.g. a closure validator in tests).
#[derive(Debug)]
pub struct BalanceLedger<S, V> {
    store: Arc<S>,
    currencies: V,
}

impl<S, V> BalanceLedger<S, V>
where
    S: AccountStore,
    V: CurrencyValidator,
{
    /// Create a new ledger over a shared store
    pub fn new(store: Arc<S>, currencies: V) -> Self {
        Self { store, currencies }
    }

    /// Deposit `amount` of `currency` into the account identified by `iban`
    ///
    /// Creates the currency entry if the account never held it.
    ///
    /// # Returns
    ///
    /// The full updated account.
    ///
    /// # Errors
    ///
    /// - `AccountNotFound` if no account has this IBAN
    /// - `CurrencyNotRecognized` if the code is not a real currency
    /// - `InvalidAmount` if the amount is not strictly positive
    /// - `ArithmeticOverflow` if the new balance is out of decimal range
    pub fn deposit(&self, iban: &str, currency: &str, amount: Decimal) -> Result<Account, LedgerError> {
        let result = self.store.update(iban, |account| {
            self.ensure_recognized(currency)?;
            ensure_positive(amount)?;

            let current = account.balance(currency).unwrap_or(Decimal::ZERO);
            let updated = current
                .checked_add(amount)
                .map(|sum| keep_scale(sum, current, amount))
                .ok_or_else(|| LedgerError::arithmetic_overflow(iban, currency))?;

            account.set_balance(currency, updated);
            Ok(())
        });

        log_result("deposit", iban, currency, amount, &result);
        result
    }

    /// Debit `amount` of `currency` from the account identified by `iban`
    ///
    /// # Returns
    ///
    /// The full updated account.
    ///
    /// # Errors
    ///
    /// - `AccountNotFound` if no account has this IBAN
    /// - `CurrencyNotRecognized` if the code is not a real currency
    /// - `InvalidAmount` if the amount is not strictly positive
    /// - `CurrencyNotOnAccount` if the account never held the currency
    /// - `InsufficientFunds` if the held balance is smaller than `amount`
    pub fn debit(&self, iban: &str, currency: &str, amount: Decimal) -> Result<Account, LedgerError> {
        let result = self.store.update(iban, |account| {
            self.ensure_recognized(currency)?;
            ensure_positive(amount)?;

            let current = account
                .balance(currency)
                .ok_or_else(|| LedgerError::currency_not_on_account(iban, currency))?;

            if current < amount {
                return Err(LedgerError::insufficient_funds(iban, amount, current));
            }

            // Cannot underflow: current >= amount
            let updated = current
                .checked_sub(amount)
                .map(|difference| keep_scale(difference, current, amount))
                .ok_or_else(|| LedgerError::arithmetic_overflow(iban, currency))?;

            account.set_balance(currency, updated);
            Ok(())
        });

        log_result("debit", iban, currency, amount, &result);
        result
    }

    fn ensure_recognized(&self, currency: &str) -> Result<(), LedgerError> {
        if self.currencies.is_valid_currency(currency) {
            Ok(())
        } else {
            Err(LedgerError::currency_not_recognized(currency))
        }
    }
}

fn ensure_positive(amount: Decimal) -> Result<(), LedgerError> {
    if amount > Decimal::ZERO {
        Ok(())
    } else {
        Err(LedgerError::invalid_amount(amount))
    }
}

/// Widen `value` to the larger scale of its operands
///
/// Adding to a zero balance otherwise drops the balance's scale (`0.00 + 50`
/// yields `50`, not `50.00`).
fn keep_scale(mut value: Decimal, lhs: Decimal, rhs: Decimal) -> Decimal {
    let scale = lhs.scale().max(rhs.scale());
    if value.scale() < scale {
        value.rescale(scale);
    }
    value
}

fn log_result(
    op: &str,
    iban: &str,
    currency: &str,
    amount: Decimal,
    result: &Result<Account, LedgerError>,
) {
    match result {
        Ok(account) => tracing::debug!(
            op,
            iban,
            currency,
            %amount,
            balance = ?account.balance(currency),
            "balance updated"
        ),
        Err(e) => tracing::debug!(op, iban, currency, %amount, code = e.code(), "balance update rejected"),
    }
}
