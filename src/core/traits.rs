//! Core traits for account storage and currency validation
//!
//! These are the two collaborators the ledger depends on. Both are injected,
//! so the ledger has no hidden dependency on a particular store or currency
//! table.

use crate::types::{Account, LedgerError};

/// Trait for looking up and persisting Account aggregates
///
/// Implementations must make [`AccountStore::update`] atomic per account:
/// no other update of the same IBAN may interleave with it. Updates of
/// different IBANs must not block one another.
pub trait AccountStore: Send + Sync {
    /// Get a snapshot of the account stored under `iban`
    fn find_by_iban(&self, iban: &str) -> Option<Account>;

    /// Atomically read, modify and persist one account
    ///
    /// `f` runs while the account is exclusively held. If `f` returns an
    /// error the stored account is left exactly as it was.
    ///
    /// # Errors
    ///
    /// - `LedgerError::AccountNotFound` if no account is stored under `iban`
    /// - Any error returned by `f`
    fn update<F>(&self, iban: &str, f: F) -> Result<Account, LedgerError>
    where
        F: FnOnce(&mut Account) -> Result<(), LedgerError>;

    /// Get snapshots of all accounts for final output
    fn all_accounts(&self) -> Vec<Account>;
}

/// Capability answering "is this a recognized currency code?"
pub trait CurrencyValidator: Send + Sync {
    /// Whether `code` names a real-world currency
    fn is_valid_currency(&self, code: &str) -> bool;
}

impl<F> CurrencyValidator for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn is_valid_currency(&self, code: &str) -> bool {
        self(code)
    }
}
