//! Thread-safe in-memory account storage
//!
//! This module provides the `InMemoryAccountStore` struct, the default
//! [`AccountStore`] implementation.
//!
//! # Design
//!
//! Accounts are kept in a `DashMap` keyed by IBAN, each behind its own
//! `parking_lot::Mutex`. A lookup only touches the map long enough to clone
//! the account handle; the read-modify-write of an update then runs under
//! the account's own mutex. Updates of the same IBAN are serialized, while
//! updates of different IBANs never wait on each other.
//!
//! # Atomicity
//!
//! `update` stages the change on a copy of the account and commits it only
//! when the closure succeeds, so a rejected operation leaves the stored
//! account untouched.

use crate::core::traits::AccountStore;
use crate::types::{Account, AccountId, Balances, LedgerError, StoreError};
use dashmap::DashMap;
use parking_lot::Mutex;
use rust_decimal::Decimal;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Shared handle to one stored account
type AccountSlot = Arc<Mutex<Account>>;

/// Thread-safe in-memory account store
///
/// All methods are safe to call from multiple threads concurrently.
#[derive(Debug)]
pub struct InMemoryAccountStore {
    /// Accounts keyed by IBAN
    accounts: DashMap<String, AccountSlot>,

    /// Next identity to assign on creation
    next_id: AtomicU64,
}

impl InMemoryAccountStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self {
            accounts: DashMap::new(),
            next_id: AtomicU64::new(1),
        }
    }

    /// Create an account with opening balances
    ///
    /// The store assigns the account its identity.
    ///
    /// # Errors
    ///
    /// - `StoreError::NegativeBalance` if any opening balance is below zero
    /// - `StoreError::DuplicateIban` if the IBAN is already taken
    pub fn create(&self, iban: &str, balances: Balances) -> Result<Account, StoreError> {
        if let Some((currency, amount)) = balances.iter().find(|(_, amount)| **amount < Decimal::ZERO)
        {
            return Err(StoreError::NegativeBalance {
                iban: iban.to_string(),
                currency: currency.clone(),
                amount: *amount,
            });
        }

        let mut created = None;
        self.accounts.entry(iban.to_string()).or_insert_with(|| {
            let id = AccountId(self.next_id.fetch_add(1, Ordering::Relaxed));
            let account = Account::new(id, iban, balances);
            created = Some(account.clone());
            Arc::new(Mutex::new(account))
        });

        created.ok_or_else(|| StoreError::DuplicateIban {
            iban: iban.to_string(),
        })
    }

    /// Number of stored accounts
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Whether the store holds no accounts
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    fn slot(&self, iban: &str) -> Option<AccountSlot> {
        self.accounts.get(iban).map(|entry| Arc::clone(entry.value()))
    }
}

impl Default for InMemoryAccountStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AccountStore for InMemoryAccountStore {
    fn find_by_iban(&self, iban: &str) -> Option<Account> {
        self.slot(iban).map(|slot| slot.lock().clone())
    }

    fn update<F>(&self, iban: &str, f: F) -> Result<Account, LedgerError>
    where
        F: FnOnce(&mut Account) -> Result<(), LedgerError>,
    {
        let slot = self
            .slot(iban)
            .ok_or_else(|| LedgerError::account_not_found(iban))?;

        let mut stored = slot.lock();
        let mut staged = stored.clone();
        f(&mut staged)?;
        *stored = staged;

        Ok(stored.clone())
    }

    fn all_accounts(&self) -> Vec<Account> {
        let slots: Vec<AccountSlot> = self
            .accounts
            .iter()
            .map(|entry| Arc::clone(entry.value()))
            .collect();

        slots.iter().map(|slot| slot.lock().clone()).collect()
    }
}
