//! Account Balance Engine Library
//!
//! # Overview
//!
//! Multi-currency balance ledger for IBAN-identified bank accounts. Each
//! account holds one exact decimal balance per ISO 4217 currency. Balances
//! change only through validated deposits and debits; every rejected
//! operation leaves the account untouched and reports a stable error code.
//!
//! # Architecture
//!
//! - [`types`] - Core data types (Account, requests, error taxonomy)
//! - [`core`] - Business logic components:
//!   - [`core::ledger`] - Deposit and debit rules
//!   - [`core::query`] - Balance lookups
//!   - [`core::account_store`] - Thread-safe account storage with atomic per-account updates
//!   - [`core::currency`] - ISO 4217 currency table
//!   - [`core::service`] - Operation dispatch
//! - [`api`] - JSON request boundary with status codes and error bodies
//! - [`io`] - CSV readers, account seeding and balance output
//! - [`strategy`] - Sync and async batch processing pipelines
//! - [`cli`] - CLI arguments parsing
//! - [`logging`] - tracing subscriber setup
//!
//! # Operations
//!
//! - **Balance**: Read every currency balance of an account
//! - **Deposit**: Credit an amount in one currency, creating the entry if needed
//! - **Debit**: Withdraw an amount from a currency the account already holds,
//!   never below zero

pub mod api;
pub mod cli;
pub mod core;
pub mod io;
pub mod logging;
pub mod strategy;
pub mod types;

pub use crate::core::{
    AccountService, AccountStore, BalanceLedger, BalanceQueryService, CurrencyValidator,
    InMemoryAccountStore, IsoCurrencyValidator,
};
pub use io::write_balances_csv;
pub use types::{
    Account, AccountBalanceResponse, AccountId, ErrorCategory, InputError, LedgerError,
    OperationRecord, OperationType, RequestConfig, TransactionRequest,
};
