//! Core business logic module
//!
//! This module contains the account processing components:
//! - `traits` - Collaborator abstractions (account store, currency validator)
//! - `currency` - ISO 4217 currency validation
//! - `account_store` - Thread-safe in-memory account storage
//! - `ledger` - Deposit and debit rules
//! - `query` - Balance lookups
//! - `service` - Operation dispatch over ledger and queries
//! - `async` - Batch processing partitioned by IBAN

pub mod account_store;
pub mod r#async;
pub mod currency;
pub mod ledger;
pub mod query;
pub mod service;
pub mod traits;

pub use account_store::InMemoryAccountStore;
pub use currency::IsoCurrencyValidator;
pub use ledger::BalanceLedger;
pub use query::BalanceQueryService;
pub use r#async::{BatchProcessor, ProcessingResult};
pub use service::AccountService;
pub use traits::{AccountStore, CurrencyValidator};

/// Service over the default store and currency table
pub type DefaultAccountService = AccountService<InMemoryAccountStore, IsoCurrencyValidator>;
