//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `account`: The Account aggregate and balance snapshots
//! - `operation`: Requests, operation records and outcomes
//! - `error`: Error taxonomy for the engine

pub mod account;
pub mod error;
pub mod operation;

pub use account::{Account, AccountBalanceResponse, AccountId, Balances, CurrencyCode, Iban};
pub use error::{ErrorCategory, InputError, LedgerError, StoreError};
pub use operation::{
    parse_amount, OperationOutcome, OperationRecord, OperationType, RequestConfig,
    TransactionRequest,
};
