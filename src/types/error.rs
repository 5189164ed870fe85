//! Error types for the Account Balance Engine
//!
//! This module defines the closed set of failures the engine can report.
//! Each failure carries a stable machine-readable code, a message built from
//! the concrete inputs of the operation, and a category that the boundary
//! maps to a response status.
//!
//! # Error Families
//!
//! - **LedgerError**: Failures of balance queries, deposits and debits
//! - **InputError**: Request-shape failures caught before the ledger runs
//! - **StoreError**: Failures while seeding the account store

use rust_decimal::Decimal;
use thiserror::Error;

/// Machine-readable error codes shared with the boundary layer
pub mod codes {
    pub const IBAN_NOT_FOUND: &str = "IBAN_NOT_FOUND";
    pub const CURRENCY_NOT_FOUND: &str = "CURRENCY_NOT_FOUND";
    pub const INVALID_CURRENCY: &str = "ERROR_INVALID_CURRENCY";
    pub const INSUFFICIENT_FUNDS: &str = "INSUFFICIENT_FUNDS";
    pub const INVALID_AMOUNT: &str = "ERROR_INVALID_AMOUNT";
    pub const ARITHMETIC_OVERFLOW: &str = "ERROR_ARITHMETIC_OVERFLOW";
    pub const INPUT_VALIDATION: &str = "ERROR_INPUT_VALIDATION";
    pub const PARAMETER_FORMAT_INVALID: &str = "ERROR_PARAMETER_FORMAT_INVALID";
}

/// Response category of a failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The addressed resource does not exist
    NotFound,

    /// The request is malformed or names something the account cannot use
    BadRequest,

    /// The request is well-formed but cannot be honoured
    Unprocessable,
}

impl ErrorCategory {
    /// HTTP status code for this category
    pub fn http_status(&self) -> u16 {
        match self {
            ErrorCategory::NotFound => 404,
            ErrorCategory::BadRequest => 400,
            ErrorCategory::Unprocessable => 422,
        }
    }
}

/// Failures of the balance ledger and query service
///
/// Every variant is terminal for the request and leaves the stored account
/// unchanged.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LedgerError {
    /// No account is stored under the IBAN
    #[error("Account with IBAN '{iban}' not found.")]
    AccountNotFound {
        /// The IBAN that was looked up
        iban: String,
    },

    /// The currency code is not a real-world currency
    #[error("Currency '{currency}' not found.")]
    CurrencyNotRecognized {
        /// The rejected currency code
        currency: String,
    },

    /// The currency is valid but the account has never held it (debit only)
    #[error("The currency '{currency}' is not available for IBAN '{iban}'.")]
    CurrencyNotOnAccount {
        /// The debited account
        iban: String,
        /// The currency missing from the account
        currency: String,
    },

    /// The debit exceeds the balance held in the currency
    #[error("Insufficient funds for IBAN '{iban}'. The withdrawal amount of {requested} exceeds the available balance of {available}.")]
    InsufficientFunds {
        /// The debited account
        iban: String,
        /// Requested debit amount
        requested: Decimal,
        /// Balance available in the currency
        available: Decimal,
    },

    /// The amount reached the ledger without being strictly positive
    #[error("Amount {amount} must be greater than zero.")]
    InvalidAmount {
        /// The rejected amount
        amount: Decimal,
    },

    /// The new balance would not fit in a decimal
    #[error("Arithmetic overflow updating the '{currency}' balance of IBAN '{iban}'.")]
    ArithmeticOverflow {
        /// The account being updated
        iban: String,
        /// The currency being updated
        currency: String,
    },
}

impl LedgerError {
    /// Create an AccountNotFound error
    pub fn account_not_found(iban: &str) -> Self {
        LedgerError::AccountNotFound {
            iban: iban.to_string(),
        }
    }

    /// Create a CurrencyNotRecognized error
    pub fn currency_not_recognized(currency: &str) -> Self {
        LedgerError::CurrencyNotRecognized {
            currency: currency.to_string(),
        }
    }

    /// Create a CurrencyNotOnAccount error
    pub fn currency_not_on_account(iban: &str, currency: &str) -> Self {
        LedgerError::CurrencyNotOnAccount {
            iban: iban.to_string(),
            currency: currency.to_string(),
        }
    }

    /// Create an InsufficientFunds error
    pub fn insufficient_funds(iban: &str, requested: Decimal, available: Decimal) -> Self {
        LedgerError::InsufficientFunds {
            iban: iban.to_string(),
            requested,
            available,
        }
    }

    /// Create an InvalidAmount error
    pub fn invalid_amount(amount: Decimal) -> Self {
        LedgerError::InvalidAmount { amount }
    }

    /// Create an ArithmeticOverflow error
    pub fn arithmetic_overflow(iban: &str, currency: &str) -> Self {
        LedgerError::ArithmeticOverflow {
            iban: iban.to_string(),
            currency: currency.to_string(),
        }
    }

    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            LedgerError::AccountNotFound { .. } => codes::IBAN_NOT_FOUND,
            LedgerError::CurrencyNotRecognized { .. } => codes::CURRENCY_NOT_FOUND,
            LedgerError::CurrencyNotOnAccount { .. } => codes::INVALID_CURRENCY,
            LedgerError::InsufficientFunds { .. } => codes::INSUFFICIENT_FUNDS,
            LedgerError::InvalidAmount { .. } => codes::INVALID_AMOUNT,
            LedgerError::ArithmeticOverflow { .. } => codes::ARITHMETIC_OVERFLOW,
        }
    }

    /// Response category
    pub fn category(&self) -> ErrorCategory {
        match self {
            LedgerError::AccountNotFound { .. } | LedgerError::CurrencyNotRecognized { .. } => {
                ErrorCategory::NotFound
            }
            LedgerError::CurrencyNotOnAccount { .. } | LedgerError::InvalidAmount { .. } => {
                ErrorCategory::BadRequest
            }
            LedgerError::InsufficientFunds { .. } | LedgerError::ArithmeticOverflow { .. } => {
                ErrorCategory::Unprocessable
            }
        }
    }
}

/// Request-shape failures detected before the ledger is invoked
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    /// Currency missing or blank
    #[error("The 'currency' parameter is required.")]
    CurrencyRequired,

    /// Amount missing
    #[error("The 'amount' parameter is required.")]
    AmountRequired,

    /// Amount below the configured minimum
    #[error("The 'amount' minimum value is {minimum}.")]
    AmountBelowMinimum {
        /// The configured minimum
        minimum: Decimal,
    },

    /// A field could not be parsed into its expected type
    #[error("Parameter: '{parameter}'. {message}")]
    ParameterFormatInvalid {
        /// The offending field
        parameter: String,
        /// Parser detail
        message: String,
    },
}

impl InputError {
    /// Create an AmountBelowMinimum error
    pub fn amount_below_minimum(minimum: Decimal) -> Self {
        InputError::AmountBelowMinimum { minimum }
    }

    /// Create a ParameterFormatInvalid error
    pub fn parameter_format_invalid(parameter: &str, message: impl Into<String>) -> Self {
        InputError::ParameterFormatInvalid {
            parameter: parameter.to_string(),
            message: message.into(),
        }
    }

    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            InputError::ParameterFormatInvalid { .. } => codes::PARAMETER_FORMAT_INVALID,
            _ => codes::INPUT_VALIDATION,
        }
    }

    /// Response category; input failures are always bad requests
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::BadRequest
    }
}

/// Failures while creating accounts in a store
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    /// An account with this IBAN already exists
    #[error("Account with IBAN '{iban}' already exists")]
    DuplicateIban {
        /// The duplicated IBAN
        iban: String,
    },

    /// An opening balance is negative
    #[error("Opening balance {amount} {currency} for IBAN '{iban}' is negative")]
    NegativeBalance {
        /// The account being created
        iban: String,
        /// The offending currency
        currency: String,
        /// The offending amount
        amount: Decimal,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    const IBAN: &str = "EE3822002210201578458065";

    #[rstest]
    #[case::account_not_found(
        LedgerError::account_not_found("GB3822002219020157845806"),
        "Account with IBAN 'GB3822002219020157845806' not found."
    )]
    #[case::currency_not_recognized(
        LedgerError::currency_not_recognized("X"),
        "Currency 'X' not found."
    )]
    #[case::currency_not_on_account(
        LedgerError::currency_not_on_account(IBAN, "IDR"),
        "The currency 'IDR' is not available for IBAN 'EE3822002210201578458065'."
    )]
    #[case::insufficient_funds(
        LedgerError::insufficient_funds(IBAN, dec!(100000), dec!(1000.00)),
        "Insufficient funds for IBAN 'EE3822002210201578458065'. The withdrawal amount of 100000 exceeds the available balance of 1000.00."
    )]
    #[case::invalid_amount(
        LedgerError::invalid_amount(dec!(-5)),
        "Amount -5 must be greater than zero."
    )]
    #[case::arithmetic_overflow(
        LedgerError::arithmetic_overflow(IBAN, "USD"),
        "Arithmetic overflow updating the 'USD' balance of IBAN 'EE3822002210201578458065'."
    )]
    fn test_ledger_error_display(#[case] error: LedgerError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }

    #[rstest]
    #[case::account_not_found(LedgerError::account_not_found(IBAN), "IBAN_NOT_FOUND", 404)]
    #[case::currency_not_recognized(LedgerError::currency_not_recognized("X"), "CURRENCY_NOT_FOUND", 404)]
    #[case::currency_not_on_account(LedgerError::currency_not_on_account(IBAN, "IDR"), "ERROR_INVALID_CURRENCY", 400)]
    #[case::insufficient_funds(LedgerError::insufficient_funds(IBAN, dec!(2), dec!(1)), "INSUFFICIENT_FUNDS", 422)]
    #[case::invalid_amount(LedgerError::invalid_amount(Decimal::ZERO), "ERROR_INVALID_AMOUNT", 400)]
    #[case::arithmetic_overflow(LedgerError::arithmetic_overflow(IBAN, "USD"), "ERROR_ARITHMETIC_OVERFLOW", 422)]
    fn test_ledger_error_code_and_status(
        #[case] error: LedgerError,
        #[case] code: &str,
        #[case] status: u16,
    ) {
        assert_eq!(error.code(), code);
        assert_eq!(error.category().http_status(), status);
    }

    #[rstest]
    #[case::currency_required(InputError::CurrencyRequired, "The 'currency' parameter is required.", "ERROR_INPUT_VALIDATION")]
    #[case::amount_required(InputError::AmountRequired, "The 'amount' parameter is required.", "ERROR_INPUT_VALIDATION")]
    #[case::below_minimum(InputError::amount_below_minimum(dec!(10)), "The 'amount' minimum value is 10.", "ERROR_INPUT_VALIDATION")]
    #[case::format_invalid(
        InputError::parameter_format_invalid("amount", "Cannot parse 'X' as a decimal"),
        "Parameter: 'amount'. Cannot parse 'X' as a decimal",
        "ERROR_PARAMETER_FORMAT_INVALID"
    )]
    fn test_input_error(#[case] error: InputError, #[case] message: &str, #[case] code: &str) {
        assert_eq!(error.to_string(), message);
        assert_eq!(error.code(), code);
        assert_eq!(error.category(), ErrorCategory::BadRequest);
    }

    #[test]
    fn test_store_error_display() {
        let error = StoreError::NegativeBalance {
            iban: IBAN.to_string(),
            currency: "USD".to_string(),
            amount: dec!(-1.50),
        };
        assert_eq!(
            error.to_string(),
            "Opening balance -1.50 USD for IBAN 'EE3822002210201578458065' is negative"
        );
    }
}
