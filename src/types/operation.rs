//! Operation-related types for the Account Balance Engine
//!
//! This module defines the validated transaction request, the operation
//! records streamed through the engine, and their outcomes.

use super::account::{Account, AccountBalanceResponse, CurrencyCode, Iban};
use super::error::InputError;
use rust_decimal::Decimal;

/// Parse a textual amount into an exact decimal
///
/// Accepts plain (`"100.00"`) and scientific (`"1e2"`) notation. Values that
/// would lose digits when stored are rejected rather than rounded.
///
/// # Errors
///
/// `InputError::ParameterFormatInvalid` naming the `amount` parameter.
pub fn parse_amount(raw: &str) -> Result<Decimal, InputError> {
    let trimmed = raw.trim();
    Decimal::from_str_exact(trimmed)
        .ok()
        .or_else(|| parse_scientific(trimmed))
        .ok_or_else(|| {
            InputError::parameter_format_invalid(
                "amount",
                format!("Cannot parse '{}' as a decimal", raw),
            )
        })
}

fn parse_scientific(raw: &str) -> Option<Decimal> {
    let (mantissa, _) = raw.split_once(|c| c == 'e' || c == 'E')?;
    Decimal::from_str_exact(mantissa).ok()?;
    Decimal::from_scientific(raw).ok()
}

/// Validation settings applied to incoming requests
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RequestConfig {
    /// Smallest accepted deposit/debit amount (inclusive)
    ///
    /// Applied uniformly regardless of currency denomination.
    pub minimum_amount: Decimal,
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self {
            minimum_amount: Decimal::TEN,
        }
    }
}

/// Operations supported by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationType {
    /// Read the balances of an account
    Balance,

    /// Credit funds in one currency
    ///
    /// Creates the currency entry if the account never held it.
    Deposit,

    /// Debit funds in one currency
    ///
    /// Requires the account to already hold the currency with enough funds.
    Debit,
}

impl OperationType {
    /// Lowercase name as used in input files and log fields
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationType::Balance => "balance",
            OperationType::Deposit => "deposit",
            OperationType::Debit => "debit",
        }
    }
}

/// Validated deposit/debit payload
///
/// Can only be built through [`TransactionRequest::new`], so holding one
/// means the currency is present and the amount meets the minimum.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionRequest {
    currency: CurrencyCode,
    amount: Decimal,
}

impl TransactionRequest {
    /// Validate raw request fields
    ///
    /// # Errors
    ///
    /// - `InputError::CurrencyRequired` if `currency` is missing or blank
    /// - `InputError::AmountRequired` if `amount` is missing
    /// - `InputError::AmountBelowMinimum` if `amount` is below the configured minimum
    ///
    /// A non-blank currency is kept verbatim; surrounding whitespace is left
    /// for the currency check to reject.
    pub fn new(
        currency: Option<&str>,
        amount: Option<Decimal>,
        config: &RequestConfig,
    ) -> Result<Self, InputError> {
        let currency = match currency {
            Some(code) if !code.trim().is_empty() => code.to_string(),
            _ => return Err(InputError::CurrencyRequired),
        };

        let amount = amount.ok_or(InputError::AmountRequired)?;
        if amount < config.minimum_amount {
            return Err(InputError::amount_below_minimum(config.minimum_amount));
        }

        Ok(Self { currency, amount })
    }

    /// Currency code as supplied by the caller
    pub fn currency(&self) -> &str {
        &self.currency
    }

    /// Requested amount
    pub fn amount(&self) -> Decimal {
        self.amount
    }
}

/// One operation read from the input stream
///
/// Deposits and debits always carry a validated request.
#[derive(Debug, Clone, PartialEq)]
pub enum OperationRecord {
    /// Read the balances of `iban`
    Balance { iban: Iban },

    /// Credit `request` to `iban`
    Deposit {
        iban: Iban,
        request: TransactionRequest,
    },

    /// Debit `request` from `iban`
    Debit {
        iban: Iban,
        request: TransactionRequest,
    },
}

impl OperationRecord {
    /// Build a balance query record
    pub fn balance(iban: impl Into<Iban>) -> Self {
        OperationRecord::Balance { iban: iban.into() }
    }

    /// Build a deposit record from an already validated request
    pub fn deposit(iban: impl Into<Iban>, request: TransactionRequest) -> Self {
        OperationRecord::Deposit {
            iban: iban.into(),
            request,
        }
    }

    /// Build a debit record from an already validated request
    pub fn debit(iban: impl Into<Iban>, request: TransactionRequest) -> Self {
        OperationRecord::Debit {
            iban: iban.into(),
            request,
        }
    }

    /// The kind of operation
    pub fn op(&self) -> OperationType {
        match self {
            OperationRecord::Balance { .. } => OperationType::Balance,
            OperationRecord::Deposit { .. } => OperationType::Deposit,
            OperationRecord::Debit { .. } => OperationType::Debit,
        }
    }

    /// Target account
    pub fn iban(&self) -> &str {
        match self {
            OperationRecord::Balance { iban }
            | OperationRecord::Deposit { iban, .. }
            | OperationRecord::Debit { iban, .. } => iban,
        }
    }

    /// Payload of a deposit or debit; `None` for balance queries
    pub fn request(&self) -> Option<&TransactionRequest> {
        match self {
            OperationRecord::Balance { .. } => None,
            OperationRecord::Deposit { request, .. } | OperationRecord::Debit { request, .. } => {
                Some(request)
            }
        }
    }
}

/// Successful result of executing an operation
#[derive(Debug, Clone, PartialEq)]
pub enum OperationOutcome {
    /// Snapshot returned by a balance query
    Balance(AccountBalanceResponse),

    /// Full account after a deposit or debit
    Updated(Account),
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[test]
    fn test_valid_request() {
        let request =
            TransactionRequest::new(Some("USD"), Some(dec!(100.00)), &RequestConfig::default())
                .unwrap();

        assert_eq!(request.currency(), "USD");
        assert_eq!(request.amount(), dec!(100.00));
    }

    #[test]
    fn test_minimum_is_inclusive() {
        let result = TransactionRequest::new(Some("JPY"), Some(dec!(10)), &RequestConfig::default());
        assert!(result.is_ok());
    }

    #[rstest]
    #[case::missing_currency(None, Some(dec!(50)), InputError::CurrencyRequired)]
    #[case::empty_currency(Some(""), Some(dec!(50)), InputError::CurrencyRequired)]
    #[case::blank_currency(Some("   "), Some(dec!(50)), InputError::CurrencyRequired)]
    #[case::missing_amount(Some("USD"), None, InputError::AmountRequired)]
    #[case::below_minimum(Some("USD"), Some(dec!(9.99)), InputError::amount_below_minimum(dec!(10)))]
    #[case::negative(Some("USD"), Some(dec!(-100)), InputError::amount_below_minimum(dec!(10)))]
    fn test_invalid_request(
        #[case] currency: Option<&str>,
        #[case] amount: Option<Decimal>,
        #[case] expected: InputError,
    ) {
        let result = TransactionRequest::new(currency, amount, &RequestConfig::default());
        assert_eq!(result, Err(expected));
    }

    #[rstest]
    #[case::plain("100.00", dec!(100.00))]
    #[case::padded("  42.5 ", dec!(42.5))]
    #[case::integer("10", dec!(10))]
    #[case::scientific("1e3", dec!(1000))]
    fn test_parse_amount(#[case] raw: &str, #[case] expected: Decimal) {
        assert_eq!(parse_amount(raw), Ok(expected));
    }

    #[test]
    fn test_parse_amount_keeps_scale() {
        assert_eq!(parse_amount("1000.00").unwrap().to_string(), "1000.00");
    }

    #[rstest]
    #[case::letters("X")]
    #[case::empty("")]
    #[case::two_points("1.2.3")]
    #[case::too_many_digits("10.00000000000000000000000000009")]
    fn test_parse_amount_invalid(#[case] raw: &str) {
        let err = parse_amount(raw).unwrap_err();
        assert_eq!(
            err,
            InputError::parameter_format_invalid(
                "amount",
                format!("Cannot parse '{}' as a decimal", raw)
            )
        );
    }

    #[test]
    fn test_currency_is_kept_verbatim() {
        let request =
            TransactionRequest::new(Some(" USD"), Some(dec!(50)), &RequestConfig::default())
                .unwrap();
        assert_eq!(request.currency(), " USD");
    }

    #[test]
    fn test_parse_amount_keeps_all_representable_digits() {
        let raw = "10.000000000000000000000000009";
        assert_eq!(parse_amount(raw).unwrap().to_string(), raw);
    }

    #[test]
    fn test_custom_minimum() {
        let config = RequestConfig {
            minimum_amount: dec!(0.01),
        };

        assert!(TransactionRequest::new(Some("BHD"), Some(dec!(0.5)), &config).is_ok());
        assert_eq!(
            TransactionRequest::new(Some("BHD"), Some(dec!(0.001)), &config),
            Err(InputError::amount_below_minimum(dec!(0.01)))
        );
    }

    #[test]
    fn test_record_constructors() {
        let request =
            TransactionRequest::new(Some("EUR"), Some(dec!(20)), &RequestConfig::default()).unwrap();

        let balance = OperationRecord::balance("IBAN1");
        assert_eq!(balance.op(), OperationType::Balance);
        assert_eq!(balance.iban(), "IBAN1");
        assert!(balance.request().is_none());

        let deposit = OperationRecord::deposit("IBAN1", request.clone());
        assert_eq!(deposit.op(), OperationType::Deposit);
        assert_eq!(deposit.request(), Some(&request));

        let debit = OperationRecord::debit("IBAN2", request);
        assert_eq!(debit.op().as_str(), "debit");
        assert_eq!(debit.iban(), "IBAN2");
    }
}
