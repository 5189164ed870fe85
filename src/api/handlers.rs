//! Request handlers for balance queries, deposits and debits

use crate::api::error_response::{ApiResponse, ErrorResponse};
use crate::core::{AccountService, AccountStore, CurrencyValidator};
use crate::types::{parse_amount, InputError, LedgerError, RequestConfig, TransactionRequest};
use rust_decimal::Decimal;
use serde_json::{Map, Value};
use std::sync::Arc;

/// Parse and validate a `{"currency": ..., "amount": ...}` body
///
/// Format problems (invalid JSON, wrong field types, unparsable amounts) are
/// reported before missing-field and minimum checks. `amount` may be a JSON
/// number or a decimal string; numbers are read from their exact text.
pub fn parse_transaction_body(
    body: &str,
    config: &RequestConfig,
) -> Result<TransactionRequest, InputError> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| InputError::parameter_format_invalid("body", e.to_string()))?;
    let fields = value.as_object().ok_or_else(|| {
        InputError::parameter_format_invalid("body", "Expected a JSON object")
    })?;

    let currency = currency_field(fields)?;
    let amount = amount_field(fields)?;

    TransactionRequest::new(currency, amount, config)
}

fn currency_field(fields: &Map<String, Value>) -> Result<Option<&str>, InputError> {
    match fields.get("currency") {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(code)) => Ok(Some(code.as_str())),
        Some(other) => Err(InputError::parameter_format_invalid(
            "currency",
            format!("Expected a string, found {}", other),
        )),
    }
}

fn amount_field(fields: &Map<String, Value>) -> Result<Option<Decimal>, InputError> {
    match fields.get("amount") {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(number)) => parse_amount(&number.to_string()).map(Some),
        Some(Value::String(raw)) => parse_amount(raw).map(Some),
        Some(other) => Err(InputError::parameter_format_invalid(
            "amount",
            format!("Cannot parse {} as a decimal", other),
        )),
    }
}

/// Request boundary over an [`AccountService`]
pub struct AccountApi<S, V> {
    service: Arc<AccountService<S, V>>,
    config: RequestConfig,
}

impl<S, V> AccountApi<S, V>
where
    S: AccountStore,
    V: CurrencyValidator,
{
    pub fn new(service: Arc<AccountService<S, V>>, config: RequestConfig) -> Self {
        Self { service, config }
    }

    /// `GET /accounts/{iban}/balances`
    pub fn get_balances(&self, iban: &str) -> ApiResponse {
        let path = format!("/accounts/{}/balances", iban);
        respond(self.service.get_balance(iban), &path)
    }

    /// `POST /accounts/{iban}/deposit`
    pub fn deposit(&self, iban: &str, body: &str) -> ApiResponse {
        let path = format!("/accounts/{}/deposit", iban);
        match parse_transaction_body(body, &self.config) {
            Ok(request) => respond(
                self.service
                    .deposit(iban, request.currency(), request.amount()),
                &path,
            ),
            Err(e) => reject(&e, &path),
        }
    }

    /// `POST /accounts/{iban}/debit`
    pub fn debit(&self, iban: &str, body: &str) -> ApiResponse {
        let path = format!("/accounts/{}/debit", iban);
        match parse_transaction_body(body, &self.config) {
            Ok(request) => respond(
                self.service.debit(iban, request.currency(), request.amount()),
                &path,
            ),
            Err(e) => reject(&e, &path),
        }
    }
}

fn respond<T: serde::Serialize>(result: Result<T, LedgerError>, path: &str) -> ApiResponse {
    match result {
        Ok(body) => ApiResponse::ok(&body),
        Err(e) => {
            tracing::warn!(path, code = e.code(), "{}", e);
            ApiResponse::error(ErrorResponse::from_ledger(&e, path))
        }
    }
}

fn reject(error: &InputError, path: &str) -> ApiResponse {
    tracing::warn!(path, code = error.code(), "{}", error);
    ApiResponse::error(ErrorResponse::from_input(error, path))
}
