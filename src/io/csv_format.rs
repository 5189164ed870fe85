//! CSV format handling for operation records, account seeds and balance output
//!
//! This module centralizes all CSV format concerns, providing:
//! - CsvRecord structure for operation rows (`type,iban,currency,amount`)
//! - SeedRecord structure for account rows (`iban,currency,balance`)
//! - Conversion from CSV records to domain types
//! - Balance output serialization
//!
//! All functions are pure (no I/O beyond the supplied writer) for easy testing.

use crate::types::{
    parse_amount, Account, InputError, OperationRecord, OperationType, RequestConfig,
    TransactionRequest,
};
use serde::Deserialize;
use std::io::Write;

/// CSV record structure for operation rows
///
/// Currency and amount are optional because balance queries carry neither.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CsvRecord {
    #[serde(rename = "type")]
    pub op: String,
    pub iban: String,
    pub currency: Option<String>,
    pub amount: Option<String>,
}

/// CSV record structure for account seed rows
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct SeedRecord {
    pub iban: String,
    pub currency: Option<String>,
    pub balance: Option<String>,
}

/// Convert a CsvRecord to an OperationRecord
///
/// This function:
/// - Parses the operation type (case-insensitive)
/// - Validates deposit/debit payloads exactly like the JSON boundary does
/// - Ignores currency and amount on balance rows
///
/// # Returns
///
/// Result containing either:
/// - Ok(OperationRecord) - Successfully converted record
/// - Err(String) - Error message describing the conversion failure
pub fn convert_csv_record(
    csv_record: CsvRecord,
    config: &RequestConfig,
) -> Result<OperationRecord, String> {
    let op = match csv_record.op.to_lowercase().as_str() {
        "balance" => OperationType::Balance,
        "deposit" => OperationType::Deposit,
        "debit" => OperationType::Debit,
        _ => {
            return Err(format!(
                "Invalid operation type: '{}' for IBAN '{}'",
                csv_record.op, csv_record.iban
            ))
        }
    };

    if op == OperationType::Balance {
        return Ok(OperationRecord::balance(csv_record.iban));
    }

    let request = build_request(&csv_record, config).map_err(|e| {
        format!(
            "[{}] {} for IBAN '{}': {}",
            e.code(),
            op.as_str(),
            csv_record.iban,
            e
        )
    })?;

    Ok(match op {
        OperationType::Debit => OperationRecord::debit(csv_record.iban, request),
        _ => OperationRecord::deposit(csv_record.iban, request),
    })
}

fn build_request(
    csv_record: &CsvRecord,
    config: &RequestConfig,
) -> Result<TransactionRequest, InputError> {
    let amount = match csv_record.amount.as_deref().map(str::trim) {
        Some(raw) if !raw.is_empty() => Some(parse_amount(raw)?),
        _ => None,
    };

    TransactionRequest::new(csv_record.currency.as_deref(), amount, config)
}

/// Write account balances to CSV format
///
/// Writes one row per (account, currency) with columns: iban, currency, balance.
/// Rows are sorted by IBAN then currency for deterministic output. Balances
/// keep their exact decimal scale. An account without balances is written as
/// a single row with empty currency and balance.
///
/// # Returns
///
/// * `Ok(())` if writing succeeded
/// * `Err(String)` if a write error occurred
pub fn write_balances_csv(accounts: &[Account], output: &mut dyn Write) -> Result<(), String> {
    use csv::Writer;

    let mut writer = Writer::from_writer(output);

    writer
        .write_record(["iban", "currency", "balance"])
        .map_err(|e| format!("Failed to write CSV header: {}", e))?;

    let mut sorted_accounts: Vec<&Account> = accounts.iter().collect();
    sorted_accounts.sort_by(|a, b| a.iban().cmp(b.iban()));

    for account in sorted_accounts {
        if account.balances().is_empty() {
            writer
                .write_record([account.iban(), "", ""])
                .map_err(|e| format!("Failed to write account record: {}", e))?;
            continue;
        }

        for (currency, balance) in account.balances() {
            let balance = balance.to_string();
            writer
                .write_record([account.iban(), currency.as_str(), balance.as_str()])
                .map_err(|e| format!("Failed to write account record: {}", e))?;
        }
    }

    writer
        .flush()
        .map_err(|e| format!("Failed to flush output: {}", e))?;

    Ok(())
}
