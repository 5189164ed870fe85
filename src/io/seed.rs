//! Account seeding
//!
//! Loads the opening state of the account store, either from an accounts CSV
//! (`iban,currency,balance`) or from the built-in demo accounts.
//!
//! Rows for the same IBAN accumulate into one account, created in order of
//! first appearance. A row with an empty currency creates an account without
//! balances. Any malformed row aborts seeding: a partially seeded store
//! would silently change what later operations see.

use crate::core::InMemoryAccountStore;
use crate::io::csv_format::SeedRecord;
use crate::types::{parse_amount, Balances};
use csv::{ReaderBuilder, Trim};
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Demo accounts used when no accounts file is supplied
pub const DEMO_ACCOUNTS: [(&str, &[(&str, &str)]); 2] = [
    (
        "EE3822002210201578458065",
        &[("USD", "1000.00"), ("EUR", "500.00")],
    ),
    (
        "ES6112343456420456323532",
        &[("GBP", "100.00"), ("IDR", "10000000.00")],
    ),
];

/// Seed the store from an accounts CSV file
///
/// # Returns
///
/// * `Ok(count)` - number of accounts created
/// * `Err(String)` - the file could not be read or a row is invalid
pub fn load_accounts(path: &Path, store: &InMemoryAccountStore) -> Result<usize, String> {
    let file = File::open(path)
        .map_err(|e| format!("Failed to open accounts file '{}': {}", path.display(), e))?;
    read_accounts(file, store)
}

/// Seed the store from any reader producing accounts CSV
pub fn read_accounts<R: Read>(reader: R, store: &InMemoryAccountStore) -> Result<usize, String> {
    let mut csv_reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader);

    let mut order: Vec<String> = Vec::new();
    let mut accounts: HashMap<String, Balances> = HashMap::new();

    for (index, result) in csv_reader.deserialize::<SeedRecord>().enumerate() {
        // Header is line 1
        let line = index + 2;
        let record = result.map_err(|e| format!("Accounts CSV parse error at line {}: {}", line, e))?;

        if !accounts.contains_key(&record.iban) {
            order.push(record.iban.clone());
        }
        let balances = accounts.entry(record.iban.clone()).or_default();

        let currency = match record.currency.as_deref().map(str::trim) {
            Some(code) if !code.is_empty() => code.to_string(),
            _ => continue,
        };

        let raw = record.balance.as_deref().unwrap_or("");
        let amount = parse_amount(raw).map_err(|e| format!("Line {}: {}", line, e))?;

        if balances.insert(currency.clone(), amount).is_some() {
            return Err(format!(
                "Line {}: duplicate '{}' balance for IBAN '{}'",
                line, currency, record.iban
            ));
        }
    }

    for iban in &order {
        let balances = accounts.remove(iban).unwrap_or_default();
        store.create(iban, balances).map_err(|e| e.to_string())?;
    }

    tracing::info!(accounts = order.len(), "account store seeded");
    Ok(order.len())
}

/// Seed the store with the built-in demo accounts
pub fn seed_demo_accounts(store: &InMemoryAccountStore) -> Result<usize, String> {
    for (iban, entries) in DEMO_ACCOUNTS {
        let mut balances = Balances::new();
        for (currency, amount) in entries {
            let amount = parse_amount(amount).map_err(|e| e.to_string())?;
            balances.insert(currency.to_string(), amount);
        }
        store.create(iban, balances).map_err(|e| e.to_string())?;
    }

    tracing::info!(accounts = DEMO_ACCOUNTS.len(), "demo accounts seeded");
    Ok(DEMO_ACCOUNTS.len())
}
