//! Account-related types for the Account Balance Engine
//!
//! This module defines the Account aggregate and the read-only balance
//! snapshot handed out by the query path.

use rust_decimal::Decimal;
use serde::ser::{Error as _, SerializeMap};
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// International Bank Account Number, the business key of an account
///
/// The format is opaque to the engine; it is only compared for equality.
pub type Iban = String;

/// ISO 4217 currency code (e.g. "USD")
pub type CurrencyCode = String;

/// Currency-keyed balance map
///
/// Ordered so that snapshots and CSV output are deterministic.
pub type Balances = BTreeMap<CurrencyCode, Decimal>;

/// Opaque persistent identity of an account
///
/// Assigned by the account store when the account is created and never
/// changed afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct AccountId(pub u64);

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Bank account aggregate
///
/// Holds one balance per currency the account has ever held. A missing key
/// means the currency was never held, which is not the same as a zero
/// balance.
///
/// Fields are private: callers read through accessors, and balances are
/// only changed by the ledger.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Account {
    id: AccountId,
    iban: Iban,
    #[serde(serialize_with = "serialize_balances")]
    balances: Balances,
}

impl Account {
    /// Create an account with the given identity and opening balances
    ///
    /// Only the account store creates accounts, so this stays crate-private.
    pub(crate) fn new(id: AccountId, iban: impl Into<Iban>, balances: Balances) -> Self {
        Account {
            id,
            iban: iban.into(),
            balances,
        }
    }

    /// The persistent identity of this account
    pub fn id(&self) -> AccountId {
        self.id
    }

    /// The IBAN of this account
    pub fn iban(&self) -> &str {
        &self.iban
    }

    /// All balances, keyed by currency code
    pub fn balances(&self) -> &Balances {
        &self.balances
    }

    /// Balance held in `currency`, or `None` if the account never held it
    pub fn balance(&self, currency: &str) -> Option<Decimal> {
        self.balances.get(currency).copied()
    }

    /// Whether the account has an entry for `currency`
    pub fn holds(&self, currency: &str) -> bool {
        self.balances.contains_key(currency)
    }

    /// Overwrite the balance for `currency`, creating the entry if absent
    pub(crate) fn set_balance(&mut self, currency: &str, amount: Decimal) {
        self.balances.insert(currency.to_string(), amount);
    }
}

/// Read-only balance snapshot for one account
///
/// Rendered by the boundary as `{"iban": ..., "balances": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccountBalanceResponse {
    /// The IBAN of the account
    pub iban: Iban,

    /// Balances at the time of the query
    #[serde(serialize_with = "serialize_balances")]
    pub balances: Balances,
}

impl From<&Account> for AccountBalanceResponse {
    fn from(account: &Account) -> Self {
        AccountBalanceResponse {
            iban: account.iban.clone(),
            balances: account.balances.clone(),
        }
    }
}

/// Render balances as JSON numbers carrying the exact decimal text
///
/// `1000.00` stays `1000.00`; it is never routed through a float or a string.
fn serialize_balances<S: Serializer>(balances: &Balances, serializer: S) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(balances.len()))?;
    for (currency, amount) in balances {
        let number = serde_json::Number::from_str(&amount.to_string()).map_err(S::Error::custom)?;
        map.serialize_entry(currency, &number)?;
    }
    map.end()
}
