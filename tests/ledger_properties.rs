//! Property tests for the balance ledger
//!
//! Random operation sequences against a single account must keep every
//! balance non-negative, move balances only in the direction of the
//! operation, and leave the account untouched on rejection.

use account_balance_engine::core::{
    AccountService, AccountStore, InMemoryAccountStore, IsoCurrencyValidator,
};
use account_balance_engine::types::{Balances, LedgerError};
use proptest::prelude::*;
use rust_decimal::Decimal;
use std::sync::Arc;

const IBAN: &str = "EE3822002210201578458065";
const CURRENCIES: [&str; 3] = ["USD", "EUR", "GBP"];

type Service = AccountService<InMemoryAccountStore, IsoCurrencyValidator>;

fn service_with(usd: Decimal) -> (Arc<InMemoryAccountStore>, Service) {
    let store = Arc::new(InMemoryAccountStore::new());
    let mut balances = Balances::new();
    balances.insert("USD".to_string(), usd);
    store.create(IBAN, balances).unwrap();
    let service = AccountService::new(Arc::clone(&store), IsoCurrencyValidator::new());
    (store, service)
}

fn balances(store: &InMemoryAccountStore) -> Balances {
    store.find_by_iban(IBAN).unwrap().balances().clone()
}

/// Positive amounts with two decimal places, 0.01 to 100000.00
fn amount() -> impl Strategy<Value = Decimal> {
    (1i64..10_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

#[derive(Debug, Clone)]
enum Op {
    Deposit(usize, Decimal),
    Debit(usize, Decimal),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..CURRENCIES.len(), amount()).prop_map(|(c, a)| Op::Deposit(c, a)),
        (0..CURRENCIES.len(), amount()).prop_map(|(c, a)| Op::Debit(c, a)),
    ]
}

proptest! {
    #[test]
    fn debit_then_deposit_restores_balance(start in amount(), take in amount()) {
        prop_assume!(take <= start);
        let (store, service) = service_with(start);

        service.debit(IBAN, "USD", take).unwrap();
        service.deposit(IBAN, "USD", take).unwrap();

        prop_assert_eq!(balances(&store)["USD"], start);
    }

    #[test]
    fn balances_never_go_negative(start in amount(), ops in prop::collection::vec(op(), 1..40)) {
        let (store, service) = service_with(start);

        for op in ops {
            let before = balances(&store);
            let (currency, result) = match op {
                Op::Deposit(c, a) => (CURRENCIES[c], service.deposit(IBAN, CURRENCIES[c], a)),
                Op::Debit(c, a) => (CURRENCIES[c], service.debit(IBAN, CURRENCIES[c], a)),
            };
            let after = balances(&store);

            match (&op, result) {
                (_, Err(_)) => prop_assert_eq!(&after, &before),
                (Op::Deposit(..), Ok(_)) => {
                    prop_assert!(after[currency] > before.get(currency).copied().unwrap_or_default());
                }
                (Op::Debit(..), Ok(_)) => prop_assert!(after[currency] < before[currency]),
            }

            // Only the addressed currency may change
            for (code, balance) in &after {
                prop_assert!(*balance >= Decimal::ZERO);
                if code != currency {
                    prop_assert_eq!(before.get(code), Some(balance));
                }
            }
        }
    }

    #[test]
    fn overdraft_is_rejected_without_change(start in amount(), extra in amount()) {
        let (store, service) = service_with(start);
        let requested = start + extra;

        let result = service.debit(IBAN, "USD", requested);

        prop_assert_eq!(result, Err(LedgerError::insufficient_funds(IBAN, requested, start)));
        prop_assert_eq!(balances(&store)["USD"], start);
    }

    #[test]
    fn missing_account_wins_over_other_checks(
        currency in "[A-Za-z]{0,4}",
        raw in any::<i64>(),
    ) {
        let (_store, service) = service_with(Decimal::ONE_HUNDRED);
        let amount = Decimal::new(raw, 2);

        prop_assert_eq!(
            service.deposit("unknown-iban", &currency, amount).unwrap_err(),
            LedgerError::account_not_found("unknown-iban")
        );
        prop_assert_eq!(
            service.debit("unknown-iban", &currency, amount).unwrap_err(),
            LedgerError::account_not_found("unknown-iban")
        );
    }
}
