//! Account Balance Engine CLI
//!
//! Applies balance, deposit and debit operations from a CSV file to a set of
//! multi-currency IBAN accounts and prints the final balances.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- operations.csv > balances.csv
//! cargo run -- --accounts accounts.csv operations.csv > balances.csv
//! cargo run -- --strategy sync --min-amount 0.01 operations.csv > balances.csv
//! cargo run -- --strategy async --batch-size 2000 --max-concurrent 8 operations.csv > balances.csv
//! ```
//!
//! Without `--accounts` the store starts with two demo accounts.
//! Rejected operations are logged to stderr and skipped.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (file not found, invalid accounts file, output failure, etc.)

use account_balance_engine::cli;
use account_balance_engine::core::InMemoryAccountStore;
use account_balance_engine::io::{load_accounts, seed_demo_accounts};
use account_balance_engine::logging::init_cli_logger;
use account_balance_engine::strategy;
use std::process;
use std::sync::Arc;

fn main() {
    let args = cli::parse_args();
    init_cli_logger(args.verbose);

    let store = Arc::new(InMemoryAccountStore::new());
    let seeded = match &args.accounts_file {
        Some(path) => load_accounts(path, &store),
        None => seed_demo_accounts(&store),
    };
    if let Err(e) = seeded {
        tracing::error!("Error: {}", e);
        process::exit(1);
    }

    let strategy = {
        let batch_config = if args.strategy == cli::StrategyType::Async {
            Some(args.to_batch_config())
        } else {
            None
        };
        strategy::create_strategy(
            args.strategy.clone(),
            batch_config,
            args.to_request_config(),
        )
    };

    let mut output = std::io::stdout();
    if let Err(e) = strategy.process(&args.input_file, store, &mut output) {
        tracing::error!("Error: {}", e);
        process::exit(1);
    }
}
