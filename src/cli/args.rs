use crate::strategy::BatchConfig;
use crate::types::RequestConfig;
use clap::{Parser, ValueEnum};
use rust_decimal::Decimal;
use std::path::PathBuf;

/// Apply balance, deposit and debit operations to multi-currency IBAN accounts
#[derive(Parser, Debug)]
#[command(name = "account-balance-engine")]
#[command(
    about = "Apply balance, deposit and debit operations to multi-currency IBAN accounts",
    long_about = None
)]
pub struct CliArgs {
    /// Input CSV file path containing operation records
    #[arg(value_name = "OPERATIONS", help = "Path to the operations CSV file")]
    pub input_file: PathBuf,

    /// Opening account state
    #[arg(
        long = "accounts",
        value_name = "FILE",
        help = "Accounts CSV (iban,currency,balance); the demo accounts are used when omitted"
    )]
    pub accounts_file: Option<PathBuf>,

    /// Processing strategy
    #[arg(
        long = "strategy",
        value_name = "STRATEGY",
        default_value = "async",
        help = "Processing strategy: 'sync' for synchronous or 'async' for asynchronous"
    )]
    pub strategy: StrategyType,

    /// Number of operations per batch (async mode only)
    #[arg(
        long = "batch-size",
        value_name = "SIZE",
        help = "Number of operations per batch (default: 1000)"
    )]
    pub batch_size: Option<usize>,

    /// Number of worker threads (async mode only)
    #[arg(
        long = "max-concurrent",
        value_name = "COUNT",
        help = "Number of worker threads processing a batch (default: CPU cores)"
    )]
    pub max_concurrent_batches: Option<usize>,

    /// Smallest accepted deposit/debit amount
    #[arg(
        long = "min-amount",
        value_name = "DECIMAL",
        default_value = "10",
        help = "Smallest accepted deposit/debit amount, in any currency"
    )]
    pub min_amount: Decimal,

    /// Verbose logging
    #[arg(short = 'v', long = "verbose", help = "Log every applied operation")]
    pub verbose: bool,
}

/// Available processing strategies
#[derive(Clone, Debug, PartialEq, ValueEnum)]
pub enum StrategyType {
    Sync,
    Async,
}

impl CliArgs {
    /// Create a BatchConfig from CLI arguments
    ///
    /// Missing values fall back to defaults; zero values are replaced by
    /// defaults with a warning.
    pub fn to_batch_config(&self) -> BatchConfig {
        if self.batch_size.is_some() || self.max_concurrent_batches.is_some() {
            let default = BatchConfig::default();
            BatchConfig::new(
                self.batch_size.unwrap_or(default.batch_size),
                self.max_concurrent_batches
                    .unwrap_or(default.max_concurrent_batches),
            )
        } else {
            BatchConfig::default()
        }
    }

    /// Create the request validation settings
    pub fn to_request_config(&self) -> RequestConfig {
        RequestConfig {
            minimum_amount: self.min_amount,
        }
    }
}
