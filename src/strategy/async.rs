//! Asynchronous batch processing strategy
//!
//! Multi-threaded implementation of the ProcessingStrategy trait. Operations
//! are read in batches and each batch is partitioned by IBAN.
//!
//! # Architecture
//!
//! ```text
//! AsyncProcessingStrategy
//!     ├── BatchConfig (batch_size, max_concurrent_batches)
//!     ├── AsyncReader (batch CSV reading)
//!     └── BatchProcessor (IBAN partitioning + tokio tasks)
//!         └── AccountService
//!             └── InMemoryAccountStore (DashMap + per-account locks)
//! ```
//!
//! # Ordering
//!
//! - Batches are processed one after another, so an account whose operations
//!   span several batches still sees them in file order
//! - Within a batch, each IBAN is handled by one task, sequentially
//! - Different IBANs run in parallel on the tokio multi-threaded runtime

use crate::core::r#async::BatchProcessor;
use crate::core::{AccountService, AccountStore, InMemoryAccountStore, IsoCurrencyValidator};
use crate::io::async_reader::AsyncReader;
use crate::io::csv_format::write_balances_csv;
use crate::strategy::ProcessingStrategy;
use crate::types::RequestConfig;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

/// Configuration for batch processing
///
/// Controls how operations are batched and the number of worker threads
/// for parallel processing within each batch.
#[derive(Clone, Debug)]
pub struct BatchConfig {
    /// Number of operations per batch
    pub batch_size: usize,
    /// Number of runtime worker threads
    pub max_concurrent_batches: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            batch_size: 1000,
            max_concurrent_batches: num_cpus::get(),
        }
    }
}

impl BatchConfig {
    /// Create a new BatchConfig with custom values
    ///
    /// Zero values fall back to the defaults with a warning.
    pub fn new(batch_size: usize, max_concurrent_batches: usize) -> Self {
        let default = Self::default();

        let batch_size = if batch_size == 0 {
            tracing::warn!(
                "Invalid batch_size ({}), using default ({})",
                batch_size,
                default.batch_size
            );
            default.batch_size
        } else {
            batch_size
        };

        let max_concurrent_batches = if max_concurrent_batches == 0 {
            tracing::warn!(
                "Invalid max_concurrent_batches ({}), using default ({})",
                max_concurrent_batches,
                default.max_concurrent_batches
            );
            default.max_concurrent_batches
        } else {
            max_concurrent_batches
        };

        Self {
            batch_size,
            max_concurrent_batches,
        }
    }
}

/// Asynchronous batch processing strategy
#[derive(Debug, Clone)]
pub struct AsyncProcessingStrategy {
    config: BatchConfig,
    request_config: RequestConfig,
}

impl AsyncProcessingStrategy {
    /// Create a new AsyncProcessingStrategy
    pub fn new(config: BatchConfig, request_config: RequestConfig) -> Self {
        Self {
            config,
            request_config,
        }
    }
}

impl ProcessingStrategy for AsyncProcessingStrategy {
    fn process(
        &self,
        input_path: &Path,
        store: Arc<InMemoryAccountStore>,
        output: &mut dyn Write,
    ) -> Result<(), String> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(self.config.max_concurrent_batches)
            .build()
            .map_err(|e| format!("Failed to create tokio runtime: {}", e))?;

        runtime.block_on(async {
            let service = Arc::new(AccountService::new(
                Arc::clone(&store),
                IsoCurrencyValidator::new(),
            ));
            let processor = BatchProcessor::new(service);

            let file = tokio::fs::File::open(input_path)
                .await
                .map_err(|e| format!("Failed to open file '{}': {}", input_path.display(), e))?;

            // csv-async reads through the futures-io traits
            let compat_file = tokio_util::compat::TokioAsyncReadCompatExt::compat(file);
            let mut reader = AsyncReader::new(compat_file, self.request_config);

            let mut processed = 0usize;
            loop {
                let batch = reader.read_batch(self.config.batch_size).await;
                if batch.is_empty() {
                    break;
                }

                // Finish this batch before reading the next one to keep
                // per-account ordering across batch boundaries
                processed += processor.process_batch(batch).await.len();
            }
            tracing::debug!(operations = processed, "async processing finished");

            write_balances_csv(&store.all_accounts(), output)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Balances;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes())
            .expect("Failed to write to temp file");
        file.flush().expect("Failed to flush temp file");
        file
    }

    fn store_with(ibans: &[(&str, &str, Decimal)]) -> Arc<InMemoryAccountStore> {
        let store = Arc::new(InMemoryAccountStore::new());
        for (iban, currency, amount) in ibans {
            let mut balances = Balances::new();
            balances.insert(currency.to_string(), *amount);
            store.create(iban, balances).unwrap();
        }
        store
    }

    #[test]
    fn test_batch_config_zero_values_fall_back() {
        let config = BatchConfig::new(0, 0);
        assert_eq!(config.batch_size, 1000);
        assert_eq!(config.max_concurrent_batches, num_cpus::get());
    }

    #[test]
    fn test_async_strategy_handles_missing_file() {
        let strategy = AsyncProcessingStrategy::new(BatchConfig::default(), RequestConfig::default());
        let mut output = Vec::new();

        let result = strategy.process(
            Path::new("nonexistent.csv"),
            Arc::new(InMemoryAccountStore::new()),
            &mut output,
        );
        assert!(result.unwrap_err().contains("Failed to open file"));
    }

    #[test]
    fn test_async_strategy_maintains_ordering_across_batches() {
        // Debits only succeed if the preceding deposits were applied first
        let file = create_temp_csv(
            "type,iban,currency,amount\n\
             deposit,IBAN1,USD,100\n\
             deposit,IBAN2,EUR,50\n\
             debit,IBAN1,USD,100\n\
             deposit,IBAN2,EUR,25\n\
             debit,IBAN2,EUR,75\n\
             debit,IBAN1,USD,20\n",
        );
        let store = store_with(&[("IBAN1", "USD", dec!(20.00)), ("IBAN2", "EUR", dec!(0))]);

        // Small batches force each account's operations across boundaries
        let strategy =
            AsyncProcessingStrategy::new(BatchConfig::new(2, num_cpus::get()), RequestConfig::default());
        let mut output = Vec::new();
        strategy.process(file.path(), store, &mut output).unwrap();

        assert_eq!(
            String::from_utf8(output).unwrap(),
            "iban,currency,balance\nIBAN1,USD,0.00\nIBAN2,EUR,0\n"
        );
    }

    #[test]
    fn test_async_strategy_matches_sync_output() {
        use crate::strategy::SyncProcessingStrategy;

        let content = "type,iban,currency,amount\n\
                       deposit,IBAN1,USD,100\n\
                       debit,IBAN1,USD,5000\n\
                       deposit,IBAN2,GBP,30\n\
                       debit,IBAN2,EUR,10\n\
                       balance,IBAN1\n";
        let file = create_temp_csv(content);
        let seed = [("IBAN1", "USD", dec!(10.00)), ("IBAN2", "EUR", dec!(10.00))];

        let mut sync_output = Vec::new();
        SyncProcessingStrategy::default()
            .process(file.path(), store_with(&seed), &mut sync_output)
            .unwrap();

        let mut async_output = Vec::new();
        AsyncProcessingStrategy::new(BatchConfig::default(), RequestConfig::default())
            .process(file.path(), store_with(&seed), &mut async_output)
            .unwrap();

        assert_eq!(sync_output, async_output);
    }
}
