//! Synchronous processing strategy
//!
//! Single-threaded pipeline that delegates:
//! - CSV parsing to `SyncReader` (iterator interface)
//! - Operation execution to `AccountService`
//! - CSV output to `csv_format::write_balances_csv`
//!
//! Records are processed one at a time, so memory use is bounded by the
//! number of accounts rather than the number of operations.

use crate::core::service::log_outcome;
use crate::core::{AccountService, AccountStore, InMemoryAccountStore, IsoCurrencyValidator};
use crate::io::csv_format::write_balances_csv;
use crate::io::sync_reader::SyncReader;
use crate::strategy::ProcessingStrategy;
use crate::types::RequestConfig;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

/// Synchronous processing strategy
///
/// # Examples
///
/// ```no_run
/// use account_balance_engine::core::InMemoryAccountStore;
/// use account_balance_engine::strategy::{ProcessingStrategy, SyncProcessingStrategy};
/// use account_balance_engine::types::RequestConfig;
/// use std::path::Path;
/// use std::sync::Arc;
///
/// let strategy = SyncProcessingStrategy::new(RequestConfig::default());
/// let store = Arc::new(InMemoryAccountStore::new());
/// let mut output = std::io::stdout();
///
/// strategy
///     .process(Path::new("operations.csv"), store, &mut output)
///     .expect("Processing failed");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SyncProcessingStrategy {
    request_config: RequestConfig,
}

impl SyncProcessingStrategy {
    /// Create a sync strategy validating requests with `request_config`
    pub fn new(request_config: RequestConfig) -> Self {
        Self { request_config }
    }
}

impl ProcessingStrategy for SyncProcessingStrategy {
    fn process(
        &self,
        input_path: &Path,
        store: Arc<InMemoryAccountStore>,
        output: &mut dyn Write,
    ) -> Result<(), String> {
        let service = AccountService::new(Arc::clone(&store), IsoCurrencyValidator::new());
        let reader = SyncReader::new(input_path, self.request_config)?;

        for result in reader {
            match result {
                Ok(record) => {
                    let outcome = service.execute(&record);
                    log_outcome(&record, &outcome);
                }
                Err(e) => tracing::warn!(error = %e, "skipping operation"),
            }
        }

        write_balances_csv(&store.all_accounts(), output)
    }
}
