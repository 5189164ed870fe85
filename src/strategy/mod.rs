//! Processing strategy module
//!
//! Defines the Strategy pattern for complete operation processing pipelines:
//! CSV parsing, execution against the account store, and balance output.
//! The synchronous and asynchronous batch implementations are selected at
//! runtime.

use crate::cli::StrategyType;
use crate::core::InMemoryAccountStore;
use crate::types::RequestConfig;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

pub mod r#async;
pub mod sync;

pub use self::r#async::{AsyncProcessingStrategy, BatchConfig};
pub use sync::SyncProcessingStrategy;

/// Processing strategy trait for complete operation pipelines
pub trait ProcessingStrategy: Send + Sync {
    /// Apply every operation in `input_path` to `store`, then write all balances
    ///
    /// # Returns
    ///
    /// * `Ok(())` if processing completed, including runs where individual
    ///   operations were rejected
    /// * `Err(String)` if a fatal error occurred (input missing, output failed)
    ///
    /// Rejected operations and malformed rows are logged and skipped; they
    /// never abort the run.
    fn process(
        &self,
        input_path: &Path,
        store: Arc<InMemoryAccountStore>,
        output: &mut dyn Write,
    ) -> Result<(), String>;
}

/// Create a processing strategy based on the specified strategy type
///
/// `batch_config` is only used by the async strategy; `None` means defaults.
pub fn create_strategy(
    strategy_type: StrategyType,
    batch_config: Option<BatchConfig>,
    request_config: RequestConfig,
) -> Box<dyn ProcessingStrategy> {
    match strategy_type {
        StrategyType::Sync => Box::new(SyncProcessingStrategy::new(request_config)),
        StrategyType::Async => Box::new(AsyncProcessingStrategy::new(
            batch_config.unwrap_or_default(),
            request_config,
        )),
    }
}
