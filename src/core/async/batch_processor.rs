//! Batch processing with IBAN-based partitioning for async operation processing
//!
//! This module provides the `BatchProcessor` struct, which processes batches of
//! operation records concurrently while keeping the order of operations on each
//! individual account.
//!
//! # Design
//!
//! The `BatchProcessor` partitions a batch by IBAN. Each partition runs on its
//! own tokio task; operations inside a partition run sequentially in input
//! order. The account store already makes every single operation atomic, so
//! partitioning is only about preserving per-account ordering.
//!
//! # Architecture
//!
//! ```text
//! BatchProcessor
//!     └── Arc<AccountService<S, V>>  (shared operation executor)
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use crate::core::service::{log_outcome, AccountService};
use crate::core::traits::{AccountStore, CurrencyValidator};
use crate::types::{Iban, LedgerError, OperationOutcome, OperationRecord};

/// Result of processing a single operation
///
/// Contains the original record and the result of executing it.
#[derive(Debug, Clone)]
pub struct ProcessingResult {
    /// The operation record that was processed
    pub record: OperationRecord,

    /// The result of processing (outcome or error)
    pub result: Result<OperationOutcome, LedgerError>,
}

/// Batch processor with IBAN-based partitioning
#[derive(Debug)]
pub struct BatchProcessor<S, V> {
    /// Shared operation executor
    service: Arc<AccountService<S, V>>,
}

impl<S, V> Clone for BatchProcessor<S, V> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
        }
    }
}

impl<S, V> BatchProcessor<S, V>
where
    S: AccountStore + 'static,
    V: CurrencyValidator + 'static,
{
    /// Create a new BatchProcessor
    pub fn new(service: Arc<AccountService<S, V>>) -> Self {
        Self { service }
    }

    /// Partition a batch of operations by IBAN
    ///
    /// # Guarantees
    ///
    /// - Each record appears in exactly one partition
    /// - Records for each IBAN keep their original order
    pub fn partition_by_iban(
        &self,
        batch: Vec<OperationRecord>,
    ) -> HashMap<Iban, Vec<OperationRecord>> {
        let mut partitions: HashMap<Iban, Vec<OperationRecord>> = HashMap::new();

        for record in batch {
            partitions
                .entry(record.iban().to_string())
                .or_default()
                .push(record);
        }

        partitions
    }

    /// Process all operations for a single account sequentially
    ///
    /// All records are processed even if some fail; results keep input order.
    pub async fn process_account_operations(
        &self,
        records: Vec<OperationRecord>,
    ) -> Vec<ProcessingResult> {
        let mut results = Vec::with_capacity(records.len());

        for record in records {
            let result = self.service.execute(&record);
            log_outcome(&record, &result);
            results.push(ProcessingResult { record, result });
        }

        results
    }

    /// Process a batch of operations with IBAN-based partitioning
    ///
    /// Spawns one tokio task per IBAN and waits for all of them.
    ///
    /// # Returns
    ///
    /// One `ProcessingResult` per input record. Results for one IBAN keep
    /// their relative order; results across IBANs may interleave.
    pub async fn process_batch(&self, batch: Vec<OperationRecord>) -> Vec<ProcessingResult> {
        let partitions = self.partition_by_iban(batch);

        let mut tasks = Vec::with_capacity(partitions.len());
        for (_iban, records) in partitions {
            let processor = self.clone();
            tasks.push(tokio::spawn(async move {
                processor.process_account_operations(records).await
            }));
        }

        let mut results = Vec::new();
        for task in tasks {
            match task.await {
                Ok(account_results) => results.extend(account_results),
                Err(e) => tracing::error!("Account task panicked: {:?}", e),
            }
        }

        results
    }
}
