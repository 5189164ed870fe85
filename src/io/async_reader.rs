//! Asynchronous CSV reader with batch interface
//!
//! Streams operation records with csv-async and hands them out in batches
//! for the async processing strategy.
//!
//! ```text
//! CSV Reader → AsyncReader → Batches of OperationRecords
//!                  ↓
//!           csv_format module
//!           (CsvRecord, convert_csv_record)
//! ```

use crate::io::csv_format::{convert_csv_record, CsvRecord};
use crate::types::{OperationRecord, RequestConfig};
use csv_async::AsyncReaderBuilder;
use futures::io::AsyncRead;
use futures::stream::StreamExt;

/// Asynchronous CSV reader
///
/// Maintains streaming behavior with constant memory usage per batch.
pub struct AsyncReader<R: AsyncRead + Unpin> {
    csv_reader: csv_async::AsyncDeserializer<R>,
    config: RequestConfig,
}

impl<R: AsyncRead + Unpin + Send + 'static> AsyncReader<R> {
    /// Create a new AsyncReader from an async reader
    pub fn new(reader: R, config: RequestConfig) -> Self {
        let csv_reader = AsyncReaderBuilder::new()
            .flexible(true)
            .trim(csv_async::Trim::All)
            .create_deserializer(reader);

        Self { csv_reader, config }
    }

    /// Read a batch of operation records
    ///
    /// Reads up to `batch_size` rows. Rows that fail to parse or validate
    /// are logged and skipped.
    ///
    /// # Returns
    ///
    /// The converted records; an empty vector once the input is exhausted.
    pub async fn read_batch(&mut self, batch_size: usize) -> Vec<OperationRecord> {
        let mut batch = Vec::with_capacity(batch_size);
        let mut records = self.csv_reader.deserialize::<CsvRecord>();

        while batch.len() < batch_size {
            match records.next().await {
                Some(Ok(csv_record)) => match convert_csv_record(csv_record, &self.config) {
                    Ok(record) => batch.push(record),
                    Err(e) => tracing::warn!(error = %e, "skipping operation"),
                },
                Some(Err(e)) => tracing::warn!(error = %e, "CSV parse error"),
                None => break,
            }
        }

        batch
    }
}
