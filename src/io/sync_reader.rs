//! Synchronous CSV reader with iterator interface
//!
//! Provides a streaming iterator over operation records from a CSV file.
//! Delegates CSV format concerns to the csv_format module.
//!
//! # Iterator Interface
//!
//! SyncReader implements the Iterator trait, yielding `Result<OperationRecord, String>`
//! for each CSV row:
//!
//! ```no_run
//! use account_balance_engine::io::sync_reader::SyncReader;
//! use account_balance_engine::types::RequestConfig;
//! use std::path::Path;
//!
//! let reader = SyncReader::new(Path::new("operations.csv"), RequestConfig::default()).unwrap();
//! for result in reader {
//!     match result {
//!         Ok(record) => println!("{} {}", record.op().as_str(), record.iban()),
//!         Err(e) => eprintln!("Error: {}", e),
//!     }
//! }
//! ```
//!
//! # Error Handling
//!
//! - Fatal errors (file not found) are returned from `new()`
//! - Malformed rows are yielded as Err variants carrying the line number

use crate::io::csv_format::{convert_csv_record, CsvRecord};
use crate::types::{OperationRecord, RequestConfig};
use csv::{ReaderBuilder, Trim};
use std::fs::File;
use std::path::Path;

/// Synchronous CSV reader
///
/// Reads one row at a time; memory use does not grow with file size.
#[derive(Debug)]
pub struct SyncReader {
    reader: csv::Reader<File>,
    config: RequestConfig,
    line_num: usize,
}

impl SyncReader {
    /// Open an operations CSV file
    ///
    /// The CSV reader trims whitespace from all fields and accepts rows
    /// without trailing currency/amount columns (balance queries).
    ///
    /// # Returns
    ///
    /// * `Ok(SyncReader)` if file opened successfully
    /// * `Err(String)` if file could not be opened
    pub fn new(path: &Path, config: RequestConfig) -> Result<Self, String> {
        let file = File::open(path)
            .map_err(|e| format!("Failed to open file '{}': {}", path.display(), e))?;

        let reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .buffer_capacity(8 * 1024)
            .from_reader(file);

        Ok(Self {
            reader,
            config,
            line_num: 0,
        })
    }
}

impl Iterator for SyncReader {
    type Item = Result<OperationRecord, String>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut deserializer = self.reader.deserialize::<CsvRecord>();
        let next = deserializer.next()?;
        self.line_num += 1;
        // Header occupies line 1
        let line = self.line_num + 1;

        Some(match next {
            Ok(csv_record) => convert_csv_record(csv_record, &self.config)
                .map_err(|e| format!("Line {}: {}", line, e)),
            Err(e) => Err(format!("Line {}: CSV parse error: {}", line, e)),
        })
    }
}
