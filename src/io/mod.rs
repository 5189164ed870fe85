//! I/O module
//!
//! Handles CSV parsing, account seeding and balance output.
//!
//! # Components
//!
//! - `csv_format` - CSV format handling (record conversion, output serialization)
//! - `seed` - Opening account state from a file or the demo set
//! - `sync_reader` - Synchronous CSV reader with iterator interface
//! - `async_reader` - Asynchronous CSV reader with batch reading interface

pub mod async_reader;
pub mod csv_format;
pub mod seed;
pub mod sync_reader;

pub use async_reader::AsyncReader;
pub use csv_format::{convert_csv_record, write_balances_csv, CsvRecord, SeedRecord};
pub use seed::{load_accounts, read_accounts, seed_demo_accounts, DEMO_ACCOUNTS};
pub use sync_reader::SyncReader;
