//! Asynchronous execution of account operations
//!
//! This module provides batch processing on top of the thread-safe core
//! components.
//!
//! # Thread Safety
//!
//! - Operations on different accounts run in parallel tokio tasks
//! - Operations on the same account run sequentially, in input order
//! - Each operation is atomic through the account store's per-account lock

pub mod batch_processor;

pub use batch_processor::{BatchProcessor, ProcessingResult};
