//! Transport-agnostic request boundary
//!
//! Turns raw path parameters and JSON bodies into validated operations, and
//! operation results into status codes with JSON bodies. An HTTP server only
//! needs to route these three calls:
//!
//! - `GET  /accounts/{iban}/balances` → [`AccountApi::get_balances`]
//! - `POST /accounts/{iban}/deposit`  → [`AccountApi::deposit`]
//! - `POST /accounts/{iban}/debit`    → [`AccountApi::debit`]

pub mod error_response;
pub mod handlers;

pub use error_response::{ApiResponse, ErrorResponse};
pub use handlers::{parse_transaction_body, AccountApi};
