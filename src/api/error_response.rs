//! Response envelopes
//!
//! Every failure, whether raised by input validation or by the ledger, is
//! rendered with the same body shape:
//!
//! ```json
//! { "dateTimeStamp": "2024-05-01 12:00:00", "status": 404,
//!   "errorCode": "IBAN_NOT_FOUND", "message": "...", "path": "/accounts/X/balances" }
//! ```

use crate::types::{InputError, LedgerError};
use serde::Serialize;
use serde_json::Value;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Error body returned for any rejected request
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub date_time_stamp: String,
    pub status: u16,
    pub error_code: String,
    pub message: String,
    pub path: String,
}

impl ErrorResponse {
    /// Build an error body stamped with the current local time
    pub fn new(status: u16, error_code: &str, message: impl Into<String>, path: &str) -> Self {
        Self {
            date_time_stamp: chrono::Local::now().format(TIMESTAMP_FORMAT).to_string(),
            status,
            error_code: error_code.to_string(),
            message: message.into(),
            path: path.to_string(),
        }
    }

    pub fn from_ledger(error: &LedgerError, path: &str) -> Self {
        Self::new(
            error.category().http_status(),
            error.code(),
            error.to_string(),
            path,
        )
    }

    pub fn from_input(error: &InputError, path: &str) -> Self {
        Self::new(
            error.category().http_status(),
            error.code(),
            error.to_string(),
            path,
        )
    }
}

/// Status code and JSON body produced by the boundary
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    /// 200 response with a serialized body
    pub fn ok<T: Serialize>(body: &T) -> Self {
        Self {
            status: 200,
            body: serde_json::json!(body),
        }
    }

    /// Error response; status is taken from the error body
    pub fn error(error: ErrorResponse) -> Self {
        Self {
            status: error.status,
            body: serde_json::json!(error),
        }
    }

    /// `true` for 2xx statuses
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
