//! Chat relay errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while relaying a chat completion.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "details")]
pub enum RelayError {
    /// Remote unreachable or answered with a non-2xx status
    #[error("Upstream error{}: {message}", status.map(|s| format!(" ({})", s)).unwrap_or_default())]
    Upstream {
        /// HTTP status code when the remote answered at all
        status: Option<u16>,
        /// Description of the failure
        message: String,
    },

    /// Response did not have the expected shape
    #[error("Malformed completion response: {reason}")]
    MalformedResponse {
        /// What was missing or wrong
        reason: String,
    },
}
