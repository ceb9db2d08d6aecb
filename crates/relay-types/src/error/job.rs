//! Image generation job errors.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Errors that end an image generation job without an image.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum JobError {
    /// Submission was accepted at the HTTP level but carried no usable request id
    #[error("No request ID returned")]
    MissingRequestId {
        /// Raw submission response, kept for diagnosis
        response: Option<Value>,
    },

    /// Remote refused the submission (non-2xx answer)
    #[error("Submission rejected ({status}): {message}")]
    SubmissionRejected {
        /// HTTP status code returned by the submission endpoint
        status: u16,
        /// Short description of the rejection
        message: String,
        /// Raw error payload from the remote, if any
        body: Option<Value>,
    },

    /// Remote explicitly reported the job as failed
    #[error("Generation failed: {}", describe_details(details.as_ref()))]
    RemoteFailure {
        /// Status label that ended the job ("Failed", "Error", ...)
        status: String,
        /// `details` field from the result response
        details: Option<Value>,
    },

    /// Network or HTTP-level failure talking to the remote
    #[error("Transport error: {message}")]
    Transport {
        /// Description of the failure
        message: String,
        /// HTTP status code when the remote answered at all
        status: Option<u16>,
        /// Raw error payload from the remote, if any
        body: Option<Value>,
    },

    /// Remote answered 2xx with a body that could not be decoded
    #[error("Malformed upstream response: {message}")]
    MalformedResponse {
        /// Decoder error
        message: String,
        /// Raw body as received, if any
        body: Option<Value>,
    },

    /// Attempt budget consumed without reaching a terminal state
    #[error(
        "Polling failed to return a successful result in time ({attempts} attempts, last status: {})",
        last_status.as_deref().unwrap_or("none")
    )]
    TimedOut {
        /// Number of polling calls made
        attempts: u32,
        /// Last status label reported by the remote
        last_status: Option<String>,
    },
}

impl JobError {
    /// Raw remote error payload, if the remote sent one.
    ///
    /// A submission response without an id is not an error payload, so
    /// [`JobError::MissingRequestId`] reports none.
    pub fn raw_details(&self) -> Option<&Value> {
        match self {
            Self::MissingRequestId { .. } | Self::TimedOut { .. } => None,
            Self::SubmissionRejected { body, .. }
            | Self::Transport { body, .. }
            | Self::MalformedResponse { body, .. } => body.as_ref(),
            Self::RemoteFailure { details, .. } => details.as_ref(),
        }
    }

    /// Check if the remote never accepted the job.
    pub const fn is_submission_error(&self) -> bool {
        matches!(self, Self::MissingRequestId { .. } | Self::SubmissionRejected { .. })
    }

    /// Check if this is a reachability problem that may clear up on its own.
    ///
    /// Network failures and 5xx answers qualify; 4xx answers do not.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport { status, .. } => status.map_or(true, |s| s >= 500),
            _ => false,
        }
    }
}

fn describe_details(details: Option<&Value>) -> String {
    match details {
        None | Some(Value::Null) => "Unknown error".to_string(),
        Some(Value::String(s)) if s.is_empty() => "Unknown error".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
