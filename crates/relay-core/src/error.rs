//! Upstream call errors and their mapping onto the relay's domain errors.

use relay_types::{JobError, RelayError};
use serde_json::Value;
use thiserror::Error;

/// Failure of a single call to the inference provider.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum UpstreamError {
    /// Request never produced a response (DNS, connect, TLS, timeout).
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Remote answered with a non-2xx status.
    #[error("Upstream returned {status}: {body}")]
    Status { status: u16, body: String },

    /// 2xx answer whose body could not be decoded.
    #[error("Invalid upstream response: {message}")]
    InvalidResponse { message: String, body: String },
}

impl UpstreamError {
    /// HTTP status, if the remote answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Network(e) => e.status().map(|s| s.as_u16()),
            Self::Status { status, .. } => Some(*status),
            Self::InvalidResponse { .. } => None,
        }
    }

    /// Remote body as JSON when it parses, as a JSON string otherwise.
    pub fn body_json(&self) -> Option<Value> {
        let body = match self {
            Self::Network(_) => return None,
            Self::Status { body, .. } | Self::InvalidResponse { body, .. } => body,
        };
        if body.trim().is_empty() {
            return None;
        }
        Some(serde_json::from_str(body).unwrap_or_else(|_| Value::String(body.clone())))
    }

    /// Map a failure of the submission call.
    pub fn into_submission_error(self) -> JobError {
        if let Self::Status { status, .. } = &self {
            let status = *status;
            return JobError::SubmissionRejected {
                status,
                message: canonical_reason(status),
                body: self.body_json(),
            };
        }
        self.into_poll_error()
    }

    /// Map a failure of a polling call. Undecodable 2xx bodies are kept apart
    /// from transport failures.
    pub fn into_poll_error(self) -> JobError {
        if let Self::InvalidResponse { message, .. } = &self {
            return JobError::MalformedResponse { message: message.clone(), body: self.body_json() };
        }
        JobError::Transport { message: self.to_string(), status: self.status(), body: self.body_json() }
    }
}

impl From<UpstreamError> for RelayError {
    fn from(err: UpstreamError) -> Self {
        match err {
            UpstreamError::InvalidResponse { message, .. } => Self::MalformedResponse { reason: message },
            other => Self::Upstream { status: other.status(), message: other.to_string() },
        }
    }
}

fn canonical_reason(status: u16) -> String {
    reqwest::StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or("Unexpected status")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_error_to_submission_error() {
        let err = UpstreamError::Status { status: 401, body: r#"{"error":"bad key"}"#.to_string() };

        match err.into_submission_error() {
            JobError::SubmissionRejected { status, message, body } => {
                assert_eq!(status, 401);
                assert_eq!(message, "Unauthorized");
                assert_eq!(body, Some(json!({"error": "bad key"})));
            },
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_plain_text_body_kept_as_string() {
        let err = UpstreamError::Status { status: 502, body: "Bad Gateway".to_string() };
        assert_eq!(err.body_json(), Some(json!("Bad Gateway")));

        let job_err = err.into_poll_error();
        assert_eq!(job_err.raw_details(), Some(&json!("Bad Gateway")));
        assert!(job_err.is_transient());
    }

    #[test]
    fn test_empty_body_is_none() {
        let err = UpstreamError::Status { status: 500, body: "  ".to_string() };
        assert_eq!(err.body_json(), None);
    }

    #[test]
    fn test_invalid_response_is_not_transport() {
        let err = UpstreamError::InvalidResponse {
            message: "invalid type: integer `3`, expected a string".to_string(),
            body: r#"{"status":3}"#.to_string(),
        };

        match err.into_poll_error() {
            job_err @ JobError::MalformedResponse { .. } => {
                assert_eq!(job_err.raw_details(), Some(&json!({"status": 3})));
                assert!(!job_err.is_transient());
            },
            other => panic!("unexpected: {:?}", other),
        }

        let err = UpstreamError::InvalidResponse { message: "eof".to_string(), body: String::new() };
        assert!(matches!(err.into_submission_error(), JobError::MalformedResponse { body: None, .. }));
    }

    #[test]
    fn test_invalid_response_to_relay_error() {
        let err = UpstreamError::InvalidResponse {
            message: "expected value".to_string(),
            body: "<html>".to_string(),
        };
        assert!(matches!(RelayError::from(err), RelayError::MalformedResponse { .. }));
    }
}
