//! Image generation job models.
//!
//! Everything here lives for a single invocation: a request is built, submitted,
//! polled, and settles into exactly one [`JobOutcome`].

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::time::Duration;

use super::config::ImageConfig;
use crate::error::JobError;

/// Parameters for one image generation job.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GenerationRequest {
    /// Text prompt
    pub prompt: String,
    /// Output width in pixels
    pub width: u32,
    /// Output height in pixels
    pub height: u32,
    /// Number of diffusion steps
    pub steps: u32,
    /// Classifier-free guidance scale
    pub guidance_scale: f32,
}

impl GenerationRequest {
    /// Build a request from a prompt, filling every parameter from `defaults`.
    pub fn new(prompt: impl Into<String>, defaults: &ImageConfig) -> Self {
        Self {
            prompt: prompt.into(),
            width: defaults.width,
            height: defaults.height,
            steps: defaults.steps,
            guidance_scale: defaults.guidance_scale,
        }
    }
}

/// Opaque identifier of an accepted remote job.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JobHandle {
    request_id: String,
}

impl JobHandle {
    /// Wrap a request id. Returns `None` for an empty id.
    pub fn new(request_id: impl Into<String>) -> Option<Self> {
        let request_id = request_id.into();
        if request_id.is_empty() {
            None
        } else {
            Some(Self { request_id })
        }
    }

    pub fn request_id(&self) -> &str {
        &self.request_id
    }
}

impl fmt::Display for JobHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.request_id)
    }
}

/// Coarse class of a remote status label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    /// Job finished; a result payload should be present
    Success,
    /// Job will never succeed
    Failure,
    /// Keep waiting
    InProgress,
}

/// Status label reported by the result endpoint.
///
/// Matching is exact and case-sensitive. Anything unrecognized lands in
/// [`JobStatus::Other`] and is treated as still running.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobStatus {
    Ready,
    Complete,
    Finished,
    Failed,
    Error,
    TaskNotFound,
    /// Response carried no status field
    Missing,
    /// Any other label ("Pending", "Processing", "Queued", ...)
    Other(String),
}

impl JobStatus {
    /// Parse a raw label. Total: every input maps to some status.
    pub fn from_label(label: Option<&str>) -> Self {
        match label {
            None => Self::Missing,
            Some("Ready") => Self::Ready,
            Some("Complete") => Self::Complete,
            Some("Finished") => Self::Finished,
            Some("Failed") => Self::Failed,
            Some("Error") => Self::Error,
            Some("Task not found") => Self::TaskNotFound,
            Some(other) => Self::Other(other.to_string()),
        }
    }

    /// Parse the raw `status` field. Non-string values are kept verbatim as
    /// [`JobStatus::Other`] and so count as still running.
    pub fn from_value(value: Option<&Value>) -> Self {
        match value {
            None | Some(Value::Null) => Self::Missing,
            Some(Value::String(label)) => Self::from_label(Some(label)),
            Some(other) => Self::Other(other.to_string()),
        }
    }

    pub const fn class(&self) -> StatusClass {
        match self {
            Self::Ready | Self::Complete | Self::Finished => StatusClass::Success,
            Self::Failed | Self::Error | Self::TaskNotFound => StatusClass::Failure,
            Self::Missing | Self::Other(_) => StatusClass::InProgress,
        }
    }

    /// Label as reported by the remote (empty for [`JobStatus::Missing`]).
    pub fn label(&self) -> &str {
        match self {
            Self::Ready => "Ready",
            Self::Complete => "Complete",
            Self::Finished => "Finished",
            Self::Failed => "Failed",
            Self::Error => "Error",
            Self::TaskNotFound => "Task not found",
            Self::Missing => "",
            Self::Other(label) => label,
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => f.write_str("<missing>"),
            other => f.write_str(other.label()),
        }
    }
}

/// One polling iteration.
#[derive(Debug, Clone, PartialEq)]
pub struct PollAttempt {
    /// 1-based attempt number
    pub attempt: u32,
    /// Wait that preceded this attempt (zero for the first)
    pub delay_before: Duration,
    pub status: JobStatus,
    /// `result` object from the response, if any
    pub result_payload: Option<Value>,
}

/// Terminal value of one image generation job.
#[derive(Debug, Clone, PartialEq)]
pub enum JobOutcome {
    Succeeded {
        image_url: String,
    },
    Failed(JobError),
    TimedOut {
        /// Polling calls made before giving up
        attempts: u32,
        /// Last label seen, if any attempt got that far
        last_status: Option<String>,
    },
}

impl JobOutcome {
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded { .. })
    }

    /// Collapse into the image URL or the error that explains its absence.
    pub fn into_result(self) -> Result<String, JobError> {
        match self {
            Self::Succeeded { image_url } => Ok(image_url),
            Self::Failed(err) => Err(err),
            Self::TimedOut { attempts, last_status } => Err(JobError::TimedOut { attempts, last_status }),
        }
    }
}

impl From<JobError> for JobOutcome {
    fn from(err: JobError) -> Self {
        Self::Failed(err)
    }
}
