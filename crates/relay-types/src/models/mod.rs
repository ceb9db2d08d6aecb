//! Core domain models for the relay.

mod config;
mod job;

pub use config::{
    default_base_url, ChatConfig, ImageConfig, PollPolicy, RelayConfig, UpstreamConfig,
};
pub use job::{GenerationRequest, JobHandle, JobOutcome, JobStatus, PollAttempt, StatusClass};
