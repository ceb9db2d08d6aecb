//! Inference provider access.

mod client;
mod workflow;

pub use client::UpstreamClient;
pub use workflow::WorkflowClient;
