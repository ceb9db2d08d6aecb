//! # Relay Types
//!
//! Core types, models, and error definitions for the inference relay.
//!
//! - **`error`** - Typed error hierarchy for image jobs, chat relay, and configuration
//! - **`models`** - Domain models (generation requests, job outcomes, config)
//! - **`protocol`** - Wire types for the inbound relay API and the upstream provider
//!
//! ## Architecture Role
//!
//! `relay-types` sits at the bottom of the dependency graph:
//!
//! ```text
//!         relay-types (this crate)
//!                 │
//!                 ▼
//!            relay-core
//!                 │
//!                 ▼
//!           relay-server
//! ```

pub mod error;
pub mod models;
pub mod protocol;

pub use error::{ConfigError, JobError, RelayError};

pub use models::{
    ChatConfig, GenerationRequest, ImageConfig, JobHandle, JobOutcome, JobStatus, PollAttempt,
    PollPolicy, RelayConfig, StatusClass, UpstreamConfig,
};
