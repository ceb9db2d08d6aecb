//! Typed error definitions for the relay.
//!
//! All errors are designed to be:
//!
//! - **Serializable** for API responses via serde
//! - **Displayable** for logging via Display trait
//! - **Matchable** for error handling logic via enum variants

mod config;
mod job;
mod relay;

pub use config::ConfigError;
pub use job::JobError;
pub use relay::RelayError;
