//! Wire protocol types.
//!
//! - [`fireworks`] - requests and responses exchanged with the inference provider
//! - [`relay`] - bodies accepted and returned by the relay's own HTTP API

pub mod fireworks;
pub mod relay;
