//! # Relay Core
//!
//! Core logic for the inference relay.
//!
//! ```text
//! relay-core/src/
//! ├── upstream/      # reqwest client for the inference provider
//! ├── completion.rs  # stateless chat completion passthrough
//! ├── backoff.rs     # multiplicative, capped polling delays
//! ├── poller/        # image job submit-and-poll state machine
//! ├── handlers/      # axum handlers for /chat and /generate-image
//! ├── middleware/    # CORS
//! └── server.rs      # AppState and router assembly
//! ```

#![cfg_attr(test, allow(clippy::panic, clippy::float_cmp, clippy::unwrap_used))]

pub mod backoff;
pub mod completion;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod poller;
pub mod server;
pub mod upstream;

pub use backoff::Backoff;
pub use completion::CompletionRelay;
pub use error::UpstreamError;
pub use poller::{JobApi, JobPoller};
pub use server::{build_relay_router, AppState};
pub use upstream::{UpstreamClient, WorkflowClient};
