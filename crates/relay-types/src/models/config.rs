//! Relay configuration models.
//!
//! A [`RelayConfig`] is assembled once at startup and handed to each component
//! at construction. Defaults reproduce the behaviour of the hosted Fireworks
//! endpoints.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use validator::{Validate, ValidationError};

use crate::error::ConfigError;

pub fn default_base_url() -> String {
    "https://api.fireworks.ai/inference/v1".to_string()
}

fn default_chat_model() -> String {
    "accounts/fireworks/models/llama4-scout-instruct-basic".to_string()
}

fn default_image_model() -> String {
    "accounts/fireworks/models/flux-kontext-pro".to_string()
}

/// Full relay configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Validate)]
pub struct RelayConfig {
    #[serde(default)]
    #[validate(nested)]
    pub upstream: UpstreamConfig,
    #[serde(default)]
    #[validate(nested)]
    pub chat: ChatConfig,
    #[serde(default)]
    #[validate(nested)]
    pub image: ImageConfig,
    #[serde(default)]
    #[validate(nested)]
    pub poll: PollPolicy,
}

impl RelayConfig {
    /// Validate and return self, or the first offending field.
    pub fn validated(self) -> Result<Self, ConfigError> {
        self.validate().map_err(|e| ConfigError::from_validation(&e))?;
        Ok(self)
    }
}

/// Remote provider connection settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Validate)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Base URL of the inference API (no trailing slash needed)
    #[validate(url)]
    pub base_url: String,
    /// Bearer credential. Not checked locally; the remote rejects bad keys.
    pub api_key: String,
    /// Timeout for a single remote call, in seconds
    #[validate(range(min = 1_u64, max = 3600_u64))]
    pub request_timeout_secs: u64,
}

pub const fn default_request_timeout() -> u64 {
    120
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: String::new(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl UpstreamConfig {
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Fixed parameters of the chat completion passthrough.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Validate)]
#[serde(default)]
pub struct ChatConfig {
    #[validate(length(min = 1_u64))]
    pub model: String,
    #[validate(range(min = 1_u32, max = 32768_u32))]
    pub max_tokens: u32,
    #[validate(range(min = 0.0_f32, max = 2.0_f32))]
    pub temperature: f32,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self { model: default_chat_model(), max_tokens: 300, temperature: 0.7 }
    }
}

/// Image workflow model and per-request defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Validate)]
#[serde(default)]
pub struct ImageConfig {
    #[validate(length(min = 1_u64))]
    pub model: String,
    #[validate(range(min = 64_u32, max = 4096_u32))]
    pub width: u32,
    #[validate(range(min = 64_u32, max = 4096_u32))]
    pub height: u32,
    #[validate(range(min = 1_u32, max = 500_u32))]
    pub steps: u32,
    #[validate(range(min = 0.0_f32, max = 50.0_f32))]
    pub guidance_scale: f32,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            model: default_image_model(),
            width: 512,
            height: 512,
            steps: 30,
            guidance_scale: 7.0,
        }
    }
}

/// Polling schedule for image jobs.
///
/// Delay before attempt k+1 is `min(delay_k * growth_factor, max_delay)`,
/// starting at `initial_delay`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Validate)]
#[serde(default)]
#[validate(schema(function = "validate_delay_bounds"))]
pub struct PollPolicy {
    #[validate(range(min = 1_u32, max = 1000_u32))]
    pub max_attempts: u32,
    pub initial_delay_ms: u64,
    #[validate(range(max = 600_000_u64))]
    pub max_delay_ms: u64,
    #[validate(range(min = 1.0_f64, max = 10.0_f64))]
    pub growth_factor: f64,
    /// Keep polling through network failures and 5xx answers instead of
    /// failing the job on the first one
    pub retry_transport_errors: bool,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 10,
            initial_delay_ms: 500,
            max_delay_ms: 3000,
            growth_factor: 1.5,
            retry_transport_errors: false,
        }
    }
}

impl PollPolicy {
    pub const fn initial_delay(&self) -> Duration {
        Duration::from_millis(self.initial_delay_ms)
    }

    pub const fn max_delay(&self) -> Duration {
        Duration::from_millis(self.max_delay_ms)
    }
}

fn validate_delay_bounds(policy: &PollPolicy) -> Result<(), ValidationError> {
    if policy.initial_delay_ms > policy.max_delay_ms {
        let mut err = ValidationError::new("delay_bounds");
        err.message = Some("initial_delay_ms must not exceed max_delay_ms".into());
        return Err(err);
    }
    Ok(())
}
