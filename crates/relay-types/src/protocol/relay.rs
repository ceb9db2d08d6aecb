//! Bodies of the relay's own HTTP API.
//!
//! Field names are camelCase to stay compatible with existing browser clients.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::JobError;
use crate::models::{GenerationRequest, ImageConfig};

/// `POST /chat` body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ChatRelayRequest {
    pub user_message: String,
}

/// `POST /chat` success body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ChatRelayResponse {
    pub bot_reply: String,
}

/// `POST /chat` failure body. The message is deliberately generic.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatFailureResponse {
    pub error: String,
}

impl Default for ChatFailureResponse {
    fn default() -> Self {
        Self { error: "Something went wrong".to_string() }
    }
}

/// `POST /generate-image` body. Omitted parameters fall back to config defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ImageGenerationBody {
    pub prompt: String,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub steps: Option<u32>,
    #[serde(default)]
    pub guidance_scale: Option<f32>,
}

impl ImageGenerationBody {
    pub fn into_request(self, defaults: &ImageConfig) -> GenerationRequest {
        GenerationRequest {
            width: self.width.unwrap_or(defaults.width),
            height: self.height.unwrap_or(defaults.height),
            steps: self.steps.unwrap_or(defaults.steps),
            guidance_scale: self.guidance_scale.unwrap_or(defaults.guidance_scale),
            prompt: self.prompt,
        }
    }
}

/// `POST /generate-image` success body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ImageGenerationResponse {
    pub image_url: String,
}

/// `POST /generate-image` failure body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ImageFailureResponse {
    pub error: String,
    /// Human-readable reason
    pub details: String,
    /// Raw remote error payload, `null` when there is none
    pub full_error: Option<Value>,
}

impl From<&JobError> for ImageFailureResponse {
    fn from(err: &JobError) -> Self {
        Self {
            error: "Image generation failed".to_string(),
            details: err.to_string(),
            full_error: err.raw_details().cloned(),
        }
    }
}
