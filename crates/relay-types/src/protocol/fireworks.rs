//! Fireworks inference API types (chat completions and image workflows).

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::models::GenerationRequest;

/// Request body for the chat completions endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
    pub temperature: f32,
}

/// A single message in a chat conversation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatMessage {
    /// "user", "assistant" or "system"
    pub role: String,
    /// Text content. Absent for some tool-call replies.
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self { role: "user".to_string(), content: Some(content.into()) }
    }
}

/// Response from the chat completions endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    pub id: Option<String>,
    pub model: Option<String>,
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
    pub usage: Option<Usage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoice {
    #[serde(default)]
    pub index: u32,
    pub message: Option<ChatMessage>,
    pub finish_reason: Option<String>,
}

/// Token usage statistics for a request.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// Request body for submitting an image workflow job.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct WorkflowSubmitRequest {
    pub model: String,
    pub prompt: String,
    pub width: u32,
    pub height: u32,
    pub steps: u32,
    pub guidance_scale: f32,
}

impl WorkflowSubmitRequest {
    pub fn new(model: impl Into<String>, request: &GenerationRequest) -> Self {
        Self {
            model: model.into(),
            prompt: request.prompt.clone(),
            width: request.width,
            height: request.height,
            steps: request.steps,
            guidance_scale: request.guidance_scale,
        }
    }
}

/// Response from the workflow submission endpoint.
///
/// `request_id` is kept as raw JSON: the remote has been seen to omit it, send
/// `null`, or send an empty string, and all of those mean "not accepted".
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct WorkflowSubmitResponse {
    #[serde(default)]
    pub request_id: Option<Value>,
    /// Everything else the remote sent, kept for logging
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl WorkflowSubmitResponse {
    /// Usable request id, if any. Numbers are accepted and stringified.
    pub fn request_id(&self) -> Option<String> {
        match self.request_id.as_ref()? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

/// Request body for the workflow result endpoint.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct WorkflowResultQuery {
    pub id: String,
}

/// Response from the workflow result endpoint.
///
/// `status` is raw JSON so a non-string label still decodes; classification
/// happens in [`crate::JobStatus::from_value`].
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct WorkflowResultResponse {
    #[serde(default)]
    pub status: Option<Value>,
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default)]
    pub details: Option<Value>,
}

impl WorkflowResultResponse {
    /// `result.sample` if it is a string.
    pub fn sample(&self) -> Option<&str> {
        self.result.as_ref()?.get("sample")?.as_str()
    }
}
