//! Stateless chat completion passthrough.

use std::sync::Arc;
use tracing::{debug, info, warn};

use relay_types::protocol::fireworks::{ChatMessage, ChatRequest, ChatResponse};
use relay_types::{ChatConfig, RelayError};

use crate::upstream::UpstreamClient;

/// Forwards one user message to the chat model and returns the trimmed reply.
///
/// Holds no conversation history: every call is independent.
pub struct CompletionRelay {
    upstream: Arc<UpstreamClient>,
    chat: ChatConfig,
}

impl CompletionRelay {
    pub fn new(upstream: Arc<UpstreamClient>, chat: ChatConfig) -> Self {
        Self { upstream, chat }
    }

    pub fn config(&self) -> &ChatConfig {
        &self.chat
    }

    pub fn build_request(&self, user_message: &str) -> ChatRequest {
        ChatRequest {
            model: self.chat.model.clone(),
            messages: vec![ChatMessage::user(user_message)],
            max_tokens: self.chat.max_tokens,
            temperature: self.chat.temperature,
        }
    }

    pub async fn relay(&self, user_message: &str) -> Result<String, RelayError> {
        info!("[Chat] User message: {}", user_message);

        let request = self.build_request(user_message);
        let response = self.upstream.chat_completion(&request).await.map_err(|e| {
            warn!("[Chat] Upstream call failed: {}", e);
            RelayError::from(e)
        })?;

        debug!("[Chat] Provider response: {:?}", response);
        extract_reply(response)
    }
}

/// `choices[0].message.content`, trimmed.
fn extract_reply(response: ChatResponse) -> Result<String, RelayError> {
    let choice = response.choices.into_iter().next().ok_or_else(|| RelayError::MalformedResponse {
        reason: "response has no choices".to_string(),
    })?;

    let content = choice.message.and_then(|m| m.content).ok_or_else(|| RelayError::MalformedResponse {
        reason: "first choice has no message content".to_string(),
    })?;

    Ok(content.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(value: serde_json::Value) -> ChatResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_extract_reply_trims_first_choice() {
        let resp = response(json!({
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": "  Hello!\n"}},
                {"index": 1, "message": {"role": "assistant", "content": "ignored"}}
            ]
        }));
        assert_eq!(extract_reply(resp).unwrap(), "Hello!");
    }

    #[test]
    fn test_extract_reply_without_choices() {
        let err = extract_reply(response(json!({"choices": []}))).unwrap_err();
        assert!(matches!(err, RelayError::MalformedResponse { .. }));
    }

    #[test]
    fn test_extract_reply_without_content() {
        let resp = response(json!({"choices": [{"message": {"role": "assistant"}}]}));
        assert!(matches!(extract_reply(resp), Err(RelayError::MalformedResponse { .. })));

        let resp = response(json!({"choices": [{"finish_reason": "length"}]}));
        assert!(matches!(extract_reply(resp), Err(RelayError::MalformedResponse { .. })));
    }

    #[test]
    fn test_build_request_uses_chat_config() {
        let upstream = Arc::new(UpstreamClient::with_client(reqwest::Client::new(), &Default::default()));
        let relay = CompletionRelay::new(upstream, ChatConfig::default());

        let req = relay.build_request("hi");
        let body = serde_json::to_value(&req).unwrap();

        assert_eq!(body["model"], "accounts/fireworks/models/llama4-scout-instruct-basic");
        assert_eq!(body["messages"], json!([{"role": "user", "content": "hi"}]));
        assert_eq!(body["max_tokens"], 300);
        assert!((body["temperature"].as_f64().unwrap() - 0.7).abs() < 1e-6);
    }
}
