use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;

use relay_types::protocol::fireworks::{
    ChatRequest, ChatResponse, WorkflowResultQuery, WorkflowResultResponse, WorkflowSubmitRequest,
    WorkflowSubmitResponse,
};
use relay_types::UpstreamConfig;

use crate::error::UpstreamError;

/// HTTP client for the inference provider.
///
/// Every call is a JSON `POST` carrying the bearer credential. Non-2xx answers
/// become [`UpstreamError::Status`]; nothing here retries.
pub struct UpstreamClient {
    http_client: Client,
    base_url: String,
    api_key: String,
}

impl UpstreamClient {
    /// Build a client with its own connection pool and the configured timeout.
    pub fn new(config: &UpstreamConfig) -> Result<Self, UpstreamError> {
        let http_client = Client::builder().timeout(config.request_timeout()).build()?;
        Ok(Self::with_client(http_client, config))
    }

    /// Build around an existing `reqwest::Client`.
    pub fn with_client(http_client: Client, config: &UpstreamConfig) -> Self {
        Self {
            http_client,
            base_url: config.base_url.trim().trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for a path relative to the base URL.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, UpstreamError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(path);
        tracing::debug!("POST {}", url);

        let resp = self
            .http_client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            tracing::debug!("POST {} -> {}: {}", url, status, body);
            return Err(UpstreamError::Status { status: status.as_u16(), body });
        }

        let text = resp.text().await?;
        serde_json::from_str(&text)
            .map_err(|e| UpstreamError::InvalidResponse { message: e.to_string(), body: text })
    }

    pub async fn chat_completion(&self, request: &ChatRequest) -> Result<ChatResponse, UpstreamError> {
        self.post_json("chat/completions", request).await
    }

    pub async fn submit_workflow(
        &self,
        request: &WorkflowSubmitRequest,
    ) -> Result<WorkflowSubmitResponse, UpstreamError> {
        self.post_json(&workflow_path(&request.model), request).await
    }

    pub async fn workflow_result(
        &self,
        model: &str,
        query: &WorkflowResultQuery,
    ) -> Result<WorkflowResultResponse, UpstreamError> {
        self.post_json(&format!("{}/get_result", workflow_path(model)), query).await
    }
}

fn workflow_path(model: &str) -> String {
    format!("workflows/{}", model.trim_matches('/'))
}
