use async_trait::async_trait;
use std::sync::Arc;

use relay_types::protocol::fireworks::{
    WorkflowResultQuery, WorkflowResultResponse, WorkflowSubmitRequest, WorkflowSubmitResponse,
};
use relay_types::{GenerationRequest, JobHandle};

use super::client::UpstreamClient;
use crate::error::UpstreamError;
use crate::poller::JobApi;

/// [`JobApi`] backed by the provider's image workflow endpoints for one model.
pub struct WorkflowClient {
    upstream: Arc<UpstreamClient>,
    model: String,
}

impl WorkflowClient {
    pub fn new(upstream: Arc<UpstreamClient>, model: impl Into<String>) -> Self {
        Self { upstream, model: model.into() }
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl JobApi for WorkflowClient {
    async fn submit(&self, request: &GenerationRequest) -> Result<WorkflowSubmitResponse, UpstreamError> {
        let body = WorkflowSubmitRequest::new(self.model.clone(), request);
        self.upstream.submit_workflow(&body).await
    }

    async fn fetch_result(&self, handle: &JobHandle) -> Result<WorkflowResultResponse, UpstreamError> {
        let query = WorkflowResultQuery { id: handle.request_id().to_string() };
        self.upstream.workflow_result(&self.model, &query).await
    }
}
