use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use relay_types::{ImageConfig, RelayConfig};

use crate::completion::CompletionRelay;
use crate::error::UpstreamError;
use crate::handlers;
use crate::middleware::cors_layer;
use crate::poller::{JobApi, JobPoller};
use crate::upstream::{UpstreamClient, WorkflowClient};

/// Shared, read-only state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub completion: Arc<CompletionRelay>,
    pub poller: Arc<JobPoller>,
    pub image_defaults: Arc<ImageConfig>,
}

impl AppState {
    pub fn new(completion: CompletionRelay, poller: JobPoller, image_defaults: ImageConfig) -> Self {
        Self {
            completion: Arc::new(completion),
            poller: Arc::new(poller),
            image_defaults: Arc::new(image_defaults),
        }
    }

    /// Wire every component to one shared upstream client.
    pub fn from_config(config: &RelayConfig) -> Result<Self, UpstreamError> {
        let upstream = Arc::new(UpstreamClient::new(&config.upstream)?);
        let jobs: Arc<dyn JobApi> = Arc::new(WorkflowClient::new(upstream.clone(), config.image.model.clone()));

        Ok(Self::new(
            CompletionRelay::new(upstream, config.chat.clone()),
            JobPoller::new(jobs, config.poll.clone()),
            config.image.clone(),
        ))
    }
}

pub fn build_relay_router(state: AppState) -> Router {
    Router::new()
        .route("/chat", post(handlers::handle_chat))
        .route("/generate-image", post(handlers::handle_generate_image))
        .route("/health", get(handlers::health_check))
        .route("/healthz", get(handlers::health_check))
        .route("/version", get(handlers::version_info))
        .with_state(state)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()).layer(cors_layer()))
}
