//! Image job submit-and-poll state machine.
//!
//! ```text
//! Submitting ──► Polling ──┬──► Succeeded
//!      │          ▲   │    ├──► Failed
//!      │          └───┘    └──► TimedOut
//!      └──────────────────────► Failed
//! ```
//!
//! One [`JobPoller::run`] call owns one job from submission to its terminal
//! outcome. Nothing is shared between runs except the read-only API client
//! and policy, so any number of runs may be in flight at once.


use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use relay_types::protocol::fireworks::{WorkflowResultResponse, WorkflowSubmitResponse};
use relay_types::{
    GenerationRequest, JobError, JobHandle, JobOutcome, JobStatus, PollAttempt, PollPolicy, StatusClass,
};

use crate::backoff::{worst_case_wait, Backoff};
use crate::error::UpstreamError;

/// Remote side of an image job: one submission call, many result calls.
#[async_trait]
pub trait JobApi: Send + Sync {
    async fn submit(&self, request: &GenerationRequest) -> Result<WorkflowSubmitResponse, UpstreamError>;

    async fn fetch_result(&self, handle: &JobHandle) -> Result<WorkflowResultResponse, UpstreamError>;
}

/// What one polling attempt decided.
enum Step {
    Done(JobOutcome),
    Continue,
}

pub struct JobPoller {
    api: Arc<dyn JobApi>,
    policy: PollPolicy,
}

impl JobPoller {
    pub fn new(api: Arc<dyn JobApi>, policy: PollPolicy) -> Self {
        Self { api, policy }
    }

    pub fn policy(&self) -> &PollPolicy {
        &self.policy
    }

    /// Submit `request` and poll it to a terminal outcome.
    pub async fn run(&self, request: &GenerationRequest) -> JobOutcome {
        let trace_id = new_trace_id();
        info!(
            "[{}] Image prompt: {:.80} ({}x{}, steps={}, guidance={})",
            trace_id, request.prompt, request.width, request.height, request.steps, request.guidance_scale
        );

        let handle = match self.submit(request, &trace_id).await {
            Ok(handle) => handle,
            Err(err) => {
                warn!("[{}] Submission failed: {}", trace_id, err);
                return JobOutcome::Failed(err);
            },
        };

        self.poll(&handle, &trace_id).await
    }

    /// Submitting state. Yields a handle or a terminal error; never retries.
    pub async fn submit(&self, request: &GenerationRequest, trace_id: &str) -> Result<JobHandle, JobError> {
        let response = self.api.submit(request).await.map_err(UpstreamError::into_submission_error)?;

        let Some(handle) = response.request_id().and_then(JobHandle::new) else {
            warn!("[{}] Submission response carried no request id: {:?}", trace_id, response);
            return Err(JobError::MissingRequestId { response: serde_json::to_value(&response).ok() });
        };

        info!("[{}] Request submitted with ID: {}", trace_id, handle);
        debug!("[{}] Submit response: {:?}", trace_id, response.extra);
        Ok(handle)
    }

    /// Polling state. Runs at most `max_attempts` result queries.
    pub async fn poll(&self, handle: &JobHandle, trace_id: &str) -> JobOutcome {
        let max_attempts = self.policy.max_attempts;
        let mut backoff = Backoff::from_policy(&self.policy);
        let mut last_status: Option<String> = None;

        debug!(
            "[{}] Polling {} (max {} attempts, worst-case wait {:?})",
            trace_id,
            handle,
            max_attempts,
            worst_case_wait(&self.policy)
        );

        for attempt in 1..=max_attempts {
            let delay_before = if attempt == 1 { Duration::ZERO } else { backoff.next_delay() };
            if !delay_before.is_zero() {
                sleep(delay_before).await;
            }

            let response = match self.api.fetch_result(handle).await {
                Ok(response) => response,
                Err(err) => {
                    let err = err.into_poll_error();
                    if let JobError::MalformedResponse { .. } = err {
                        // The remote answered; an unreadable body is an unrecognized status.
                        warn!(
                            "[{}] Polling attempt {}/{}: unreadable result, still waiting: {}",
                            trace_id, attempt, max_attempts, err
                        );
                        continue;
                    }
                    if self.policy.retry_transport_errors && err.is_transient() {
                        warn!(
                            "[{}] Polling attempt {}/{} failed, will retry: {}",
                            trace_id, attempt, max_attempts, err
                        );
                        continue;
                    }
                    warn!("[{}] Polling attempt {}/{} failed: {}", trace_id, attempt, max_attempts, err);
                    return JobOutcome::Failed(err);
                },
            };

            let poll = PollAttempt {
                attempt,
                delay_before,
                status: JobStatus::from_value(response.status.as_ref()),
                result_payload: response.result.clone(),
            };
            info!("[{}] Polling attempt {}/{}: Status = {}", trace_id, attempt, max_attempts, poll.status);

            match evaluate(&poll, response, trace_id) {
                Step::Done(outcome) => return outcome,
                Step::Continue => last_status = Some(poll.status.label().to_string()),
            }
        }

        warn!(
            "[{}] Polling gave up after {} attempts (last status: {})",
            trace_id,
            max_attempts,
            last_status.as_deref().unwrap_or("none")
        );
        JobOutcome::TimedOut { attempts: max_attempts, last_status }
    }
}

/// Decide what a single result response means for the job.
fn evaluate(poll: &PollAttempt, response: WorkflowResultResponse, trace_id: &str) -> Step {
    match poll.status.class() {
        StatusClass::Success => match response.sample() {
            Some(url) if is_image_url(url) => {
                info!("[{}] Image ready after {} attempt(s)", trace_id, poll.attempt);
                Step::Done(JobOutcome::Succeeded { image_url: url.to_string() })
            },
            _ => {
                // Treated as still running; a persistent bad payload ends in TimedOut.
                warn!(
                    "[{}] Status {} without an image URL in result: {:?}",
                    trace_id, poll.status, poll.result_payload
                );
                Step::Continue
            },
        },
        StatusClass::Failure => Step::Done(JobOutcome::Failed(JobError::RemoteFailure {
            status: poll.status.label().to_string(),
            details: response.details,
        })),
        StatusClass::InProgress => Step::Continue,
    }
}

fn is_image_url(candidate: &str) -> bool {
    candidate.starts_with("http")
}

fn new_trace_id() -> String {
    let id = uuid::Uuid::new_v4().simple().to_string();
    format!("img-{}", &id[..8])
}
