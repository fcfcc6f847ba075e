//! Run status poller
//!
//! Polls a run until the service reports it `completed`, then translates the
//! result into an exit reason. Every other state means "poll again after the
//! interval"; there is no backoff. A failed status request ends polling
//! immediately.
//!
//! Waiting can be bounded with a deadline and interrupted with a shutdown
//! future; without either it lasts as long as the run does.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use adopipe_client::{ClientError, PipelineGateway};
use adopipe_core::ExitReason;
use adopipe_core::domain::pipeline::PipelineRef;
use adopipe_core::domain::run::{RunHandle, RunOutcome, RunResult, RunStatus};
use thiserror::Error;
use tracing::{debug, info, warn};

/// RFC 1123 timestamp, as used in HTTP dates
const FINISHED_AT_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

#[derive(Debug, Error)]
pub enum PollError {
    #[error("Error occurred while fetching status of run {run_id}: {source}")]
    Transport {
        run_id: i64,
        #[source]
        source: ClientError,
    },

    #[error("Run {run_id} did not complete within {}s", .limit.as_secs())]
    DeadlineExceeded { run_id: i64, limit: Duration },

    #[error("Stopped waiting for run {run_id}")]
    Cancelled { run_id: i64 },
}

impl PollError {
    pub fn exit_reason(&self) -> ExitReason {
        match self {
            PollError::Transport { .. } => ExitReason::RunStatusUnavailable,
            PollError::DeadlineExceeded { .. } => ExitReason::PollDeadlineExceeded,
            PollError::Cancelled { .. } => ExitReason::PollCancelled,
        }
    }
}

/// Waits for runs to complete
pub struct StatusPoller {
    gateway: Arc<dyn PipelineGateway>,
    interval: Duration,
    timeout: Option<Duration>,
}

impl StatusPoller {
    pub fn new(gateway: Arc<dyn PipelineGateway>, interval: Duration) -> Self {
        Self {
            gateway,
            interval,
            timeout: None,
        }
    }

    /// Limits the total time spent waiting; `None` waits forever
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Poll until the run completes, the deadline passes or `shutdown` resolves
    pub async fn wait_for_completion<F>(
        &self,
        project: &str,
        pipeline: &PipelineRef,
        run: RunHandle,
        shutdown: F,
    ) -> Result<RunOutcome, PollError>
    where
        F: Future<Output = ()>,
    {
        let polling = async {
            match self.timeout {
                Some(limit) => {
                    tokio::time::timeout(limit, self.poll_until_complete(project, pipeline, run))
                        .await
                        .unwrap_or(Err(PollError::DeadlineExceeded {
                            run_id: run.id,
                            limit,
                        }))
                }
                None => self.poll_until_complete(project, pipeline, run).await,
            }
        };

        tokio::select! {
            outcome = polling => outcome,
            _ = shutdown => {
                warn!("Interrupted while waiting for run {} of pipeline {}", run.id, pipeline);
                Err(PollError::Cancelled { run_id: run.id })
            }
        }
    }

    async fn poll_until_complete(
        &self,
        project: &str,
        pipeline: &PipelineRef,
        run: RunHandle,
    ) -> Result<RunOutcome, PollError> {
        loop {
            if let Some(outcome) = self.poll_once(project, pipeline, run).await? {
                info!(
                    "Pipeline '{}' with run id '{}' finished. Exit code will be {}",
                    pipeline,
                    run.id,
                    outcome.exit.code()
                );
                return Ok(outcome);
            }

            tokio::time::sleep(self.interval).await;
        }
    }

    /// Fetch the run once; `None` while it is not completed
    pub async fn poll_once(
        &self,
        project: &str,
        pipeline: &PipelineRef,
        run: RunHandle,
    ) -> Result<Option<RunOutcome>, PollError> {
        let status = self
            .gateway
            .get_run(project, run.pipeline_id, run.id)
            .await
            .map(RunStatus::from)
            .map_err(|source| PollError::Transport {
                run_id: run.id,
                source,
            })?;

        if !status.is_terminal() {
            debug!(state = %status.state, "... '{}' is still running.", pipeline);
            return Ok(None);
        }

        let outcome = RunOutcome::new(run, status);
        log_completion(pipeline, &outcome);

        Ok(Some(outcome))
    }
}

fn log_completion(pipeline: &PipelineRef, outcome: &RunOutcome) {
    let status = &outcome.status;
    let name = status.pipeline_name.as_deref().unwrap_or(&pipeline.name);
    let result = status
        .result
        .as_ref()
        .map(RunResult::as_str)
        .unwrap_or("none");
    let finished = status
        .finished_at
        .map(|at| at.format(FINISHED_AT_FORMAT).to_string())
        .unwrap_or_else(|| "at an unknown time".to_string());
    let url = status.url.as_deref().unwrap_or("unknown");

    if outcome.exit == ExitReason::Ambiguous {
        warn!(
            "Pipeline {} is in state '{}' with result '{}', finished {} (URL: {}).",
            name, status.state, result, finished, url
        );
    } else {
        info!(
            "Pipeline {} is in state '{}' with result '{}', finished {} (URL: {}).",
            name, status.state, result, finished, url
        );
    }
}
