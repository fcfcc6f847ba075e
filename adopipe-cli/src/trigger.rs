//! Trigger workflow
//!
//! Resolves the configured pipeline, starts one run of it and waits for the
//! run to complete. Each step is attempted once; any failure ends the
//! workflow with the exit reason of that step.

use std::future::Future;
use std::sync::Arc;

use adopipe_client::PipelineGateway;
use adopipe_core::ExitReason;
use adopipe_core::domain::run::RunOutcome;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::Config;
use crate::service::{
    LaunchError, PipelineResolver, PollError, ResolveError, RunLauncher, StatusPoller,
};

#[derive(Debug, Error)]
pub enum TriggerError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    #[error(transparent)]
    Launch(#[from] LaunchError),
    #[error(transparent)]
    Poll(#[from] PollError),
}

impl TriggerError {
    pub fn exit_reason(&self) -> ExitReason {
        match self {
            TriggerError::Resolve(e) => e.exit_reason(),
            TriggerError::Launch(e) => e.exit_reason(),
            TriggerError::Poll(e) => e.exit_reason(),
        }
    }
}

/// Run the configured pipeline to completion
pub async fn trigger<F>(
    gateway: Arc<dyn PipelineGateway>,
    config: &Config,
    shutdown: F,
) -> Result<RunOutcome, TriggerError>
where
    F: Future<Output = ()>,
{
    let pipeline = PipelineResolver::new(Arc::clone(&gateway))
        .resolve(&config.project, &config.pipeline)
        .await?;

    let run = RunLauncher::new(Arc::clone(&gateway))
        .launch(&config.project, config.run_request(pipeline.id))
        .await?;

    info!(
        "Started run {} of pipeline '{}' on branch '{}'",
        run.id, pipeline.name, config.branch
    );

    let outcome = StatusPoller::new(gateway, config.poll_interval)
        .with_timeout(config.timeout)
        .wait_for_completion(&config.project, &pipeline, run, shutdown)
        .await?;

    if outcome.exit == ExitReason::Ambiguous {
        warn!(
            "It was not possible to identify the correct return value for pipeline '{}'.",
            pipeline.name
        );
    }

    Ok(outcome)
}
