//! Run launcher
//!
//! Starts a run of a resolved pipeline on a branch with a set of template
//! parameters. Parameters are passed through as-is; the service decides
//! whether it accepts them.

use std::sync::Arc;

use adopipe_client::{ClientError, PipelineGateway};
use adopipe_core::ExitReason;
use adopipe_core::domain::run::{RunHandle, RunRequest};
use adopipe_core::dto::run::RunPipelineParameters;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
#[error("Start of pipeline {pipeline_id} failed: {source}")]
pub struct LaunchError {
    pub pipeline_id: i64,
    #[source]
    pub source: ClientError,
}

impl LaunchError {
    pub fn exit_reason(&self) -> ExitReason {
        ExitReason::LaunchFailed
    }
}

/// Starts pipeline runs
pub struct RunLauncher {
    gateway: Arc<dyn PipelineGateway>,
}

impl RunLauncher {
    pub fn new(gateway: Arc<dyn PipelineGateway>) -> Self {
        Self { gateway }
    }

    /// Start a run and return its handle
    pub async fn launch(&self, project: &str, request: RunRequest) -> Result<RunHandle, LaunchError> {
        let parameters = RunPipelineParameters::from(&request);

        debug!(
            project,
            pipeline_id = request.pipeline_id,
            branch = %request.branch,
            parameters = request.parameters.len(),
            "Starting pipeline run"
        );

        let run = self
            .gateway
            .run_pipeline(project, request.pipeline_id, &parameters)
            .await
            .map_err(|source| {
                if source.is_client_error() {
                    warn!(
                        "The service rejected the run request for pipeline {}",
                        request.pipeline_id
                    );
                }
                LaunchError {
                    pipeline_id: request.pipeline_id,
                    source,
                }
            })?;

        debug!(
            "Run pipeline {}. Run id is '{}' and state is '{}'.",
            request.pipeline_id, run.id, run.state
        );

        Ok(RunHandle {
            id: run.id,
            pipeline_id: request.pipeline_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::mock::MockGateway;
    use std::collections::HashMap;

    #[tokio::test]
    async fn test_launch_returns_handle() {
        let gateway = Arc::new(MockGateway::new());
        let launcher = RunLauncher::new(gateway.clone());

        let handle = launcher
            .launch("web", RunRequest::new(5, "master", HashMap::new()))
            .await
            .unwrap();

        assert_eq!(
            handle,
            RunHandle {
                id: 42,
                pipeline_id: 5
            }
        );
    }

    #[tokio::test]
    async fn test_launch_binds_branch_and_parameters() {
        let gateway = Arc::new(MockGateway::new());
        let launcher = RunLauncher::new(gateway.clone());
        let parameters = HashMap::from([
            ("env".to_string(), "prod".to_string()),
            ("query".to_string(), "a=b".to_string()),
        ]);

        launcher
            .launch("web", RunRequest::new(5, "release/1.0", parameters.clone()))
            .await
            .unwrap();

        let launched = gateway.launched();
        assert_eq!(launched.len(), 1);

        let (project, pipeline_id, body) = &launched[0];
        assert_eq!(project, "web");
        assert_eq!(*pipeline_id, 5);
        assert_eq!(body.resources.repositories["self"].ref_name, "release/1.0");
        assert_eq!(body.template_parameters, parameters);
    }

    #[tokio::test]
    async fn test_rejected_launch_fails() {
        let launcher = RunLauncher::new(Arc::new(MockGateway::new().failing_launch(400)));

        let err = launcher
            .launch("web", RunRequest::new(5, "master", HashMap::new()))
            .await
            .unwrap_err();

        assert_eq!(err.pipeline_id, 5);
        assert!(err.source.is_client_error());
        assert_eq!(err.exit_reason().code(), 21);
    }
}
