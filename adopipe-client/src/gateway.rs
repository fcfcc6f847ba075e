//! Pipeline gateway capability
//!
//! The services that resolve, launch and poll runs only need three remote
//! operations. They depend on this trait instead of [`DevOpsClient`] so they
//! can be driven by an in-memory implementation in tests.

use adopipe_core::dto::pipeline::Pipeline;
use adopipe_core::dto::run::{Run, RunPipelineParameters};
use async_trait::async_trait;

use crate::DevOpsClient;
use crate::error::Result;

/// Remote operations on a pipeline service
#[async_trait]
pub trait PipelineGateway: Send + Sync {
    /// Lists every pipeline of a project, in the order the service returns them
    async fn list_pipelines(&self, project: &str) -> Result<Vec<Pipeline>>;

    /// Starts a run of a pipeline
    async fn run_pipeline(
        &self,
        project: &str,
        pipeline_id: i64,
        parameters: &RunPipelineParameters,
    ) -> Result<Run>;

    /// Fetches the current state of a run
    async fn get_run(&self, project: &str, pipeline_id: i64, run_id: i64) -> Result<Run>;
}

#[async_trait]
impl PipelineGateway for DevOpsClient {
    async fn list_pipelines(&self, project: &str) -> Result<Vec<Pipeline>> {
        DevOpsClient::list_pipelines(self, project).await
    }

    async fn run_pipeline(
        &self,
        project: &str,
        pipeline_id: i64,
        parameters: &RunPipelineParameters,
    ) -> Result<Run> {
        DevOpsClient::run_pipeline(self, project, pipeline_id, parameters).await
    }

    async fn get_run(&self, project: &str, pipeline_id: i64, run_id: i64) -> Result<Run> {
        DevOpsClient::get_run(self, project, pipeline_id, run_id).await
    }
}
