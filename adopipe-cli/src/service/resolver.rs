//! Pipeline resolver
//!
//! Finds a pipeline's ID from its name. Names are matched exactly and
//! case-sensitively; the first match in the order the service returns wins.

use std::sync::Arc;

use adopipe_client::{ClientError, PipelineGateway};
use adopipe_core::ExitReason;
use adopipe_core::domain::pipeline::PipelineRef;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("Pipeline '{name}' does not exist in project '{project}'")]
    NotFound { project: String, name: String },

    #[error("Error occurred while listing pipelines of project '{project}': {source}")]
    Gateway {
        project: String,
        #[source]
        source: ClientError,
    },
}

impl ResolveError {
    pub fn exit_reason(&self) -> ExitReason {
        match self {
            ResolveError::NotFound { .. } => ExitReason::PipelineNotFound,
            ResolveError::Gateway { .. } => ExitReason::PipelineLookupFailed,
        }
    }
}

/// Resolves pipeline names to IDs
pub struct PipelineResolver {
    gateway: Arc<dyn PipelineGateway>,
}

impl PipelineResolver {
    pub fn new(gateway: Arc<dyn PipelineGateway>) -> Self {
        Self { gateway }
    }

    /// Resolve a pipeline by name within a project
    ///
    /// # Errors
    /// Returns an error if:
    /// - No pipeline has exactly this name
    /// - Listing the pipelines fails (not retried)
    pub async fn resolve(&self, project: &str, name: &str) -> Result<PipelineRef, ResolveError> {
        let pipelines = self
            .gateway
            .list_pipelines(project)
            .await
            .map_err(|source| ResolveError::Gateway {
                project: project.to_string(),
                source,
            })?;

        debug!(project, count = pipelines.len(), "Looking up pipeline '{}'", name);

        let pipeline = pipelines
            .into_iter()
            .find(|pipeline| pipeline.name == name)
            .map(PipelineRef::from)
            .ok_or_else(|| ResolveError::NotFound {
                project: project.to_string(),
                name: name.to_string(),
            })?;

        info!("Pipeline {} has ID {}.", pipeline.name, pipeline.id);

        Ok(pipeline)
    }
}
