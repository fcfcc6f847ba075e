//! Run-related API endpoints

use adopipe_core::dto::run::{Run, RunPipelineParameters};

use crate::DevOpsClient;
use crate::error::Result;

impl DevOpsClient {
    // =============================================================================
    // Run Lifecycle
    // =============================================================================

    /// Start a run of a pipeline
    ///
    /// # Arguments
    /// * `project` - Project name or ID
    /// * `pipeline_id` - The pipeline to run
    /// * `parameters` - Resources and template parameters for the run
    ///
    /// # Returns
    /// The created run, usually in state `inProgress`
    pub async fn run_pipeline(
        &self,
        project: &str,
        pipeline_id: i64,
        parameters: &RunPipelineParameters,
    ) -> Result<Run> {
        let pipeline_id = pipeline_id.to_string();
        let url = self.endpoint(project, &["pipelines", pipeline_id.as_str(), "runs"])?;
        let response = self.post(url).json(parameters).send().await?;

        self.handle_response(response).await
    }

    /// Get a run of a pipeline
    ///
    /// # Arguments
    /// * `project` - Project name or ID
    /// * `pipeline_id` - The pipeline the run belongs to
    /// * `run_id` - The run ID
    pub async fn get_run(&self, project: &str, pipeline_id: i64, run_id: i64) -> Result<Run> {
        let pipeline_id = pipeline_id.to_string();
        let run_id = run_id.to_string();
        let url = self.endpoint(
            project,
            &["pipelines", pipeline_id.as_str(), "runs", run_id.as_str()],
        )?;
        let response = self.get(url).send().await?;

        self.handle_response(response).await
    }
}

#[cfg(test)]
mod tests {
    use crate::test_server::{TestServer, response};
    use crate::{ClientError, DevOpsClient};

    #[tokio::test]
    async fn test_get_run_sign_in_page_is_unauthorized() {
        let server = TestServer::start(vec![response(
            "203 Non-Authoritative Information",
            &[],
            "<html>Sign in</html>",
        )])
        .await;
        let client = DevOpsClient::new(&server.url(), "contoso", "expired");

        let err = client.get_run("web", 5, 42).await.unwrap_err();

        assert!(matches!(err, ClientError::Unauthorized));
        let requests = server.requests().await;
        assert!(requests[0].starts_with("GET /contoso/web/_apis/pipelines/5/runs/42?api-version=7.1"));
    }

    #[tokio::test]
    async fn test_get_run_error_status_keeps_body() {
        let server = TestServer::start(vec![response(
            "404 Not Found",
            &[],
            r#"{"message":"Run 42 not found"}"#,
        )])
        .await;
        let client = DevOpsClient::new(&server.url(), "contoso", "t");

        let err = client.get_run("web", 5, 42).await.unwrap_err();

        match err {
            ClientError::ApiError { status, message } => {
                assert_eq!(status, 404);
                assert!(message.contains("Run 42 not found"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
