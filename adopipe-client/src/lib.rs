//! Adopipe HTTP Client
//!
//! A small, type-safe client for the Azure DevOps Pipelines REST API.
//!
//! Only the three endpoints needed to trigger a pipeline and follow its run are
//! covered: listing pipelines, starting a run and fetching a run. The
//! [`PipelineGateway`] trait exposes them as a capability so callers can be
//! tested without a network.
//!
//! # Example
//!
//! ```no_run
//! use adopipe_client::{DEFAULT_SERVICE_URL, DevOpsClient};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = DevOpsClient::new(DEFAULT_SERVICE_URL, "my-org", "my-token");
//!
//!     for pipeline in client.list_pipelines("my-project").await? {
//!         println!("{} {}", pipeline.id, pipeline.name);
//!     }
//!     Ok(())
//! }
//! ```

pub mod error;
mod gateway;
mod pipelines;
mod runs;
#[cfg(test)]
mod test_server;

// Re-export commonly used types
pub use error::{ClientError, Result};
pub use gateway::PipelineGateway;

use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;

/// Root of the hosted Azure DevOps service
pub const DEFAULT_SERVICE_URL: &str = "https://dev.azure.com";

/// REST API version sent with every request
pub const API_VERSION: &str = "7.1";

/// Response header carrying the token for the next page of a list
const CONTINUATION_TOKEN_HEADER: &str = "x-ms-continuationtoken";

/// HTTP client for one Azure DevOps organization
///
/// Requests authenticate with a personal access token using HTTP basic auth
/// and an empty user name.
#[derive(Clone)]
pub struct DevOpsClient {
    /// Organization URL (e.g., "https://dev.azure.com/my-org")
    base_url: String,
    /// Personal access token
    token: String,
    /// HTTP client instance
    client: Client,
}

impl DevOpsClient {
    /// Create a new client for an organization
    ///
    /// # Arguments
    /// * `service_url` - Root of the service (e.g., [`DEFAULT_SERVICE_URL`])
    /// * `organization` - Organization name
    /// * `token` - Personal access token
    ///
    /// # Example
    /// ```
    /// use adopipe_client::DevOpsClient;
    ///
    /// let client = DevOpsClient::new("https://dev.azure.com", "my-org", "token");
    /// assert_eq!(client.base_url(), "https://dev.azure.com/my-org");
    /// ```
    pub fn new(service_url: &str, organization: &str, token: impl Into<String>) -> Self {
        Self::with_client(service_url, organization, token, Client::new())
    }

    /// Create a new client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    pub fn with_client(
        service_url: &str,
        organization: &str,
        token: impl Into<String>,
        client: Client,
    ) -> Self {
        Self {
            base_url: format!("{}/{}", service_url.trim_end_matches('/'), organization),
            token: token.into(),
            client,
        }
    }

    /// Get the organization URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // =============================================================================
    // Request Builders
    // =============================================================================

    /// Build `{base_url}/{project}/_apis/{segments...}`
    ///
    /// Segments are percent-encoded, so project names with spaces are safe.
    fn endpoint(&self, project: &str, segments: &[&str]) -> Result<Url> {
        let mut url = Url::parse(&self.base_url).map_err(|e| {
            ClientError::InvalidRequest(format!("Invalid service URL '{}': {}", self.base_url, e))
        })?;

        url.path_segments_mut()
            .map_err(|_| {
                ClientError::InvalidRequest(format!(
                    "Service URL '{}' cannot have a path",
                    self.base_url
                ))
            })?
            .pop_if_empty()
            .push(project)
            .push("_apis")
            .extend(segments);

        Ok(url)
    }

    fn get(&self, url: Url) -> RequestBuilder {
        self.authorize(self.client.get(url))
    }

    fn post(&self, url: Url) -> RequestBuilder {
        self.authorize(self.client.post(url))
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .basic_auth("", Some(&self.token))
            .query(&[("api-version", API_VERSION)])
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Handle an API response and deserialize JSON
    ///
    /// This method checks the status code and returns an appropriate error if
    /// the request failed, or deserializes the response body if successful.
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if status == reqwest::StatusCode::NON_AUTHORITATIVE_INFORMATION {
            return Err(ClientError::Unauthorized);
        }

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        let body = response.text().await?;
        serde_json::from_str(&body)
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }
}

impl std::fmt::Debug for DevOpsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DevOpsClient")
            .field("base_url", &self.base_url)
            .field("token", &"<redacted>")
            .finish()
    }
}
