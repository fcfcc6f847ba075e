//! Configuration module
//!
//! Turns parsed command-line arguments into a validated [`Config`]. Missing
//! required inputs are reported before any remote call, each with its own
//! exit code, checked in the order org, project, token, pipeline.

use std::collections::HashMap;
use std::time::Duration;

use adopipe_core::domain::run::RunRequest;
use adopipe_core::{ExitReason, Parameters, parse_parameters};
use thiserror::Error;
use tracing::level_filters::LevelFilter;

use crate::Cli;

/// Delay between two status polls of a running pipeline
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(10);

/// A required input is missing
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Parameter 'org' is empty.")]
    MissingOrganization,
    #[error("Parameter 'prj' is empty.")]
    MissingProject,
    #[error("Parameter 'token' is empty.")]
    MissingToken,
    #[error("Parameter 'pipeline' is empty.")]
    MissingPipeline,
}

impl ConfigError {
    pub fn exit_reason(&self) -> ExitReason {
        match self {
            ConfigError::MissingOrganization => ExitReason::MissingOrganization,
            ConfigError::MissingProject => ExitReason::MissingProject,
            ConfigError::MissingToken => ExitReason::MissingToken,
            ConfigError::MissingPipeline => ExitReason::MissingPipeline,
        }
    }
}

/// Validated CLI configuration
#[derive(Clone)]
pub struct Config {
    pub organization: String,
    pub project: String,
    /// Personal access token
    pub token: String,
    /// Name of the pipeline to trigger
    pub pipeline: String,
    pub branch: String,
    /// Template parameters for the run
    pub parameters: HashMap<String, String>,
    /// `--param` entries without a `=`
    pub rejected_parameters: Vec<String>,
    /// Service root URL (e.g., "https://dev.azure.com")
    pub service_url: String,
    pub poll_interval: Duration,
    /// Overall limit for waiting on the run; `None` waits forever
    pub timeout: Option<Duration>,
    pub log_level: LevelFilter,
}

impl Config {
    /// Builds the configuration from parsed arguments
    pub fn from_cli(cli: Cli) -> Result<Self, ConfigError> {
        let organization = required(cli.org, ConfigError::MissingOrganization)?;
        let project = required(cli.prj, ConfigError::MissingProject)?;
        let token = required(cli.token, ConfigError::MissingToken)?;
        let pipeline = required(cli.pipeline, ConfigError::MissingPipeline)?;

        let Parameters { values, rejected } = parse_parameters(&cli.params);

        Ok(Self {
            organization,
            project,
            token,
            pipeline,
            branch: cli.branch,
            parameters: values,
            rejected_parameters: rejected,
            service_url: cli.url,
            poll_interval: DEFAULT_POLL_INTERVAL,
            timeout: cli.timeout.map(Duration::from_secs),
            log_level: log_level(cli.warn, cli.info, cli.verbose),
        })
    }

    /// Run request for the resolved pipeline
    pub fn run_request(&self, pipeline_id: i64) -> RunRequest {
        RunRequest::new(pipeline_id, self.branch.clone(), self.parameters.clone())
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("organization", &self.organization)
            .field("project", &self.project)
            .field("token", &"<redacted>")
            .field("pipeline", &self.pipeline)
            .field("branch", &self.branch)
            .field("parameters", &self.parameters)
            .field("service_url", &self.service_url)
            .field("poll_interval", &self.poll_interval)
            .field("timeout", &self.timeout)
            .field("log_level", &self.log_level)
            .finish()
    }
}

fn required(value: Option<String>, missing: ConfigError) -> Result<String, ConfigError> {
    value.filter(|v| !v.is_empty()).ok_or(missing)
}

/// Most verbose flag wins; errors only by default
fn log_level(warn: bool, info: bool, verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::DEBUG
    } else if info {
        LevelFilter::INFO
    } else if warn {
        LevelFilter::WARN
    } else {
        LevelFilter::ERROR
    }
}

/// Arguments with every required input set, as if given on the command line
#[cfg(test)]
pub(crate) fn test_cli() -> Cli {
    Cli {
        org: Some("contoso".to_string()),
        prj: Some("web".to_string()),
        token: Some("secret".to_string()),
        pipeline: Some("build".to_string()),
        branch: adopipe_core::domain::run::DEFAULT_BRANCH.to_string(),
        params: Vec::new(),
        url: adopipe_client::DEFAULT_SERVICE_URL.to_string(),
        timeout: None,
        warn: false,
        info: false,
        verbose: false,
    }
}
