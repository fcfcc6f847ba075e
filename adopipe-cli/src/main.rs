//! Adopipe CLI
//!
//! Triggers an Azure DevOps pipeline by name, waits for the run to complete
//! and exits with a code derived from the run result.

mod config;
mod logging;
mod service;
mod trigger;

use std::process::ExitCode;
use std::sync::Arc;

use adopipe_client::{DEFAULT_SERVICE_URL, DevOpsClient, PipelineGateway};
use adopipe_core::domain::run::DEFAULT_BRANCH;
use clap::{CommandFactory, Parser};
use colored::Colorize;
use tracing::error;

use crate::config::Config;

const EXIT_CODES: &str = "\
Exit codes:
  0   run succeeded
  1   run failed, or organization missing
  2   run canceled, or project missing
  3   run result unknown, or token missing
  4   pipeline missing
  10  run status could not be fetched
  11  --timeout elapsed before the run completed
  12  interrupted while waiting
  20  no pipeline with that name
  21  run could not be started
  22  pipelines could not be listed";

#[derive(Parser, Debug)]
#[command(name = "adopipe", version)]
#[command(about = "Trigger an Azure DevOps pipeline and wait for its result", long_about = None)]
#[command(after_help = EXIT_CODES)]
struct Cli {
    /// Azure DevOps organization
    #[arg(long, env = "ADO_ORG")]
    org: Option<String>,

    /// Azure DevOps project
    #[arg(long, visible_alias = "project", env = "ADO_PROJECT")]
    prj: Option<String>,

    /// Azure DevOps personal access token
    #[arg(long, env = "ADO_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Azure DevOps pipeline name
    #[arg(long, env = "ADO_PIPELINE")]
    pipeline: Option<String>,

    /// Branch for pipeline run
    #[arg(long, env = "ADO_BRANCH", default_value = DEFAULT_BRANCH)]
    branch: String,

    /// Template parameter as 'key=value', may be repeated
    #[arg(long = "param", value_name = "KEY=VALUE")]
    params: Vec<String>,

    /// Service root URL
    #[arg(long, env = "ADO_URL", default_value = DEFAULT_SERVICE_URL)]
    url: String,

    /// Stop waiting for the run after this many seconds
    #[arg(long, env = "ADO_POLL_TIMEOUT", value_name = "SECONDS")]
    timeout: Option<u64>,

    /// Logging with warn output
    #[arg(short = 'w')]
    warn: bool,

    /// Logging with info output
    #[arg(short = 'i')]
    info: bool,

    /// Logging with verbose output
    #[arg(short = 'v')]
    verbose: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match Config::from_cli(cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e.to_string().red());
            eprintln!("{}", Cli::command().render_help());
            return e.exit_reason().into();
        }
    };

    for entry in &config.rejected_parameters {
        eprintln!(
            "{} parameter '{}' does not contain '=' and is ignored",
            "warning:".yellow().bold(),
            entry
        );
    }

    if let Err(e) = logging::init(config.log_level) {
        eprintln!("{} {:#}", "warning:".yellow().bold(), e);
    }

    let gateway: Arc<dyn PipelineGateway> = Arc::new(DevOpsClient::new(
        &config.service_url,
        &config.organization,
        config.token.clone(),
    ));

    match trigger::trigger(gateway, &config, shutdown_signal()).await {
        Ok(outcome) => outcome.exit.into(),
        Err(e) => {
            error!("{:#}", e);
            e.exit_reason().into()
        }
    }
}

/// Resolves on Ctrl-C; never resolves if the handler cannot be installed
async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
}
