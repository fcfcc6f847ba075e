//! Run DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::run::{RunRequest, RunResult, RunState};

/// Name of the repository resource that holds the pipeline's own sources
pub const SELF_REPOSITORY: &str = "self";

/// Run as returned by the run and get-run endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Run {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    pub state: RunState,
    #[serde(default)]
    pub result: Option<RunResult>,
    #[serde(default)]
    pub created_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub finished_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub pipeline: Option<PipelineReference>,
    #[serde(default, rename = "_links")]
    pub links: Option<RunLinks>,
}

/// Pipeline summary embedded in a run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineReference {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunLinks {
    #[serde(default)]
    pub web: Option<Link>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Link {
    pub href: String,
}

/// Body of the run-pipeline request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunPipelineParameters {
    pub resources: RunResourcesParameters,
    pub template_parameters: HashMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunResourcesParameters {
    pub repositories: HashMap<String, RepositoryResourceParameters>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryResourceParameters {
    pub ref_name: String,
}

impl From<&RunRequest> for RunPipelineParameters {
    /// Binds the `self` repository to the requested branch and passes the
    /// parameters through untouched
    fn from(request: &RunRequest) -> Self {
        let repositories = HashMap::from([(
            SELF_REPOSITORY.to_string(),
            RepositoryResourceParameters {
                ref_name: request.branch.clone(),
            },
        )]);

        Self {
            resources: RunResourcesParameters { repositories },
            template_parameters: request.parameters.clone(),
        }
    }
}
