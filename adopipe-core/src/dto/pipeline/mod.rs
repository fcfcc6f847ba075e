//! Pipeline DTOs

use serde::{Deserialize, Serialize};

/// Pipeline as returned by the list endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pipeline {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub folder: Option<String>,
    #[serde(default)]
    pub revision: Option<i64>,
    #[serde(default)]
    pub url: Option<String>,
}

/// Collection envelope used by list endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineList {
    #[serde(default)]
    pub count: usize,
    #[serde(default)]
    pub value: Vec<Pipeline>,
}
