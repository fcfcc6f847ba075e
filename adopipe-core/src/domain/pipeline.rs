//! Pipeline domain types

use serde::{Deserialize, Serialize};

use crate::dto::pipeline::Pipeline;

/// A pipeline resolved by name
///
/// Looked up once per invocation and never cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineRef {
    pub name: String,
    pub id: i64,
}

impl From<Pipeline> for PipelineRef {
    fn from(pipeline: Pipeline) -> Self {
        Self {
            name: pipeline.name,
            id: pipeline.id,
        }
    }
}

impl std::fmt::Display for PipelineRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (id: {})", self.name, self.id)
    }
}
