//! Data Transfer Objects for the Azure DevOps Pipelines REST API
//!
//! These mirror the JSON bodies the service sends and accepts (api-version 7.1).
//! Field names follow the wire format through `serde(rename_all = "camelCase")`;
//! fields this client does not read are left out.

pub mod pipeline;
pub mod run;
