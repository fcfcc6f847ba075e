//! Adopipe Core
//!
//! Core types and abstractions for triggering Azure DevOps pipelines.
//!
//! This crate contains:
//! - Domain types: pipeline references, run requests, run handles and run status
//! - DTOs: wire shapes of the Azure DevOps Pipelines REST API
//! - Parameter model: `key=value` normalization for template parameters
//! - Exit codes: the mapping from outcomes to process exit codes

pub mod domain;
pub mod dto;
pub mod exit;
pub mod parameters;

pub use exit::ExitReason;
pub use parameters::{Parameters, parse_parameters};
