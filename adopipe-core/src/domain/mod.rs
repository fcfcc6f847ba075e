//! Core domain types
//!
//! These types represent what a single invocation works with: the pipeline
//! it resolved, the run it started and the status it observed. They are
//! independent of the REST wire format, which lives in [`crate::dto`].

pub mod pipeline;
pub mod run;
