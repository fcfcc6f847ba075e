//! Service layer
//!
//! Services hold the logic of a single trigger: resolving the pipeline,
//! launching a run and polling it to completion. They talk to the remote side
//! only through [`adopipe_client::PipelineGateway`], which is injected so they
//! can be tested against an in-memory gateway.

mod launcher;
mod poller;
mod resolver;

#[cfg(test)]
pub(crate) mod mock;

pub use launcher::{LaunchError, RunLauncher};
pub use poller::{PollError, StatusPoller};
pub use resolver::{PipelineResolver, ResolveError};
