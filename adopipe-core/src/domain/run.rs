//! Run domain types
//!
//! A run moves through a small state machine on the remote side. Only the
//! `completed` state is terminal; every other state, including ones the remote
//! service may add later, means "ask again".

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::dto::run::Run;
use crate::exit::ExitReason;

/// Branch used when none is given
pub const DEFAULT_BRANCH: &str = "master";

/// Request to start a run of a resolved pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunRequest {
    pub pipeline_id: i64,
    pub branch: String,
    pub parameters: HashMap<String, String>,
}

impl RunRequest {
    pub fn new(
        pipeline_id: i64,
        branch: impl Into<String>,
        parameters: HashMap<String, String>,
    ) -> Self {
        Self {
            pipeline_id,
            branch: branch.into(),
            parameters,
        }
    }
}

/// Handle to a started run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunHandle {
    pub id: i64,
    pub pipeline_id: i64,
}

/// Remote run state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RunState {
    Unknown,
    InProgress,
    Canceling,
    Completed,
    /// A state this client does not know about
    Other(String),
}

impl RunState {
    /// Wire representation of the state
    pub fn as_str(&self) -> &str {
        match self {
            RunState::Unknown => "unknown",
            RunState::InProgress => "inProgress",
            RunState::Canceling => "canceling",
            RunState::Completed => "completed",
            RunState::Other(state) => state,
        }
    }

    /// Whether no further status change can happen
    pub fn is_terminal(&self) -> bool {
        matches!(self, RunState::Completed)
    }
}

impl From<String> for RunState {
    fn from(state: String) -> Self {
        match state.as_str() {
            "unknown" => RunState::Unknown,
            "inProgress" => RunState::InProgress,
            "canceling" => RunState::Canceling,
            "completed" => RunState::Completed,
            _ => RunState::Other(state),
        }
    }
}

impl From<RunState> for String {
    fn from(state: RunState) -> Self {
        match state {
            RunState::Other(state) => state,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for RunState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Remote run result, only meaningful once the run is completed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RunResult {
    Succeeded,
    Failed,
    Canceled,
    /// Any other result, kept verbatim for logging
    Other(String),
}

impl RunResult {
    /// Wire representation of the result
    pub fn as_str(&self) -> &str {
        match self {
            RunResult::Succeeded => "succeeded",
            RunResult::Failed => "failed",
            RunResult::Canceled => "canceled",
            RunResult::Other(result) => result,
        }
    }

    /// Translates the result into the process exit reason
    pub fn exit_reason(&self) -> ExitReason {
        match self {
            RunResult::Succeeded => ExitReason::Succeeded,
            RunResult::Failed => ExitReason::Failed,
            RunResult::Canceled => ExitReason::Canceled,
            RunResult::Other(_) => ExitReason::Ambiguous,
        }
    }
}

impl From<String> for RunResult {
    fn from(result: String) -> Self {
        match result.as_str() {
            "succeeded" => RunResult::Succeeded,
            "failed" => RunResult::Failed,
            "canceled" => RunResult::Canceled,
            _ => RunResult::Other(result),
        }
    }
}

impl From<RunResult> for String {
    fn from(result: RunResult) -> Self {
        match result {
            RunResult::Other(result) => result,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for RunResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of a run as observed by a single poll
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunStatus {
    pub state: RunState,
    pub result: Option<RunResult>,
    pub finished_at: Option<DateTime<Utc>>,
    /// Web link to the run, or its REST URL when no web link is given
    pub url: Option<String>,
    pub pipeline_name: Option<String>,
}

impl RunStatus {
    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }

    /// Exit reason for this status; a missing result is ambiguous
    pub fn exit_reason(&self) -> ExitReason {
        self.result
            .as_ref()
            .map(RunResult::exit_reason)
            .unwrap_or(ExitReason::Ambiguous)
    }
}

impl From<Run> for RunStatus {
    fn from(run: Run) -> Self {
        let web = run.links.and_then(|links| links.web).map(|link| link.href);
        Self {
            state: run.state,
            result: run.result,
            finished_at: run.finished_date,
            url: web.or(run.url),
            pipeline_name: run.pipeline.and_then(|pipeline| pipeline.name),
        }
    }
}

/// Terminal observation of a run together with its exit reason
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    pub run: RunHandle,
    pub status: RunStatus,
    pub exit: ExitReason,
}

impl RunOutcome {
    pub fn new(run: RunHandle, status: RunStatus) -> Self {
        let exit = status.exit_reason();
        Self { run, status, exit }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn completed(result: Option<&str>) -> RunStatus {
        RunStatus {
            state: RunState::Completed,
            result: result.map(|r| RunResult::from(r.to_string())),
            finished_at: None,
            url: None,
            pipeline_name: None,
        }
    }

    #[test]
    fn test_only_completed_is_terminal() {
        assert!(RunState::Completed.is_terminal());
        for state in ["unknown", "inProgress", "canceling", "postponed"] {
            assert!(!RunState::from(state.to_string()).is_terminal(), "{state}");
        }
    }

    #[test]
    fn test_unknown_state_is_kept_verbatim() {
        let state = RunState::from("queued".to_string());
        assert_eq!(state, RunState::Other("queued".to_string()));
        assert_eq!(state.to_string(), "queued");
    }

    #[test]
    fn test_result_translation_is_total() {
        assert_eq!(completed(Some("succeeded")).exit_reason().code(), 0);
        assert_eq!(completed(Some("failed")).exit_reason().code(), 1);
        assert_eq!(completed(Some("canceled")).exit_reason().code(), 2);
        assert_eq!(completed(Some("partiallySucceeded")).exit_reason().code(), 3);
        assert_eq!(completed(Some("unknown")).exit_reason().code(), 3);
        assert_eq!(completed(None).exit_reason().code(), 3);
    }

    #[test]
    fn test_outcome_carries_exit_reason() {
        let handle = RunHandle {
            id: 42,
            pipeline_id: 5,
        };
        let outcome = RunOutcome::new(handle, completed(Some("canceled")));
        assert_eq!(outcome.exit, ExitReason::Canceled);
        assert_eq!(outcome.run, handle);
    }
}
