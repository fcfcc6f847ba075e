//! Process exit codes
//!
//! Run results and fatal conditions share one code space. The run-result
//! codes 0..=3 overlap with the configuration codes 1..=3; the overlap is
//! kept for compatibility with existing callers, so a caller that needs to
//! tell them apart has to look at the output as well.

/// Why the process is exiting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExitReason {
    /// Run completed with result `succeeded`
    Succeeded,
    /// Run completed with result `failed`
    Failed,
    /// Run completed with result `canceled`
    Canceled,
    /// Run completed with any other or no result
    Ambiguous,

    MissingOrganization,
    MissingProject,
    MissingToken,
    MissingPipeline,

    /// Transport error while fetching run status
    RunStatusUnavailable,
    /// Polling deadline elapsed before the run completed
    PollDeadlineExceeded,
    /// Polling was interrupted by a shutdown signal
    PollCancelled,

    PipelineNotFound,
    LaunchFailed,
    /// Transport error while listing pipelines
    PipelineLookupFailed,
}

impl ExitReason {
    pub fn code(self) -> u8 {
        match self {
            ExitReason::Succeeded => 0,
            ExitReason::Failed => 1,
            ExitReason::Canceled => 2,
            ExitReason::Ambiguous => 3,
            ExitReason::MissingOrganization => 1,
            ExitReason::MissingProject => 2,
            ExitReason::MissingToken => 3,
            ExitReason::MissingPipeline => 4,
            ExitReason::RunStatusUnavailable => 10,
            ExitReason::PollDeadlineExceeded => 11,
            ExitReason::PollCancelled => 12,
            ExitReason::PipelineNotFound => 20,
            ExitReason::LaunchFailed => 21,
            ExitReason::PipelineLookupFailed => 22,
        }
    }
}

impl From<ExitReason> for std::process::ExitCode {
    fn from(reason: ExitReason) -> Self {
        std::process::ExitCode::from(reason.code())
    }
}
