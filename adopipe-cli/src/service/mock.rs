//! In-memory gateway for service tests

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use adopipe_client::{ClientError, PipelineGateway, Result};
use adopipe_core::domain::run::{RunResult, RunState};
use adopipe_core::dto::pipeline::Pipeline;
use adopipe_core::dto::run::{Link, PipelineReference, Run, RunLinks, RunPipelineParameters};
use async_trait::async_trait;
use chrono::{TimeZone, Utc};

/// Pipeline as the list endpoint would return it
pub fn pipeline(id: i64, name: &str) -> Pipeline {
    Pipeline {
        id,
        name: name.to_string(),
        folder: Some("\\".to_string()),
        revision: Some(1),
        url: None,
    }
}

/// Run that has not finished yet
pub fn running(state: &str) -> Run {
    Run {
        id: 42,
        name: Some("20240301.1".to_string()),
        state: RunState::from(state.to_string()),
        result: None,
        created_date: Some(Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap()),
        finished_date: None,
        url: Some("https://dev.azure.com/contoso/web/_apis/pipelines/5/runs/42".to_string()),
        pipeline: Some(PipelineReference {
            id: 5,
            name: Some("build".to_string()),
        }),
        links: None,
    }
}

/// Completed run; `None` leaves the result out
pub fn completed(result: Option<&str>) -> Run {
    Run {
        state: RunState::Completed,
        result: result.map(|r| RunResult::from(r.to_string())),
        finished_date: Some(Utc.with_ymd_and_hms(2024, 3, 1, 10, 5, 30).unwrap()),
        links: Some(RunLinks {
            web: Some(Link {
                href: "https://dev.azure.com/contoso/web/_build/results?buildId=42".to_string(),
            }),
        }),
        ..running("completed")
    }
}

/// Scripted [`PipelineGateway`]
///
/// `get_run` answers from a queue; once the queue is empty the last run is
/// repeated, which models a run that stays in its terminal state.
#[derive(Default)]
pub struct MockGateway {
    pipelines: Vec<Pipeline>,
    list_error: Option<u16>,
    launch_error: Option<u16>,
    runs: Mutex<VecDeque<std::result::Result<Run, u16>>>,
    last_run: Mutex<Option<Run>>,
    launched: Mutex<Vec<(String, i64, RunPipelineParameters)>>,
    list_calls: AtomicUsize,
    get_run_calls: AtomicUsize,
}

impl MockGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pipelines(mut self, pipelines: Vec<Pipeline>) -> Self {
        self.pipelines = pipelines;
        self
    }

    pub fn with_runs(self, runs: Vec<Run>) -> Self {
        self.runs.lock().unwrap().extend(runs.into_iter().map(Ok));
        self
    }

    /// Queues a failing `get_run` with the given HTTP status
    pub fn with_run_error(self, status: u16) -> Self {
        self.runs.lock().unwrap().push_back(Err(status));
        self
    }

    pub fn failing_list(mut self, status: u16) -> Self {
        self.list_error = Some(status);
        self
    }

    pub fn failing_launch(mut self, status: u16) -> Self {
        self.launch_error = Some(status);
        self
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn get_run_calls(&self) -> usize {
        self.get_run_calls.load(Ordering::SeqCst)
    }

    /// Every `run_pipeline` call as (project, pipeline_id, body)
    pub fn launched(&self) -> Vec<(String, i64, RunPipelineParameters)> {
        self.launched.lock().unwrap().clone()
    }
}

#[async_trait]
impl PipelineGateway for MockGateway {
    async fn list_pipelines(&self, _project: &str) -> Result<Vec<Pipeline>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        match self.list_error {
            Some(status) => Err(ClientError::api_error(status, "list failed")),
            None => Ok(self.pipelines.clone()),
        }
    }

    async fn run_pipeline(
        &self,
        project: &str,
        pipeline_id: i64,
        parameters: &RunPipelineParameters,
    ) -> Result<Run> {
        self.launched
            .lock()
            .unwrap()
            .push((project.to_string(), pipeline_id, parameters.clone()));

        match self.launch_error {
            Some(status) => Err(ClientError::api_error(status, "run rejected")),
            None => Ok(Run {
                pipeline: Some(PipelineReference {
                    id: pipeline_id,
                    name: None,
                }),
                ..running("inProgress")
            }),
        }
    }

    async fn get_run(&self, _project: &str, _pipeline_id: i64, _run_id: i64) -> Result<Run> {
        self.get_run_calls.fetch_add(1, Ordering::SeqCst);

        let next = self.runs.lock().unwrap().pop_front();
        match next {
            Some(Ok(run)) => {
                *self.last_run.lock().unwrap() = Some(run.clone());
                Ok(run)
            }
            Some(Err(status)) => Err(ClientError::api_error(status, "get run failed")),
            None => self
                .last_run
                .lock()
                .unwrap()
                .clone()
                .ok_or_else(|| ClientError::api_error(404, "no such run")),
        }
    }
}
