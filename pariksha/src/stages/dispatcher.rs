//! Sequencing and concurrency of the external stages.
//!
//! ## Contract
//!
//! - The error task of an error type runs alone and must succeed before any
//!   of its score tasks is submitted.
//! - Score tasks run either in configuration order on the calling thread
//!   (`num_workers == 1`, first failure is fatal) or on a fixed pool of
//!   `num_workers` threads. The pool is scoped, so
//!   [`StageDispatcher::run_score_stage`] returns only after every task has
//!   terminated.
//! - Pool task failures are non-fatal by default
//!   ([`ParallelFailurePolicy::Ignore`]); aggregation then fails on the
//!   missing score file. [`ParallelFailurePolicy::Abort`] reports all of
//!   them after the barrier instead.

use std::path::PathBuf;
use std::thread;

use crossbeam_channel::unbounded;
use log::{debug, warn};

use super::runner::{StageRunner, TerminationStatus};
use super::task::{StageKind, StageTask};
use crate::config::ParallelFailurePolicy;
use crate::error::{EvalError, Result};

/// How score tasks are scheduled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScoreScheduling {
    /// One after another on the calling thread
    Sequential,
    /// Fixed-size worker pool
    Pool(usize),
}

impl ScoreScheduling {
    /// Scheduling implied by a worker count.
    pub fn from_workers(num_workers: usize) -> Self {
        if num_workers <= 1 {
            ScoreScheduling::Sequential
        } else {
            ScoreScheduling::Pool(num_workers)
        }
    }
}

/// A score task that did not terminate successfully.
#[derive(Clone, Debug, PartialEq)]
pub struct TaskFailure {
    /// Position of the task in the submitted list
    pub index: usize,
    /// Score file the task should have written
    pub output: Option<PathBuf>,
    /// Termination status or launch error
    pub detail: String,
}

impl TaskFailure {
    fn new(index: usize, task: &StageTask, detail: String) -> Self {
        Self {
            index,
            output: task.output.clone(),
            detail,
        }
    }

    fn describe(&self) -> String {
        match &self.output {
            Some(path) => format!("task {} ({}): {}", self.index, path.display(), self.detail),
            None => format!("task {}: {}", self.index, self.detail),
        }
    }
}

/// Outcome of a score stage that was allowed to complete.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScoreStageReport {
    /// Tasks that terminated successfully
    pub succeeded: usize,
    /// Tasks that failed without aborting the stage (pool mode only)
    pub failures: Vec<TaskFailure>,
}

/// Dispatches stage tasks to a [`StageRunner`].
pub struct StageDispatcher<'a, R: StageRunner + ?Sized> {
    runner: &'a R,
    scheduling: ScoreScheduling,
    failure_policy: ParallelFailurePolicy,
}

impl<'a, R: StageRunner + ?Sized> StageDispatcher<'a, R> {
    /// Create a dispatcher.
    pub fn new(
        runner: &'a R,
        scheduling: ScoreScheduling,
        failure_policy: ParallelFailurePolicy,
    ) -> Self {
        Self {
            runner,
            scheduling,
            failure_policy,
        }
    }

    /// Run an error task synchronously; any failure is fatal.
    pub fn run_error_stage(&self, task: &StageTask) -> Result<()> {
        let status = self
            .runner
            .submit(task)
            .map_err(|e| EvalError::StageFailure {
                stage: task.kind,
                detail: e.to_string(),
            })?;

        if !status.success() {
            return Err(EvalError::StageFailure {
                stage: task.kind,
                detail: status.to_string(),
            });
        }
        Ok(())
    }

    /// Run all score tasks of one error type and wait for every one of them.
    pub fn run_score_stage(&self, tasks: &[StageTask]) -> Result<ScoreStageReport> {
        match self.scheduling {
            ScoreScheduling::Sequential => self.run_sequential(tasks),
            ScoreScheduling::Pool(workers) => {
                let report = self.run_pooled(tasks, workers);
                self.apply_failure_policy(report)
            }
        }
    }

    fn run_sequential(&self, tasks: &[StageTask]) -> Result<ScoreStageReport> {
        for (index, task) in tasks.iter().enumerate() {
            let detail = match self.runner.submit(task) {
                Ok(status) if status.success() => continue,
                Ok(status) => status.to_string(),
                Err(e) => e.to_string(),
            };
            return Err(EvalError::StageFailure {
                stage: task.kind,
                detail: TaskFailure::new(index, task, detail).describe(),
            });
        }

        Ok(ScoreStageReport {
            succeeded: tasks.len(),
            failures: Vec::new(),
        })
    }

    fn run_pooled(&self, tasks: &[StageTask], workers: usize) -> ScoreStageReport {
        let (task_tx, task_rx) = unbounded::<usize>();
        let (done_tx, done_rx) = unbounded::<(usize, Result<TerminationStatus>)>();

        for index in 0..tasks.len() {
            task_tx.send(index).ok();
        }
        drop(task_tx);

        let pool_size = workers.min(tasks.len());
        debug!(
            "Dispatching {} score tasks to {} workers",
            tasks.len(),
            pool_size
        );

        let runner = self.runner;
        thread::scope(|scope| {
            for _ in 0..pool_size {
                let task_rx = task_rx.clone();
                let done_tx = done_tx.clone();
                scope.spawn(move || {
                    for index in task_rx.iter() {
                        let outcome = runner.submit(&tasks[index]);
                        if done_tx.send((index, outcome)).is_err() {
                            break;
                        }
                    }
                });
            }
        });
        drop(done_tx);

        let mut report = ScoreStageReport::default();
        for (index, outcome) in done_rx.iter() {
            let detail = match outcome {
                Ok(status) if status.success() => {
                    report.succeeded += 1;
                    continue;
                }
                Ok(status) => status.to_string(),
                Err(e) => e.to_string(),
            };
            report
                .failures
                .push(TaskFailure::new(index, &tasks[index], detail));
        }
        report.failures.sort_by_key(|f| f.index);
        report
    }

    fn apply_failure_policy(&self, report: ScoreStageReport) -> Result<ScoreStageReport> {
        if report.failures.is_empty() {
            return Ok(report);
        }

        match self.failure_policy {
            ParallelFailurePolicy::Ignore => {
                for failure in &report.failures {
                    warn!("Score computation failed: {}", failure.describe());
                }
                Ok(report)
            }
            ParallelFailurePolicy::Abort => {
                let detail = report
                    .failures
                    .iter()
                    .map(TaskFailure::describe)
                    .collect::<Vec<_>>()
                    .join("; ");
                let total = report.failures.len() + report.succeeded;
                Err(EvalError::StageFailure {
                    stage: StageKind::Scores,
                    detail: format!(
                        "{} of {} tasks failed: {}",
                        report.failures.len(),
                        total,
                        detail
                    ),
                })
            }
        }
    }
}
