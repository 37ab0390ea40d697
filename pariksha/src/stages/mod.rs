//! External stage orchestration.
//!
//! Error and score computation are delegated to external scripts. This
//! module builds their invocations ([`StageTask`]), executes them through a
//! [`StageRunner`] and enforces the ordering between the two stages
//! ([`StageDispatcher`]).

mod dispatcher;
mod runner;
mod task;

pub use dispatcher::{ScoreScheduling, ScoreStageReport, StageDispatcher, TaskFailure};
pub use runner::{ProcessRunner, StageRunner, TerminationStatus};
pub use task::{StageKind, StageParam, StageTask};
