//! # Pariksha
//!
//! BOP24 6D object pose estimation evaluation: orchestration of the external
//! error and score stages and aggregation of their output into mAP scores.
//!
//! ## Overview
//!
//! A result file (BOP19 CSV) is evaluated against every configured error
//! type (by default MSSD and MSPD):
//!
//! - **Timing** - per-image run times are checked for consistency
//! - **Errors** - one external error computation per error type
//! - **Scores** - one external recall computation per threshold vector,
//!   sequential or on a worker pool
//! - **Aggregation** - recalls are averaged over thresholds, objects and
//!   error types into `bop24_mAP`
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pariksha::{EvalConfig, Evaluator, ProcessRunner};
//!
//! let mut config = EvalConfig::load_default()?;
//! config.evaluation.result_filenames = vec!["gdrnpp_ycbv-test.csv".into()];
//! config.validate()?;
//!
//! let runner = ProcessRunner::new(config.stages.interpreter.clone());
//! for submission in Evaluator::new(&config, &runner).evaluate_all()? {
//!     println!("{}: {:.3}", submission.result.name, submission.scores.map);
//! }
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod evaluation;
pub mod io;
pub mod pipeline;
pub mod stages;

pub use config::{ConfigLoadError, EvalConfig};
pub use core::{ErrorType, Estimate, ImageKey, ResultName};
pub use error::{EvalError, Result};
pub use evaluation::{ErrorTypeScore, FinalScores, TimingSummary};
pub use io::ScoreFile;
pub use pipeline::{Evaluator, SubmissionScores};
pub use stages::{ProcessRunner, StageRunner, StageTask, TerminationStatus};
