//! End-to-end BOP24 evaluation of result files.
//!
//! For every result file:
//!
//! ```text
//! load CSV -> timing check -> for each error type:
//!     errors task (blocking) -> score tasks (barrier) -> aggregate
//! -> combine -> scores_bop24.json
//! ```
//!
//! Any fatal error aborts the whole run; result files already evaluated
//! keep their final score files.

use std::path::PathBuf;
use std::time::Instant;

use log::info;

use crate::config::{ErrorTypeConfig, EvalConfig};
use crate::core::ResultName;
use crate::error::Result;
use crate::evaluation::{ErrorTypeScore, FinalScores, TimingSummary, aggregate_error_type};
use crate::io::{ScoreFile, final_scores_path, load_bop_results};
use crate::stages::{ScoreScheduling, StageDispatcher, StageRunner, StageTask};

/// Final scores of one evaluated result file.
#[derive(Clone, Debug, PartialEq)]
pub struct SubmissionScores {
    /// Parsed result name
    pub result: ResultName,
    /// Where the final scores were written
    pub path: PathBuf,
    /// The scores themselves
    pub scores: FinalScores,
}

/// Evaluates result files with a borrowed configuration and stage runner.
pub struct Evaluator<'a, R: StageRunner + ?Sized> {
    config: &'a EvalConfig,
    dispatcher: StageDispatcher<'a, R>,
}

impl<'a, R: StageRunner + ?Sized> Evaluator<'a, R> {
    /// Create an evaluator.
    pub fn new(config: &'a EvalConfig, runner: &'a R) -> Self {
        let dispatcher = StageDispatcher::new(
            runner,
            ScoreScheduling::from_workers(config.evaluation.num_workers),
            config.stages.parallel_failures,
        );
        Self { config, dispatcher }
    }

    /// Evaluate every configured result file in order.
    pub fn evaluate_all(&self) -> Result<Vec<SubmissionScores>> {
        let start = Instant::now();
        let mut all = Vec::with_capacity(self.config.evaluation.result_filenames.len());

        for result_filename in &self.config.evaluation.result_filenames {
            all.push(self.evaluate_submission(result_filename)?);
        }

        info!(
            "Evaluated {} result file(s) in {:.1}s",
            all.len(),
            start.elapsed().as_secs_f64()
        );
        Ok(all)
    }

    /// Evaluate one result file and write its final scores.
    pub fn evaluate_submission(&self, result_filename: &str) -> Result<SubmissionScores> {
        let start = Instant::now();
        info!("===========");
        info!("EVALUATING: {}", result_filename);
        info!("===========");

        let result = ResultName::from_filename(result_filename)?;
        let estimates = load_bop_results(&self.config.evaluation.result_path(result_filename))?;
        info!(
            "Loaded {} estimates of {} ({})",
            estimates.len(),
            result.name,
            result.dataset
        );
        let timing = TimingSummary::from_estimates(&estimates)?;

        let mut error_scores = Vec::with_capacity(self.config.errors.len());
        for error in &self.config.errors {
            error_scores.push(self.evaluate_error_type(error, result_filename, &result)?);
        }

        let scores = FinalScores::combine(&error_scores, &timing)?;
        let path = final_scores_path(&self.config.evaluation.eval_dir(), &result.name);
        scores.save(&path)?;
        info!("Saved final scores to {}", path.display());
        scores.report();

        info!(
            "Evaluation of {} took {:.1}s",
            result_filename,
            start.elapsed().as_secs_f64()
        );
        Ok(SubmissionScores {
            result,
            path,
            scores,
        })
    }

    fn evaluate_error_type(
        &self,
        error: &ErrorTypeConfig,
        result_filename: &str,
        result: &ResultName,
    ) -> Result<ErrorTypeScore> {
        info!("Calculating {} errors of {}", error.error_type, result.name);
        let errors_task = StageTask::errors(self.config, error, result_filename, result);
        self.dispatcher.run_error_stage(&errors_task)?;

        let score_tasks = StageTask::scores_for_error_type(self.config, error, result);
        info!(
            "Calculating {} {} score(s) of {}",
            score_tasks.len(),
            error.error_type,
            result.name
        );
        self.dispatcher.run_score_stage(&score_tasks)?;

        let files = score_tasks
            .iter()
            .filter_map(|task| task.output.as_deref())
            .map(|path| {
                info!("Loading score file {}", path.display());
                ScoreFile::load(path)
            })
            .collect::<Result<Vec<_>>>()?;

        aggregate_error_type(error.error_type, &files)
    }
}
