//! External stage settings section.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::defaults;
use crate::core::ErrorType;

/// What to do with failed score tasks when running on the worker pool.
///
/// Sequential score computation always aborts on the first failure.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParallelFailurePolicy {
    /// Log failed tasks and continue to aggregation
    #[default]
    Ignore,
    /// Wait for all tasks, then fail with every collected failure
    Abort,
}

/// External stage settings section
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StageSection {
    /// Interpreter used to launch the stage scripts
    #[serde(default = "defaults::interpreter")]
    pub interpreter: String,

    /// Folder containing the stage scripts
    #[serde(default = "defaults::scripts_dir")]
    pub scripts_dir: String,

    /// CPU error computation script
    #[serde(default = "defaults::calc_errors_script")]
    pub calc_errors_script: String,

    /// GPU error computation script (MSSD/MSPD only)
    #[serde(default = "defaults::calc_errors_gpu_script")]
    pub calc_errors_gpu_script: String,

    /// Score computation script
    #[serde(default = "defaults::calc_scores_script")]
    pub calc_scores_script: String,

    /// Datasets that always use the CPU error script
    #[serde(default = "defaults::gpu_unsupported_datasets")]
    pub gpu_unsupported_datasets: Vec<String>,

    /// Failure handling for pooled score tasks
    #[serde(default = "defaults::parallel_failures")]
    pub parallel_failures: ParallelFailurePolicy,
}

impl StageSection {
    /// Pick the error computation script for a metric and dataset.
    pub fn calc_errors_script_path(
        &self,
        use_gpu: bool,
        error_type: ErrorType,
        dataset: &str,
    ) -> PathBuf {
        let gpu = use_gpu
            && error_type.has_gpu_implementation()
            && !self.gpu_unsupported_datasets.iter().any(|d| d == dataset);
        let script = if gpu {
            &self.calc_errors_gpu_script
        } else {
            &self.calc_errors_script
        };
        PathBuf::from(&self.scripts_dir).join(script)
    }

    /// Path of the score computation script.
    pub fn calc_scores_script_path(&self) -> PathBuf {
        PathBuf::from(&self.scripts_dir).join(&self.calc_scores_script)
    }
}

impl Default for StageSection {
    fn default() -> Self {
        Self {
            interpreter: defaults::interpreter(),
            scripts_dir: defaults::scripts_dir(),
            calc_errors_script: defaults::calc_errors_script(),
            calc_errors_gpu_script: defaults::calc_errors_gpu_script(),
            calc_scores_script: defaults::calc_scores_script(),
            gpu_unsupported_datasets: defaults::gpu_unsupported_datasets(),
            parallel_failures: defaults::parallel_failures(),
        }
    }
}
