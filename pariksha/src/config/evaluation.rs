//! Evaluation settings section.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::defaults;

/// Renderer backend forwarded to the error stage (used by VSD).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RendererType {
    /// OpenGL renderer via vispy
    #[default]
    Vispy,
    /// Native C++ renderer
    Cpp,
    /// Pure Python renderer
    Python,
}

impl fmt::Display for RendererType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RendererType::Vispy => write!(f, "vispy"),
            RendererType::Cpp => write!(f, "cpp"),
            RendererType::Python => write!(f, "python"),
        }
    }
}

impl FromStr for RendererType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "vispy" => Ok(RendererType::Vispy),
            "cpp" => Ok(RendererType::Cpp),
            "python" => Ok(RendererType::Python),
            other => Err(format!(
                "unknown renderer type '{}' (expected vispy, cpp or python)",
                other
            )),
        }
    }
}

/// Evaluation settings section
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EvaluationSection {
    /// Renderer backend for the error stage
    #[serde(default)]
    pub renderer_type: RendererType,

    /// Result files to evaluate, relative to `results_path`
    #[serde(default)]
    pub result_filenames: Vec<String>,

    /// Folder with results to be evaluated
    #[serde(default = "defaults::results_path")]
    pub results_path: String,

    /// Folder for calculated pose errors and performance scores
    #[serde(default = "defaults::eval_path")]
    pub eval_path: String,

    /// File listing the estimation targets (stored in the dataset folder)
    #[serde(default = "defaults::targets_filename")]
    pub targets_filename: String,

    /// Worker count for score computation (1 = sequential)
    #[serde(default = "defaults::num_workers")]
    pub num_workers: usize,

    /// Use the GPU error implementation where available
    #[serde(default)]
    pub use_gpu: bool,

    /// Minimum visible surface fraction of a valid GT pose
    #[serde(default = "defaults::visib_gt_min")]
    pub visib_gt_min: f64,

    /// Exclude objects visible less than `visib_gt_min` from scoring
    #[serde(default = "defaults::enabled")]
    pub ignore_object_visible_less_than_visib_gt_min: bool,

    /// Discretization step for continuous symmetries
    #[serde(default = "defaults::max_sym_disc_step")]
    pub max_sym_disc_step: f64,
}

impl EvaluationSection {
    /// Absolute-or-relative path of the evaluation output folder.
    pub fn eval_dir(&self) -> PathBuf {
        PathBuf::from(&self.eval_path)
    }

    /// Path of a result file inside the results folder.
    pub fn result_path(&self, result_filename: &str) -> PathBuf {
        PathBuf::from(&self.results_path).join(result_filename)
    }
}

impl Default for EvaluationSection {
    fn default() -> Self {
        Self {
            renderer_type: RendererType::default(),
            result_filenames: Vec::new(),
            results_path: defaults::results_path(),
            eval_path: defaults::eval_path(),
            targets_filename: defaults::targets_filename(),
            num_workers: defaults::num_workers(),
            use_gpu: false,
            visib_gt_min: defaults::visib_gt_min(),
            ignore_object_visible_less_than_visib_gt_min: true,
            max_sym_disc_step: defaults::max_sym_disc_step(),
        }
    }
}
