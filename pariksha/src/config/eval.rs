//! Main EvalConfig, loading and validation.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::defaults;
use super::error::ConfigLoadError;
use super::evaluation::EvaluationSection;
use super::metrics::ErrorTypeConfig;
use super::stages::StageSection;
use crate::core::ErrorType;

/// Default config file looked up in the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "pariksha.toml";

/// Full Pariksha configuration loaded from TOML
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EvalConfig {
    /// Evaluation settings
    #[serde(default)]
    pub evaluation: EvaluationSection,

    /// Error types to evaluate, in reporting order
    #[serde(default = "defaults::errors")]
    pub errors: Vec<ErrorTypeConfig>,

    /// External stage settings
    #[serde(default)]
    pub stages: StageSection,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            evaluation: EvaluationSection::default(),
            errors: defaults::errors(),
            stages: StageSection::default(),
        }
    }
}

impl EvalConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigLoadError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigLoadError::Io(format!("{}: {}", path.display(), e)))?;
        Self::from_toml(&contents)
    }

    /// Load from `pariksha.toml` if it exists, otherwise use defaults
    pub fn load_default() -> Result<Self, ConfigLoadError> {
        let path = Path::new(DEFAULT_CONFIG_PATH);
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse from TOML string
    pub fn from_toml(contents: &str) -> Result<Self, ConfigLoadError> {
        toml::from_str(contents).map_err(|e| ConfigLoadError::Parse(e.to_string()))
    }

    /// Check cross-field constraints that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        let eval = &self.evaluation;

        if eval.num_workers == 0 {
            return Err(ConfigLoadError::Invalid(
                "num_workers must be at least 1".to_string(),
            ));
        }

        if !(0.0..=1.0).contains(&eval.visib_gt_min) {
            return Err(ConfigLoadError::Invalid(format!(
                "visib_gt_min must be within [0, 1], got {}",
                eval.visib_gt_min
            )));
        }

        if self.errors.is_empty() {
            return Err(ConfigLoadError::Invalid(
                "at least one error type must be configured".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for error in &self.errors {
            if !seen.insert(error.error_type) {
                return Err(ConfigLoadError::Invalid(format!(
                    "error type {} configured more than once",
                    error.error_type
                )));
            }
            if error.correct_th.is_empty() {
                return Err(ConfigLoadError::Invalid(format!(
                    "error type {} has no correctness thresholds",
                    error.error_type
                )));
            }
            if error.correct_th.iter().any(|th| th.is_empty()) {
                return Err(ConfigLoadError::Invalid(format!(
                    "error type {} has an empty threshold vector",
                    error.error_type
                )));
            }
        }

        for required in ErrorType::COMBINED {
            if !self.errors.iter().any(|e| e.error_type == required) {
                return Err(ConfigLoadError::Invalid(format!(
                    "error type {} is required for the combined mAP",
                    required
                )));
            }
        }

        Ok(())
    }
}
