//! Per-error-type configuration (`[[errors]]` tables).

use serde::{Deserialize, Serialize};

use crate::core::{ErrorType, error_signature};

/// One error metric to evaluate and its correctness thresholds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ErrorTypeConfig {
    /// Pose-error function
    #[serde(rename = "type")]
    pub error_type: ErrorType,

    /// Top-N estimates considered per object (0 = all)
    #[serde(default)]
    pub n_top: usize,

    /// Ordered threshold vectors; each entry yields one score file
    pub correct_th: Vec<Vec<f64>>,
}

impl ErrorTypeConfig {
    /// Directory name fragment of the computed errors.
    pub fn signature(&self) -> String {
        error_signature(self.error_type, self.n_top)
    }
}
