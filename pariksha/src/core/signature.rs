//! Result naming and evaluation signatures.
//!
//! Signatures are the directory/file name fragments shared with the external
//! stages, so their formatting must stay stable:
//!
//! | Item | Format |
//! |------|--------|
//! | error signature | `error=<type>_ntop=<n_top>` |
//! | score signature | `th=<t1>-<t2>_min-visib=<visib>` (3 decimals) |

use std::path::Path;

use crate::core::ErrorType;
use crate::error::{EvalError, Result};

/// Name of a result submission and the dataset it targets.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultName {
    /// File stem of the result file, e.g. `mymethod_ycbv-test`
    pub name: String,
    /// Dataset token, e.g. `ycbv`
    pub dataset: String,
}

impl ResultName {
    /// Derive the result name and dataset from a result filename.
    ///
    /// The dataset is the second `_`-separated token of the stem, cut at the
    /// first `-` (`method_ycbv-test.csv` -> `ycbv`).
    pub fn from_filename(filename: &str) -> Result<Self> {
        let stem = Path::new(filename)
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| EvalError::ResultName(filename.to_string()))?;

        let dataset = stem
            .split('_')
            .nth(1)
            .and_then(|token| token.split('-').next())
            .filter(|d| !d.is_empty())
            .ok_or_else(|| EvalError::ResultName(filename.to_string()))?;

        Ok(Self {
            name: stem.to_string(),
            dataset: dataset.to_string(),
        })
    }
}

/// Signature of the computed errors for one error type.
pub fn error_signature(error_type: ErrorType, n_top: usize) -> String {
    format!("error={}_ntop={}", error_type, n_top)
}

/// Signature of one score file (threshold vector + visibility cutoff).
pub fn score_signature(correct_th: &[f64], visib_gt_min: f64) -> String {
    let th = correct_th
        .iter()
        .map(|t| format!("{:.3}", t))
        .collect::<Vec<_>>()
        .join("-");
    format!("th={}_min-visib={:.3}", th, visib_gt_min)
}
