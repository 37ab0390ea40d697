//! On-disk layout of the evaluation folder.
//!
//! ```text
//! <eval_path>/<result_name>/
//!     error=mssd_ntop=0/                 errors written by the error stage
//!         scores_th=0.050_min-visib=0.100.json
//!         ...
//!     scores_bop24.json                  final scores
//! ```

use std::path::{Path, PathBuf};

/// File name of the final scores artifact.
pub const FINAL_SCORES_FILENAME: &str = "scores_bop24.json";

/// Error directory of a result, relative to the evaluation folder.
pub fn error_dir(result_name: &str, error_sign: &str) -> PathBuf {
    Path::new(result_name).join(error_sign)
}

/// Score file for one threshold signature.
pub fn score_file_path(
    eval_path: &Path,
    result_name: &str,
    error_sign: &str,
    score_sign: &str,
) -> PathBuf {
    eval_path
        .join(error_dir(result_name, error_sign))
        .join(format!("scores_{}.json", score_sign))
}

/// Final scores of a result.
pub fn final_scores_path(eval_path: &Path, result_name: &str) -> PathBuf {
    eval_path.join(result_name).join(FINAL_SCORES_FILENAME)
}
