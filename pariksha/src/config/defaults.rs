//! Default value functions for serde deserialization.

use super::metrics::ErrorTypeConfig;
use super::stages::ParallelFailurePolicy;
use crate::core::ErrorType;

pub fn results_path() -> String {
    "./results".to_string()
}

pub fn eval_path() -> String {
    "./eval".to_string()
}

pub fn targets_filename() -> String {
    "test_targets_bop24.json".to_string()
}

pub fn num_workers() -> usize {
    1
}

pub fn visib_gt_min() -> f64 {
    0.1
}

pub fn enabled() -> bool {
    true
}

pub fn max_sym_disc_step() -> f64 {
    0.01
}

/// MSSD thresholds 0.05..=0.50 (fraction of object diameter) and MSPD
/// thresholds 5..=50 px, both in ten steps.
pub fn errors() -> Vec<ErrorTypeConfig> {
    vec![
        ErrorTypeConfig {
            error_type: ErrorType::Mssd,
            n_top: 0,
            correct_th: (1..=10).map(|i| vec![(i * 5) as f64 / 100.0]).collect(),
        },
        ErrorTypeConfig {
            error_type: ErrorType::Mspd,
            n_top: 0,
            correct_th: (1..=10).map(|i| vec![(i * 5) as f64]).collect(),
        },
    ]
}

pub fn interpreter() -> String {
    "python".to_string()
}

pub fn scripts_dir() -> String {
    "scripts".to_string()
}

pub fn calc_errors_script() -> String {
    "eval_calc_errors.py".to_string()
}

pub fn calc_errors_gpu_script() -> String {
    "eval_calc_errors_gpu.py".to_string()
}

pub fn calc_scores_script() -> String {
    "eval_calc_scores.py".to_string()
}

pub fn gpu_unsupported_datasets() -> Vec<String> {
    vec!["hot3d".to_string()]
}

pub fn parallel_failures() -> ParallelFailurePolicy {
    ParallelFailurePolicy::Ignore
}
