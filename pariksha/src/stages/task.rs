//! Invocations of the external error and score stages.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::config::{EvalConfig, ErrorTypeConfig};
use crate::core::{ResultName, score_signature};
use crate::io::{error_dir, score_file_path};

/// Which external stage a task belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StageKind {
    /// Pose error computation (one per error type)
    Errors,
    /// Recall score computation (one per threshold vector)
    Scores,
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StageKind::Errors => write!(f, "pose errors"),
            StageKind::Scores => write!(f, "performance scores"),
        }
    }
}

/// One named parameter, rendered as `--name=value` or `--name`.
#[derive(Clone, Debug, PartialEq)]
pub enum StageParam {
    /// `--name=value`
    Value(String, String),
    /// `--name`
    Flag(String),
}

impl StageParam {
    fn value(name: &str, value: impl fmt::Display) -> Self {
        StageParam::Value(name.to_string(), value.to_string())
    }

    /// Parameter name without dashes.
    pub fn name(&self) -> &str {
        match self {
            StageParam::Value(name, _) | StageParam::Flag(name) => name,
        }
    }

    /// Command-line form.
    pub fn to_arg(&self) -> String {
        match self {
            StageParam::Value(name, value) => format!("--{}={}", name, value),
            StageParam::Flag(name) => format!("--{}", name),
        }
    }
}

/// A fully parameterised stage invocation.
#[derive(Clone, Debug, PartialEq)]
pub struct StageTask {
    /// Stage type
    pub kind: StageKind,
    /// Script to execute
    pub script: PathBuf,
    /// Parameters in invocation order
    pub params: Vec<StageParam>,
    /// Score file the task writes (score tasks only)
    pub output: Option<PathBuf>,
}

impl StageTask {
    /// Error computation task for one error type of one result.
    pub fn errors(
        config: &EvalConfig,
        error: &ErrorTypeConfig,
        result_filename: &str,
        result: &ResultName,
    ) -> Self {
        let eval = &config.evaluation;
        let script =
            config
                .stages
                .calc_errors_script_path(eval.use_gpu, error.error_type, &result.dataset);

        let params = vec![
            StageParam::value("n_top", error.n_top),
            StageParam::value("visib_gt_min", eval.visib_gt_min),
            StageParam::value("eval_mode", "detection"),
            StageParam::value("error_type", error.error_type),
            StageParam::value("result_filenames", result_filename),
            StageParam::value("renderer_type", eval.renderer_type),
            StageParam::value("results_path", &eval.results_path),
            StageParam::value("eval_path", &eval.eval_path),
            StageParam::value("targets_filename", &eval.targets_filename),
            StageParam::value("max_sym_disc_step", eval.max_sym_disc_step),
            StageParam::value("skip_missing", 1),
            StageParam::value("num_workers", eval.num_workers),
        ];

        Self {
            kind: StageKind::Errors,
            script,
            params,
            output: None,
        }
    }

    /// Score computation task for one threshold vector.
    pub fn scores(
        config: &EvalConfig,
        error: &ErrorTypeConfig,
        result: &ResultName,
        correct_th: &[f64],
    ) -> Self {
        let eval = &config.evaluation;
        let error_sign = error.signature();
        let error_dir_path = error_dir(&result.name, &error_sign);

        let mut params = vec![
            StageParam::value("error_dir_paths", error_dir_path.display()),
            StageParam::value("eval_path", &eval.eval_path),
            StageParam::value("targets_filename", &eval.targets_filename),
            StageParam::value("visib_gt_min", eval.visib_gt_min),
            StageParam::value("eval_mode", "detection"),
        ];
        if eval.ignore_object_visible_less_than_visib_gt_min {
            params.push(StageParam::Flag(
                "ignore_object_visible_less_than_visib_gt_min".to_string(),
            ));
        }
        let th = correct_th
            .iter()
            .map(|t| t.to_string())
            .collect::<Vec<_>>()
            .join(",");
        params.push(StageParam::Value(
            format!("correct_th_{}", error.error_type),
            th,
        ));

        let output = score_file_path(
            Path::new(&eval.eval_path),
            &result.name,
            &error_sign,
            &score_signature(correct_th, eval.visib_gt_min),
        );

        Self {
            kind: StageKind::Scores,
            script: config.stages.calc_scores_script_path(),
            params,
            output: Some(output),
        }
    }

    /// All score tasks of an error type, in threshold order.
    pub fn scores_for_error_type(
        config: &EvalConfig,
        error: &ErrorTypeConfig,
        result: &ResultName,
    ) -> Vec<Self> {
        error
            .correct_th
            .iter()
            .map(|th| Self::scores(config, error, result, th))
            .collect()
    }

    /// Value of a `--name=value` parameter.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.iter().find_map(|p| match p {
            StageParam::Value(n, v) if n == name => Some(v.as_str()),
            _ => None,
        })
    }

    /// True if a bare `--name` flag is present.
    pub fn has_flag(&self, name: &str) -> bool {
        self.params
            .iter()
            .any(|p| matches!(p, StageParam::Flag(n) if n == name))
    }

    /// Arguments following the script path.
    pub fn args(&self) -> Vec<String> {
        self.params.iter().map(StageParam::to_arg).collect()
    }

    /// Printable command line for logs.
    pub fn command_line(&self, interpreter: &str) -> String {
        let mut parts = vec![interpreter.to_string(), self.script.display().to_string()];
        parts.extend(self.args());
        parts.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EvalConfig;

    fn setup() -> (EvalConfig, ResultName) {
        let mut config = EvalConfig::default();
        config.evaluation.eval_path = "/eval".to_string();
        config.evaluation.results_path = "/results".to_string();
        let result = ResultName::from_filename("gdrnpp_ycbv-test.csv").unwrap();
        (config, result)
    }

    #[test]
    fn test_error_task_parameters() {
        let (config, result) = setup();
        let task = StageTask::errors(&config, &config.errors[0], "gdrnpp_ycbv-test.csv", &result);

        assert_eq!(task.kind, StageKind::Errors);
        assert_eq!(task.script, PathBuf::from("scripts/eval_calc_errors.py"));
        assert_eq!(task.output, None);
        assert_eq!(
            task.args(),
            vec![
                "--n_top=0",
                "--visib_gt_min=0.1",
                "--eval_mode=detection",
                "--error_type=mssd",
                "--result_filenames=gdrnpp_ycbv-test.csv",
                "--renderer_type=vispy",
                "--results_path=/results",
                "--eval_path=/eval",
                "--targets_filename=test_targets_bop24.json",
                "--max_sym_disc_step=0.01",
                "--skip_missing=1",
                "--num_workers=1",
            ]
        );
    }

    #[test]
    fn test_error_task_uses_gpu_script() {
        let (mut config, result) = setup();
        config.evaluation.use_gpu = true;
        let task = StageTask::errors(&config, &config.errors[1], "x.csv", &result);
        assert_eq!(task.script, PathBuf::from("scripts/eval_calc_errors_gpu.py"));
        assert_eq!(task.param("error_type"), Some("mspd"));
    }

    #[test]
    fn test_score_task_parameters_and_output() {
        let (config, result) = setup();
        let task = StageTask::scores(&config, &config.errors[0], &result, &[0.15]);

        assert_eq!(task.kind, StageKind::Scores);
        assert_eq!(
            task.param("error_dir_paths"),
            Some("gdrnpp_ycbv-test/error=mssd_ntop=0")
        );
        assert!(task.has_flag("ignore_object_visible_less_than_visib_gt_min"));
        assert_eq!(task.param("correct_th_mssd"), Some("0.15"));
        assert_eq!(
            task.output,
            Some(PathBuf::from(
                "/eval/gdrnpp_ycbv-test/error=mssd_ntop=0/scores_th=0.150_min-visib=0.100.json"
            ))
        );
    }

    #[test]
    fn test_score_task_without_visibility_flag() {
        let (mut config, result) = setup();
        config.evaluation.ignore_object_visible_less_than_visib_gt_min = false;
        let task = StageTask::scores(&config, &config.errors[1], &result, &[5.0, 10.0]);

        assert!(!task.has_flag("ignore_object_visible_less_than_visib_gt_min"));
        assert_eq!(task.param("correct_th_mspd"), Some("5,10"));
    }

    #[test]
    fn test_one_score_task_per_threshold() {
        let (config, result) = setup();
        let tasks = StageTask::scores_for_error_type(&config, &config.errors[1], &result);
        assert_eq!(tasks.len(), 10);
        assert_eq!(tasks[9].param("correct_th_mspd"), Some("50"));
    }

    #[test]
    fn test_command_line() {
        let (config, result) = setup();
        let task = StageTask::scores(&config, &config.errors[0], &result, &[0.05]);
        let line = task.command_line("python");
        assert!(line.starts_with("python scripts/eval_calc_scores.py --error_dir_paths="));
        assert!(line.ends_with("--correct_th_mssd=0.05"));
    }
}
