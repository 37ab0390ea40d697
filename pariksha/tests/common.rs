//! Test utilities for Pariksha integration tests.
//!
//! Provides result-file fixtures and a scripted stage runner that writes
//! score files instead of launching processes.

#![allow(dead_code)]

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use pariksha::stages::StageParam;
use pariksha::{EvalConfig, Result, ScoreFile, StageRunner, StageTask, TerminationStatus};
use tempfile::TempDir;

/// Identity rotation and a translation, as BOP19 CSV fields.
const POSE: &str = "1 0 0 0 1 0 0 0 1,0 0 500";

/// One BOP19 CSV line.
pub fn csv_line(scene_id: u32, im_id: u32, obj_id: u32, time: f64) -> String {
    format!("{},{},{},0.9,{},{}", scene_id, im_id, obj_id, POSE, time)
}

/// Write a result file with a header.
pub fn write_results(dir: &Path, filename: &str, lines: &[String]) -> PathBuf {
    std::fs::create_dir_all(dir).unwrap();
    let path = dir.join(filename);
    let mut contents = String::from("scene_id,im_id,obj_id,score,R,t,time\n");
    for line in lines {
        contents.push_str(line);
        contents.push('\n');
    }
    std::fs::write(&path, contents).unwrap();
    path
}

/// Two images with consistent times 0.5 s and 0.3 s.
pub fn timed_results() -> Vec<String> {
    vec![
        csv_line(48, 1, 1, 0.5),
        csv_line(48, 1, 2, 0.5),
        csv_line(48, 2, 1, 0.3),
    ]
}

/// Temporary evaluation workspace with `results/` and `eval/` folders.
pub struct Workspace {
    pub dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    pub fn results_dir(&self) -> PathBuf {
        self.dir.path().join("results")
    }

    pub fn eval_dir(&self) -> PathBuf {
        self.dir.path().join("eval")
    }

    /// Write a result file into `results/`.
    pub fn add_result(&self, filename: &str, lines: &[String]) -> PathBuf {
        write_results(&self.results_dir(), filename, lines)
    }

    /// Default configuration pointed at this workspace.
    pub fn config(&self, result_filenames: &[&str], num_workers: usize) -> EvalConfig {
        let mut config = EvalConfig::default();
        config.evaluation.results_path = self.results_dir().display().to_string();
        config.evaluation.eval_path = self.eval_dir().display().to_string();
        config.evaluation.result_filenames =
            result_filenames.iter().map(|s| s.to_string()).collect();
        config.evaluation.num_workers = num_workers;
        config
    }

    /// Final scores JSON of a result, if it was written.
    pub fn final_scores(&self, result_name: &str) -> Option<serde_json::Value> {
        let path = self.eval_dir().join(result_name).join("scores_bop24.json");
        let contents = std::fs::read_to_string(path).ok()?;
        Some(serde_json::from_str(&contents).unwrap())
    }
}

/// Time the fake error stage takes between starting and finishing.
pub const ERROR_STAGE_DURATION: Duration = Duration::from_millis(20);

/// Task boundaries seen by the fake runner, in wall-clock order.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Error task for an error type started
    ErrorsStarted(String),
    /// Error task for an error type finished
    Errors(String),
    /// Score task for an error type and threshold string started
    ScoresStarted(String, String),
    /// Score task for an error type and threshold string finished
    Scores(String, String),
}

/// Stage runner that fakes the external scripts.
///
/// Score tasks write a score file with the configured recall for every
/// object; objects listed in `absent_objects` get zero instances.
pub struct FakeRunner {
    pub recalls: HashMap<String, f64>,
    pub objects: Vec<u32>,
    pub absent_objects: Vec<u32>,
    pub failing_errors: Vec<String>,
    pub failing_thresholds: Vec<String>,
    events: Mutex<Vec<Event>>,
}

impl FakeRunner {
    /// mssd recall 0.7 and mspd recall 0.5 for objects 1 and 2.
    pub fn new() -> Self {
        let recalls = [("mssd".to_string(), 0.7), ("mspd".to_string(), 0.5)]
            .into_iter()
            .collect();
        Self {
            recalls,
            objects: vec![1, 2],
            absent_objects: Vec::new(),
            failing_errors: Vec::new(),
            failing_thresholds: Vec::new(),
            events: Mutex::new(Vec::new()),
        }
    }

    pub fn fail_errors(mut self, error_type: &str) -> Self {
        self.failing_errors.push(error_type.to_string());
        self
    }

    pub fn fail_threshold(mut self, correct_th: &str) -> Self {
        self.failing_thresholds.push(correct_th.to_string());
        self
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    fn record(&self, event: Event) {
        self.events.lock().unwrap().push(event);
    }

    fn score_file(&self, error_type: &str) -> ScoreFile {
        let recall = self.recalls.get(error_type).copied().unwrap_or(0.0);
        let mut scores = BTreeMap::new();
        let mut num_instances_per_object = BTreeMap::new();
        for &obj_id in &self.objects {
            let absent = self.absent_objects.contains(&obj_id);
            scores.insert(obj_id, if absent { 0.0 } else { recall });
            num_instances_per_object.insert(obj_id, if absent { 0 } else { 5 });
        }
        ScoreFile {
            scores,
            num_instances_per_object,
        }
    }
}

impl StageRunner for FakeRunner {
    fn submit(&self, task: &StageTask) -> Result<TerminationStatus> {
        if let Some(error_type) = task.param("error_type") {
            self.record(Event::ErrorsStarted(error_type.to_string()));
            std::thread::sleep(ERROR_STAGE_DURATION);
            self.record(Event::Errors(error_type.to_string()));
            if self.failing_errors.iter().any(|e| e == error_type) {
                return Ok(TerminationStatus::code(1));
            }
            return Ok(TerminationStatus::SUCCESS);
        }

        let (error_type, th) = task
            .params
            .iter()
            .find_map(|p| match p {
                StageParam::Value(name, value) => name
                    .strip_prefix("correct_th_")
                    .map(|t| (t.to_string(), value.clone())),
                StageParam::Flag(_) => None,
            })
            .unwrap();
        self.record(Event::ScoresStarted(error_type.clone(), th.clone()));

        if self.failing_thresholds.contains(&th) {
            self.record(Event::Scores(error_type, th));
            return Ok(TerminationStatus::code(1));
        }

        let output = task.output.as_deref().unwrap();
        self.score_file(&error_type).save(output)?;
        self.record(Event::Scores(error_type, th));
        Ok(TerminationStatus::SUCCESS)
    }
}
