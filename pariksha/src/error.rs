//! Error types for Pariksha

use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigLoadError;
use crate::core::{ErrorType, ImageId, ObjectId, SceneId};
use crate::stages::StageKind;

/// Pariksha error type
#[derive(Error, Debug)]
pub enum EvalError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigLoadError),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid result file {path:?}, line {line}: {reason}")]
    ResultFormat {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    #[error("Invalid result name '{0}': expected <method>_<dataset>-<split>")]
    ResultName(String),

    #[error(
        "The running time for scene {scene_id} and image {im_id} is not the same for all \
         estimates ({recorded}s vs {found}s)"
    )]
    TimingInconsistency {
        scene_id: SceneId,
        im_id: ImageId,
        recorded: f64,
        found: f64,
    },

    #[error("Calculation of {stage} failed: {detail}")]
    StageFailure { stage: StageKind, detail: String },

    #[error("Failed to load score file {path:?}: {reason}")]
    ScoreFile { path: PathBuf, reason: String },

    #[error("Object {obj_id} has a score but no instance count ({error_type})")]
    MissingInstanceCount {
        error_type: ErrorType,
        obj_id: ObjectId,
    },

    #[error(
        "Object {obj_id} has zero instances in one threshold file and positive instances in \
         another ({error_type})"
    )]
    InconsistentObject {
        error_type: ErrorType,
        obj_id: ObjectId,
    },

    #[error("No object has a valid score for error type {0}")]
    NoScoredObjects(ErrorType),

    #[error("Combined mAP needs the {0} score")]
    MissingCombinedErrorType(ErrorType),
}

pub type Result<T> = std::result::Result<T, EvalError>;
