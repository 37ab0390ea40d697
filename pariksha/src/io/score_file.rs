//! Score files written by the external score stage.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::ObjectId;
use crate::error::{EvalError, Result};

/// Per-object recall for one error type and one threshold vector.
///
/// The score stage writes more keys (recall, precision, ...); only the two
/// maps needed for mAP are read.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreFile {
    /// Recall in `[0, 1]` per object
    pub scores: BTreeMap<ObjectId, f64>,

    /// Number of evaluated GT instances per object
    pub num_instances_per_object: BTreeMap<ObjectId, u64>,
}

impl ScoreFile {
    /// Load a score file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| EvalError::ScoreFile {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        serde_json::from_str(&contents).map_err(|e| EvalError::ScoreFile {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Write a score file (used by fakes of the score stage).
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_ignores_extra_keys() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("scores_th=0.050_min-visib=0.100.json");
        std::fs::write(
            &path,
            r#"{
                "num_estimates": 120,
                "recall": 0.61,
                "scores": {"1": 0.5, "2": 0.75},
                "num_instances_per_object": {"1": 10, "2": 0}
            }"#,
        )
        .unwrap();

        let file = ScoreFile::load(&path).unwrap();
        assert_eq!(file.scores[&1u32], 0.5);
        assert_eq!(file.scores[&2u32], 0.75);
        assert_eq!(file.num_instances_per_object[&2u32], 0);
    }

    #[test]
    fn test_missing_file_names_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.json");
        match ScoreFile::load(&path) {
            Err(EvalError::ScoreFile { path: p, .. }) => assert_eq!(p, path),
            other => panic!("expected score file error, got {:?}", other),
        }
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a").join("b").join("scores.json");
        let file = ScoreFile {
            scores: BTreeMap::from([(3, 0.25)]),
            num_instances_per_object: BTreeMap::from([(3, 4)]),
        };
        file.save(&path).unwrap();
        assert_eq!(ScoreFile::load(&path).unwrap(), file);
    }
}
