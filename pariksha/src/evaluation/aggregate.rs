//! Per-error-type mAP aggregation.
//!
//! Three nested averages, in the spirit of COCO mAP:
//!
//! 1. **Threshold**: each score file contributes one recall per object.
//! 2. **Object**: an object's AP is the mean of its recalls over thresholds.
//! 3. **Error type**: the mAP is the mean of the per-object APs.
//!
//! Objects with zero GT instances in a score file are not part of the
//! dataset split and are excluded (with a warning).

use std::collections::{BTreeMap, BTreeSet};

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::core::{ErrorType, ObjectId};
use crate::error::{EvalError, Result};
use crate::io::ScoreFile;

/// Aggregated result of one error type.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ErrorTypeScore {
    /// Error type
    pub error_type: ErrorType,
    /// Average precision per object (mean over thresholds)
    pub per_object_ap: BTreeMap<ObjectId, f64>,
    /// Objects excluded for having zero GT instances
    pub ignored: BTreeSet<ObjectId>,
    /// Mean of the per-object APs
    pub map: f64,
}

/// Folds the score files of one error type into its mAP.
#[derive(Clone, Debug)]
pub struct ScoreAggregator {
    error_type: ErrorType,
    per_object: BTreeMap<ObjectId, Vec<f64>>,
    ignored: BTreeSet<ObjectId>,
    thresholds: usize,
}

impl ScoreAggregator {
    /// Start aggregating an error type.
    pub fn new(error_type: ErrorType) -> Self {
        Self {
            error_type,
            per_object: BTreeMap::new(),
            ignored: BTreeSet::new(),
            thresholds: 0,
        }
    }

    /// Number of score files added so far.
    pub fn threshold_count(&self) -> usize {
        self.thresholds
    }

    /// Recall sequence collected for one object.
    pub fn scores_of(&self, obj_id: ObjectId) -> Option<&[f64]> {
        self.per_object.get(&obj_id).map(Vec::as_slice)
    }

    /// Add the score file of one threshold.
    pub fn add_threshold(&mut self, file: &ScoreFile) -> Result<()> {
        for (&obj_id, &score) in &file.scores {
            let num_instances = file
                .num_instances_per_object
                .get(&obj_id)
                .copied()
                .ok_or(EvalError::MissingInstanceCount {
                    error_type: self.error_type,
                    obj_id,
                })?;

            if num_instances > 0 {
                self.per_object.entry(obj_id).or_default().push(score);
            } else {
                self.ignored.insert(obj_id);
                warn!(
                    "Object {} not found in the dataset. Skipping object {} in mAP calculation.",
                    obj_id, obj_id
                );
            }
        }
        self.thresholds += 1;
        Ok(())
    }

    /// Average over thresholds, then over objects.
    pub fn finish(self) -> Result<ErrorTypeScore> {
        if self.ignored.is_empty() {
            info!("Considering all objects for mAP calculation.");
        } else {
            warn!(
                "Ignoring {} objects: {:?} in mAP calculation",
                self.ignored.len(),
                self.ignored
            );
        }

        let mut per_object_ap = BTreeMap::new();
        for (obj_id, scores) in &self.per_object {
            if self.ignored.contains(obj_id) {
                return Err(EvalError::InconsistentObject {
                    error_type: self.error_type,
                    obj_id: *obj_id,
                });
            }

            let ap = mean(scores);
            info!("mAP, {}, {}: {:.3}", self.error_type, obj_id, ap);
            per_object_ap.insert(*obj_id, ap);
        }

        if per_object_ap.is_empty() {
            return Err(EvalError::NoScoredObjects(self.error_type));
        }

        let map = mean(&per_object_ap.values().copied().collect::<Vec<_>>());
        info!("{}, Final mAP: {:.3}", self.error_type, map);

        Ok(ErrorTypeScore {
            error_type: self.error_type,
            per_object_ap,
            ignored: self.ignored,
            map,
        })
    }
}

/// Aggregate a full set of score files for one error type.
pub fn aggregate_error_type(error_type: ErrorType, files: &[ScoreFile]) -> Result<ErrorTypeScore> {
    let mut aggregator = ScoreAggregator::new(error_type);
    for file in files {
        aggregator.add_threshold(file)?;
    }
    aggregator.finish()
}

/// Arithmetic mean; callers guarantee a non-empty slice.
fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}
