//! Final BOP24 score set of one submission.

use std::path::Path;

use log::info;
use serde::ser::{Serialize, SerializeMap, Serializer};

use super::aggregate::ErrorTypeScore;
use super::timing::TimingSummary;
use crate::core::ErrorType;
use crate::error::{EvalError, Result};

/// Key prefix of all reported scores.
pub const SCORE_KEY_PREFIX: &str = "bop24";

/// Scores persisted for a submission.
///
/// Serializes as a flat JSON object:
///
/// ```json
/// {
///   "bop24_mAP_mssd": 0.7,
///   "bop24_mAP_mspd": 0.5,
///   "bop24_mAP": 0.6,
///   "bop24_average_time_per_image": 0.42
/// }
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct FinalScores {
    /// mAP per error type, in configuration order
    pub map_per_error_type: Vec<(ErrorType, f64)>,
    /// Mean of the MSSD and MSPD mAPs
    pub map: f64,
    /// Average estimation time per image, `-1.0` if not reported
    pub average_time_per_image: f64,
}

impl FinalScores {
    /// Combine per-error-type results with the timing summary.
    ///
    /// The combined mAP averages [`ErrorType::COMBINED`] only; other error
    /// types are reported but do not enter it.
    pub fn combine(error_scores: &[ErrorTypeScore], timing: &TimingSummary) -> Result<Self> {
        let map_per_error_type: Vec<(ErrorType, f64)> = error_scores
            .iter()
            .map(|score| (score.error_type, score.map))
            .collect();
        Self::from_maps(map_per_error_type, timing.average_time_per_image())
    }

    /// Build from raw per-error-type mAP values.
    pub fn from_maps(
        map_per_error_type: Vec<(ErrorType, f64)>,
        average_time_per_image: f64,
    ) -> Result<Self> {
        let mut scores = Self {
            map_per_error_type,
            map: 0.0,
            average_time_per_image,
        };

        let mut sum = 0.0;
        for error_type in ErrorType::COMBINED {
            sum += scores
                .map_of(error_type)
                .ok_or(EvalError::MissingCombinedErrorType(error_type))?;
        }
        scores.map = sum / ErrorType::COMBINED.len() as f64;
        Ok(scores)
    }

    /// mAP of one error type.
    pub fn map_of(&self, error_type: ErrorType) -> Option<f64> {
        self.map_per_error_type
            .iter()
            .find(|(t, _)| *t == error_type)
            .map(|(_, m)| *m)
    }

    /// Score names and values in reporting order.
    pub fn entries(&self) -> Vec<(String, f64)> {
        let mut entries: Vec<(String, f64)> = self
            .map_per_error_type
            .iter()
            .map(|(t, m)| (format!("{}_mAP_{}", SCORE_KEY_PREFIX, t), *m))
            .collect();
        entries.push((format!("{}_mAP", SCORE_KEY_PREFIX), self.map));
        entries.push((
            format!("{}_average_time_per_image", SCORE_KEY_PREFIX),
            self.average_time_per_image,
        ));
        entries
    }

    /// Write the scores as JSON, creating parent folders.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Log every score.
    pub fn report(&self) {
        info!("FINAL SCORES:");
        for (name, value) in self.entries() {
            info!("- {}: {}", name, value);
        }
    }
}

impl Serialize for FinalScores {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let entries = self.entries();
        let mut map = serializer.serialize_map(Some(entries.len()))?;
        for (name, value) in &entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
