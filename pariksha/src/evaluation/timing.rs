//! Estimation time validation.
//!
//! A submission reports one run time per image; every estimate of that image
//! repeats it. The benchmark ranks methods by the average time per image, so
//! the times must agree and must be reported for every estimate.

use std::collections::BTreeMap;

use crate::core::{Estimate, ImageKey, TIME_UNAVAILABLE};
use crate::error::{EvalError, Result};

/// Absolute tolerance (seconds) for times reported for the same image.
pub const TIME_TOLERANCE_S: f64 = 1e-3;

/// Per-image estimation times of one submission.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TimingSummary {
    /// Time per image (empty when unavailable)
    times: BTreeMap<ImageKey, f64>,
    /// False if any estimate lacked a time
    available: bool,
}

impl TimingSummary {
    /// Validate the estimates of one submission and summarise their times.
    ///
    /// Scanning stops at the first estimate without a time; consistency of
    /// the remaining estimates is not checked once times are unavailable.
    pub fn from_estimates(estimates: &[Estimate]) -> Result<Self> {
        let mut times: BTreeMap<ImageKey, f64> = BTreeMap::new();

        for est in estimates {
            if !est.has_time() {
                return Ok(Self::unavailable());
            }

            let key = est.key();
            match times.get(&key) {
                Some(&recorded) if (recorded - est.time).abs() > TIME_TOLERANCE_S => {
                    return Err(EvalError::TimingInconsistency {
                        scene_id: key.scene_id,
                        im_id: key.im_id,
                        recorded,
                        found: est.time,
                    });
                }
                Some(_) => {}
                None => {
                    times.insert(key, est.time);
                }
            }
        }

        Ok(Self {
            available: !times.is_empty(),
            times,
        })
    }

    /// Summary for a submission without (complete) times.
    pub fn unavailable() -> Self {
        Self {
            times: BTreeMap::new(),
            available: false,
        }
    }

    /// True if every estimate reported a time.
    pub fn is_available(&self) -> bool {
        self.available
    }

    /// Number of distinct images with a recorded time.
    pub fn image_count(&self) -> usize {
        self.times.len()
    }

    /// Recorded time of one image.
    pub fn time(&self, key: ImageKey) -> Option<f64> {
        self.times.get(&key).copied()
    }

    /// Mean time per image, or [`TIME_UNAVAILABLE`].
    pub fn average_time_per_image(&self) -> f64 {
        if !self.available || self.times.is_empty() {
            return TIME_UNAVAILABLE;
        }
        self.times.values().sum::<f64>() / self.times.len() as f64
    }
}
