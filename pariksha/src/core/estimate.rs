//! Pose estimates loaded from a result submission.

use std::fmt;

/// Scene identifier within a dataset.
pub type SceneId = u32;

/// Image identifier within a scene.
pub type ImageId = u32;

/// Object model identifier.
pub type ObjectId = u32;

/// Time value meaning "estimation time not reported".
pub const TIME_UNAVAILABLE: f64 = -1.0;

/// Identifies one test image: `(scene_id, im_id)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ImageKey {
    /// Scene the image belongs to
    pub scene_id: SceneId,
    /// Image within the scene
    pub im_id: ImageId,
}

impl ImageKey {
    /// Create a new image key.
    #[inline]
    pub const fn new(scene_id: SceneId, im_id: ImageId) -> Self {
        Self { scene_id, im_id }
    }
}

impl fmt::Display for ImageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:06}_{:06}", self.scene_id, self.im_id)
    }
}

/// A single 6D pose hypothesis.
///
/// Rotation is stored row-major (3x3), translation in the units of the
/// dataset models (millimetres for BOP).
#[derive(Clone, Debug, PartialEq)]
pub struct Estimate {
    /// Scene identifier
    pub scene_id: SceneId,
    /// Image identifier
    pub im_id: ImageId,
    /// Object identifier
    pub obj_id: ObjectId,
    /// Confidence of the hypothesis
    pub score: f64,
    /// Row-major rotation matrix
    pub rotation: [f64; 9],
    /// Translation vector
    pub translation: [f64; 3],
    /// Estimation time in seconds, or [`TIME_UNAVAILABLE`]
    pub time: f64,
}

impl Estimate {
    /// Image this estimate was produced for.
    #[inline]
    pub fn key(&self) -> ImageKey {
        ImageKey::new(self.scene_id, self.im_id)
    }

    /// True if the submission reported an estimation time.
    #[inline]
    pub fn has_time(&self) -> bool {
        self.time >= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_key_display_is_zero_padded() {
        assert_eq!(ImageKey::new(48, 1).to_string(), "000048_000001");
    }

    #[test]
    fn test_negative_time_is_unreported() {
        let est = Estimate {
            scene_id: 1,
            im_id: 2,
            obj_id: 3,
            score: 0.9,
            rotation: [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0],
            translation: [0.0; 3],
            time: TIME_UNAVAILABLE,
        };
        assert!(!est.has_time());
        assert_eq!(est.key(), ImageKey::new(1, 2));
    }
}
