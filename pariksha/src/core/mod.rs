//! Core types shared across the evaluator.

mod error_type;
mod estimate;
mod signature;

pub use error_type::ErrorType;
pub use estimate::{Estimate, ImageId, ImageKey, ObjectId, SceneId, TIME_UNAVAILABLE};
pub use signature::{ResultName, error_signature, score_signature};
