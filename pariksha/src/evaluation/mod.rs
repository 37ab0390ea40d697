//! BOP24 scoring: timing validation, mAP aggregation and final scores.
//!
//! ## Overview
//!
//! Scoring a submission has three parts:
//!
//! 1. **Timing** - per-image estimation times must agree and be reported
//!    for every estimate, otherwise the average time is `-1.0`
//! 2. **Aggregation** - per-threshold recall files of one error type are
//!    folded into a single mAP (threshold -> object -> error type)
//! 3. **Final scores** - the mAPs of all error types are averaged into
//!    `bop24_mAP` and persisted with the average time
//!
//! ## Example
//!
//! ```rust,ignore
//! use pariksha::evaluation::{FinalScores, TimingSummary, aggregate_error_type};
//!
//! let timing = TimingSummary::from_estimates(&estimates)?;
//! let mssd = aggregate_error_type(ErrorType::Mssd, &mssd_files)?;
//! let mspd = aggregate_error_type(ErrorType::Mspd, &mspd_files)?;
//!
//! let scores = FinalScores::combine(&[mssd, mspd], &timing)?;
//! scores.save(&path)?;
//! scores.report();
//! ```

mod aggregate;
mod final_scores;
mod timing;

pub use aggregate::{ErrorTypeScore, ScoreAggregator, aggregate_error_type};
pub use final_scores::{FinalScores, SCORE_KEY_PREFIX};
pub use timing::{TIME_TOLERANCE_S, TimingSummary};
