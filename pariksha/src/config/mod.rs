//! Configuration loading for Pariksha.
//!
//! All settings live in one TOML file; every field has a default, so an
//! empty file (or no file) yields the BOP24 detection setup.
//!
//! ## Example TOML
//!
//! ```toml
//! [evaluation]
//! renderer_type = "vispy"
//! result_filenames = ["gdrnpp_ycbv-test.csv"]
//! results_path = "/data/bop/results"
//! eval_path = "/data/bop/eval"
//! num_workers = 8
//!
//! [[errors]]
//! type = "mssd"
//! n_top = 0
//! correct_th = [[0.05], [0.10], [0.15]]
//!
//! [stages]
//! interpreter = "python3"
//! scripts_dir = "/opt/bop_toolkit/scripts"
//! parallel_failures = "ignore"   # or "abort"
//! ```
//!
//! The configuration is built once at startup and then only borrowed.

mod defaults;
mod error;
mod eval;
mod evaluation;
mod metrics;
mod stages;

pub use error::ConfigLoadError;
pub use eval::{DEFAULT_CONFIG_PATH, EvalConfig};
pub use evaluation::{EvaluationSection, RendererType};
pub use metrics::ErrorTypeConfig;
pub use stages::{ParallelFailurePolicy, StageSection};
