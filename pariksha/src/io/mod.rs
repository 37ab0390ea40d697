//! Result loading, score files and evaluation folder layout.

pub mod layout;
mod results;
mod score_file;

pub use layout::{FINAL_SCORES_FILENAME, error_dir, final_scores_path, score_file_path};
pub use results::{BOP19_HEADER, load_bop_results, read_bop_results};
pub use score_file::ScoreFile;
