//! Pariksha - BOP24 pose estimation evaluation
//!
//! Evaluates BOP19 result files with the external BOP toolkit scripts and
//! writes `scores_bop24.json` per result.
//!
//! # Usage
//!
//! ```bash
//! # Defaults, or ./pariksha.toml if present
//! pariksha --result-filenames gdrnpp_ycbv-test.csv
//!
//! # With a config file and overrides
//! pariksha --config bop24.toml --num-workers 8 --use-gpu
//! ```

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use pariksha::config::RendererType;
use pariksha::{EvalConfig, Evaluator, ProcessRunner};

// ============================================================================
// Command Line
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "pariksha")]
#[command(about = "Evaluate 6D object pose estimates with the BOP24 detection protocol")]
struct Args {
    /// TOML configuration file (default: ./pariksha.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Renderer forwarded to the error stage
    #[arg(long)]
    renderer_type: Option<RendererType>,

    /// Result files to evaluate, comma-separated
    #[arg(long, value_delimiter = ',')]
    result_filenames: Option<Vec<String>>,

    /// Folder with the result files
    #[arg(long)]
    results_path: Option<String>,

    /// Folder for evaluation output
    #[arg(long)]
    eval_path: Option<String>,

    /// Evaluation targets file name
    #[arg(long)]
    targets_filename: Option<String>,

    /// Worker count; values above 1 run score tasks in parallel
    #[arg(long)]
    num_workers: Option<usize>,

    /// Use the GPU error script for MSSD/MSPD where supported
    #[arg(long)]
    use_gpu: bool,
}

fn load_config(args: &Args) -> Result<EvalConfig, pariksha::ConfigLoadError> {
    let mut config = match &args.config {
        Some(path) => {
            log::info!("Loading config from {}", path.display());
            EvalConfig::load(path)?
        }
        None => EvalConfig::load_default()?,
    };

    let eval = &mut config.evaluation;
    if let Some(renderer_type) = args.renderer_type {
        eval.renderer_type = renderer_type;
    }
    if let Some(result_filenames) = &args.result_filenames {
        eval.result_filenames = result_filenames.clone();
    }
    if let Some(results_path) = &args.results_path {
        eval.results_path = results_path.clone();
    }
    if let Some(eval_path) = &args.eval_path {
        eval.eval_path = eval_path.clone();
    }
    if let Some(targets_filename) = &args.targets_filename {
        eval.targets_filename = targets_filename.clone();
    }
    if let Some(num_workers) = args.num_workers {
        eval.num_workers = num_workers;
    }
    if args.use_gpu {
        eval.use_gpu = true;
    }

    config.validate()?;
    Ok(config)
}

// ============================================================================
// Main Entry Point
// ============================================================================

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] {} - {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();

    let args = Args::parse();
    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            log::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    if config.evaluation.result_filenames.is_empty() {
        log::warn!("No result files to evaluate");
        return ExitCode::SUCCESS;
    }

    log::info!("pariksha starting");
    log::info!("  Results: {}", config.evaluation.results_path);
    log::info!("  Eval output: {}", config.evaluation.eval_path);
    log::info!("  Renderer: {}", config.evaluation.renderer_type);
    log::info!("  Workers: {}", config.evaluation.num_workers);
    log::info!(
        "  Error types: {}",
        config
            .errors
            .iter()
            .map(|e| e.error_type.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    );

    let runner = ProcessRunner::new(config.stages.interpreter.clone());
    match Evaluator::new(&config, &runner).evaluate_all() {
        Ok(_) => {
            log::info!("Evaluation finished");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Evaluation failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
