//! Position report
//!
//! Reads pool and position snapshots from a JSON document and writes, per
//! position, its current token holdings, uncollected fees and the pool price.

mod batch;
mod config;
mod snapshot;

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::batch::{evaluate_batch, BatchOptions};
use crate::config::Config;
use crate::snapshot::{ReportInput, ReportOutput};

#[derive(Parser)]
#[command(name = "position-report")]
#[command(about = "Evaluate concentrated-liquidity positions against pool snapshots")]
struct Cli {
    /// Snapshot document with pools and positions
    input: PathBuf,

    /// Write the report here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, default_value = "position-report.toml")]
    config: PathBuf,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config_missing = !cli.config.exists();
    let mut config = if config_missing {
        Config::default()
    } else {
        Config::from_file(&cli.config)?
    };

    if cli.verbose {
        config.log_level = "debug".to_string();
    }

    init_logging(&config);

    if config_missing {
        warn!("Config file not found, using defaults: {}", cli.config.display());
    }

    if config.report.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(config.report.threads)
            .build_global()
            .context("failed to size the worker pool")?;
    }

    run(&cli.input, cli.output.as_deref(), &config)
}

fn run(input_path: &Path, output_path: Option<&Path>, config: &Config) -> Result<()> {
    info!("Reading snapshots from {}", input_path.display());
    let input = ReportInput::from_file(input_path)?;

    let options = BatchOptions {
        report: config.report_options(),
        strict: config.report.strict,
    };
    let positions = evaluate_batch(&input, &options);

    let generated_at = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .context("system clock is before the unix epoch")?
        .as_secs();

    ReportOutput {
        generated_at,
        positions,
    }
    .write(output_path)?;

    if let Some(path) = output_path {
        info!("Report written to {}", path.display());
    }
    Ok(())
}

fn init_logging(config: &Config) {
    // Logs go to stderr so the report can be piped from stdout
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "position_report={level},clmm_math={level}",
                    level = config.log_level
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
