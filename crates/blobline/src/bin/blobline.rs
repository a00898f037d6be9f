use std::path::PathBuf;

use blobline::{run_loaded_config, LineFitConfig};
use clap::{Parser, Subcommand};
use log::{info, LevelFilter};

#[derive(Parser)]
#[command(name = "blobline", version, about = "Fit a line through detected blobs")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fit the blob set named by a JSON config and write a run report.
    Fit(FitArgs),
}

#[derive(clap::Args)]
struct FitArgs {
    /// Path to the JSON run config.
    config: PathBuf,

    /// Report path; overrides `output_path` from the config.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Seed for the sampler; overrides `params.seed` from the config.
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long, default_value = "info")]
    log_level: LevelFilter,

    /// Emit JSON log lines (only with the `tracing` feature).
    #[arg(long)]
    log_json: bool,
}

fn init_logging(args: &FitArgs) -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(feature = "tracing")]
    {
        let _ = args.log_level;
        blobline::core::init_tracing(args.log_json);
    }
    #[cfg(not(feature = "tracing"))]
    {
        blobline::core::init_with_level(args.log_level)?;
        if args.log_json {
            log::warn!("--log-json needs the `tracing` feature; using plain logs");
        }
    }
    Ok(())
}

fn run_fit(args: FitArgs) -> Result<(), Box<dyn std::error::Error>> {
    init_logging(&args)?;

    let mut cfg = LineFitConfig::load_json(&args.config)
        .map_err(|e| format!("failed to load config {}: {e}", args.config.display()))?;
    if let Some(seed) = args.seed {
        cfg.params.seed = Some(seed);
    }
    let out_path = args.output.unwrap_or_else(|| cfg.output_path());

    let run = run_loaded_config(&cfg, &args.config)?;
    run.write_json(&out_path)?;
    info!("wrote report to {}", out_path.display());

    if let Some(err) = run.error {
        return Err(err.into());
    }
    if let Some(report) = &run.report {
        println!("{report}");
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    match cli.command {
        Command::Fit(args) => run_fit(args),
    }
}
