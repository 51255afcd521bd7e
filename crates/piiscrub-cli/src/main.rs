//! piiscrub CLI
//!
//! Masks PII and SPII phrases in a file or in every file of a directory.
//!
//! Usage:
//! ```bash
//! # Replace every word with [TOKEN]
//! piiscrub --file notes.txt
//!
//! # Mask PII/SPII phrases, writing into ./out
//! piiscrub --mode redact --file ./records --output ./out
//!
//! # Settings from a config file, no prompts
//! piiscrub --config piiscrub.yaml --file ./records --yes
//! ```

use anyhow::{Context, bail};
use clap::Parser;
use piiscrub_cli::{
    AutoApprove, BatchReport, Driver, DriverOptions, InteractiveApprover, LoggingConfig,
    ScrubConfig,
};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(name = "piiscrub")]
#[command(about = "Tokenize, detokenize or redact PII and SPII in text files", long_about = None)]
struct Cli {
    /// Mode: tokenize, detokenize or redact [default: tokenize]
    #[arg(short, long, value_name = "MODE")]
    mode: Option<String>,

    /// File or directory to process
    #[arg(short, long, value_name = "PATH")]
    file: PathBuf,

    /// Directory to write output files into
    #[arg(short, long, value_name = "DIR")]
    output: Option<PathBuf>,

    /// Token used for tokenize and detokenize [default: "[TOKEN]"]
    #[arg(short, long, value_name = "TOKEN")]
    token: Option<String>,

    /// Path to configuration file (YAML or TOML)
    #[arg(short, long, value_name = "FILE", env = "PIISCRUB_CONFIG")]
    config: Option<PathBuf>,

    /// Process every file without asking
    #[arg(short, long, default_value = "false")]
    yes: bool,

    /// Report matches without writing output
    #[arg(long, default_value = "false")]
    dry_run: bool,
}

fn expand(path: &std::path::Path) -> PathBuf {
    PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).to_string())
}

fn init_tracing(logging: &LoggingConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::new(format!("{}", logging.level()));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // File < environment < flags
    let mut config = match &cli.config {
        Some(path) => {
            let path = expand(path);
            ScrubConfig::from_file(&path)
                .with_context(|| format!("Failed to load config {}", path.display()))?
        }
        None => ScrubConfig::default(),
    };
    config.merge_env();

    if let Some(mode) = cli.mode {
        config.mode = mode;
    }
    if let Some(token) = cli.token {
        config.token = token;
    }
    if let Some(output) = cli.output {
        config.output_dir = Some(output);
    }

    init_tracing(&config.logging)?;

    let mode = config.mode()?;
    let engine = config.build_engine()?;
    let options = DriverOptions {
        mode,
        output_dir: config.output_dir.as_deref().map(expand),
        dry_run: cli.dry_run,
    };
    let target = expand(&cli.file);

    info!("Running {} on {}", mode, target.display());

    let report: BatchReport = if cli.yes {
        Driver::new(engine, options, AutoApprove).run(&target)?
    } else {
        Driver::new(engine, options, InteractiveApprover::stdio()).run(&target)?
    };

    info!(
        "Done: {} processed, {} skipped, {} failed ({} PII and {} SPII matches)",
        report.processed, report.skipped, report.failed, report.matches.pii, report.matches.spii
    );

    if report.failed > 0 {
        warn!("Some files could not be processed");
        bail!("{} of {} approved files failed", report.failed, report.failed + report.processed);
    }

    Ok(())
}
