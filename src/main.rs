use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use pumpdiag::{DiagnosticRun, FileSource, ReaderSource, SnapshotSource, ThresholdConfig};

#[derive(Parser, Debug)]
#[command(name = "pumpdiag")]
#[command(about = "Multi-domain fault diagnosis for centrifugal pump-motor units")]
struct Args {
    /// Path to the measurement snapshot (JSON), or "-" for stdin
    #[arg(short, long, default_value = "snapshot.json")]
    file: PathBuf,

    /// Threshold override file (TOML, JSON or YAML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write the report to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Also export all results as pretty JSON to this file
    #[arg(long)]
    json: Option<PathBuf>,

    /// Print remediation text for each domain finding after the report
    #[arg(short, long)]
    recommendations: bool,

    /// Log level used when RUST_LOG is not set
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level);

    let config = ThresholdConfig::load(args.config.as_deref())?;
    let mut source = open_source(&args.file);
    tracing::info!(source = source.description(), "reading snapshot");
    let snapshot = source.load()?;

    let run = DiagnosticRun::from_snapshot(&snapshot, &config);

    let mut text = run.report(&config);
    if args.recommendations {
        for (domain, recommendation) in run.recommendations() {
            text.push_str(&format!("\n=== RECOMMENDATION ({domain}) ===\n{recommendation}\n"));
        }
    }

    match &args.output {
        Some(path) => {
            fs::write(path, &text)
                .with_context(|| format!("failed to write report to {}", path.display()))?;
            eprintln!("Report written to {}", path.display());
        }
        None => print!("{text}"),
    }

    if let Some(path) = &args.json {
        export_json(&run, path)?;
        eprintln!("Results exported to {}", path.display());
    }

    Ok(())
}

/// Logs go to stderr so the report on stdout stays clean.
fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn open_source(path: &Path) -> Box<dyn SnapshotSource> {
    if path == Path::new("-") {
        Box::new(ReaderSource::stdin())
    } else {
        Box::new(FileSource::new(path))
    }
}

fn export_json(run: &DiagnosticRun, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(run).context("failed to serialize results")?;
    fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}
