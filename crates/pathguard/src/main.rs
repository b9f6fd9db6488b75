use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use pathguard_core::{Decision, PathGuard};

#[derive(Parser)]
#[command(
    name = "pathguard",
    version,
    about = "Pre-write hook that blocks file edits outside the allowlist"
)]
struct Cli {
    /// Append diagnostics to this file. Nothing is logged without it.
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            // Exit status 2 means "blocked" to the caller; a usage error must not look like one.
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    // An unusable log file is a misconfigured invocation, reported like a usage error.
    if let Some(path) = &cli.log_file {
        if let Err(e) = init_logging(path, cli.verbose) {
            eprintln!("error: {e:#}");
            return ExitCode::FAILURE;
        }
    }

    let guard = PathGuard::default();
    let decision = guard.evaluate_reader(io::stdin().lock());
    report(&decision, &mut io::stderr().lock())
}

/// Log to a file; stderr belongs to the block diagnostic.
fn init_logging(path: &Path, verbose: bool) -> Result<()> {
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))?;

    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install log subscriber: {e}"))
}

fn report(decision: &Decision, stderr: &mut impl Write) -> ExitCode {
    if let Err(e) = decision.write_diagnostic(stderr) {
        tracing::error!("Failed to write block diagnostic: {e}");
    }
    ExitCode::from(decision.exit_status())
}
