use std::process::ExitCode;
use std::sync::atomic::Ordering;

use anyhow::{Context, Result};
use clap::Parser;

use legacy_sweep::cleaner::{Cleaner, Report, RunConfig, RunMode, RunSummary, StdinConfirm};
use legacy_sweep::cli::Cli;
use legacy_sweep::config::Config;
use legacy_sweep::{signals, SweepError};

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbose, cli.quiet);

    match run(cli) {
        Ok(summary) if summary.is_success() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::from(1),
        Err(err) => {
            report_fatal(&err);
            ExitCode::from(1)
        }
    }
}

fn run(cli: Cli) -> Result<RunSummary> {
    let config = Config::load(cli.config.as_deref())?;
    tracing::debug!(?config, "Loaded configuration");

    let root = Config::resolve_root(cli.root.as_deref());
    if !root.is_dir() {
        return Err(SweepError::RootNotFound(root).into());
    }

    signals::install_interrupt_handlers().context("Failed to install signal handlers")?;

    let mode = RunMode::from_flags(cli.force, cli.dry_run, cli.interactive);
    let run_config = RunConfig {
        project_root: root,
        mode,
    };

    let summary = Cleaner::new(run_config, &config.rules)
        .with_cancel_flag(signals::interrupt_flag())
        .run(&mut StdinConfirm::new(), &mut Report::stdout())?;

    if signals::interrupt_flag().load(Ordering::SeqCst) {
        return Err(SweepError::Interrupted.into());
    }

    Ok(summary)
}

fn report_fatal(err: &anyhow::Error) {
    match err.downcast_ref::<SweepError>() {
        Some(SweepError::RootNotFound(path)) => {
            eprintln!("Error: Project root not found: {}", path.display());
        }
        Some(SweepError::Interrupted) => eprintln!("\n\nCleanup cancelled by user"),
        _ => eprintln!("\nFatal error: {:#}", err),
    }
}

fn init_logging(verbosity: u8, quiet: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let level = if quiet {
        "error"
    } else {
        match verbosity {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("legacy_sweep={}", level)));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}
