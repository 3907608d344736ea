use clap::Parser;
use std::path::PathBuf;

/// Legacy Sweep - remove legacy tests, configs and docs from a project tree
#[derive(Parser, Debug)]
#[command(name = "legacy-sweep")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Skip confirmation prompts
    #[arg(short, long)]
    pub force: bool,

    /// Show what would be deleted without deleting
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Ask for each deletion individually
    #[arg(short, long)]
    pub interactive: bool,

    /// Path to configuration file
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Project root override
    #[arg(long, env = "LEGACY_SWEEP_ROOT", hide = true, value_name = "PATH")]
    pub root: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress log output below errors
    #[arg(short, long)]
    pub quiet: bool,
}
