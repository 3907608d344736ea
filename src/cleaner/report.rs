//! Human-readable run report.

use crate::cleaner::orchestrator::RunSummary;
use humansize::{format_size, BINARY};
use std::io::{self, Write};

const RULE: &str = "════════════════════════════════════════════════════════";

/// Severity marker for a report line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Success,
    Warning,
    Error,
}

impl Level {
    fn marker(self) -> &'static str {
        match self {
            Level::Info => "ℹ",
            Level::Success => "✓",
            Level::Warning => "⚠",
            Level::Error => "✗",
        }
    }
}

/// Writes the phase-grouped report to any writer.
pub struct Report<W: Write> {
    out: W,
}

impl Report<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> Report<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn line(&mut self, level: Level, message: &str) -> io::Result<()> {
        writeln!(self.out, "{} {}", level.marker(), message)
    }

    pub fn info(&mut self, message: &str) -> io::Result<()> {
        self.line(Level::Info, message)
    }

    pub fn success(&mut self, message: &str) -> io::Result<()> {
        self.line(Level::Success, message)
    }

    pub fn warning(&mut self, message: &str) -> io::Result<()> {
        self.line(Level::Warning, message)
    }

    pub fn error(&mut self, message: &str) -> io::Result<()> {
        self.line(Level::Error, message)
    }

    pub fn blank(&mut self) -> io::Result<()> {
        writeln!(self.out)
    }

    pub fn phase(&mut self, title: &str) -> io::Result<()> {
        self.warning(&format!("→ {}", title))
    }

    fn boxed(&mut self, title: &str) -> io::Result<()> {
        writeln!(self.out, "╔{}╗", RULE)?;
        writeln!(self.out, "║ {:^54} ║", title)?;
        writeln!(self.out, "╚{}╝", RULE)
    }

    pub fn banner(&mut self, root: &std::path::Path, dry_run: bool) -> io::Result<()> {
        self.blank()?;
        self.boxed("Legacy Sweep")?;
        self.blank()?;

        if dry_run {
            self.warning("DRY RUN MODE - No files will be deleted")?;
            self.blank()?;
        }

        self.info(&format!("Project root: {}", root.display()))?;
        self.blank()
    }

    pub fn summary(&mut self, summary: &RunSummary, dry_run: bool) -> io::Result<()> {
        if dry_run {
            self.boxed("DRY RUN SUMMARY - No files were deleted")?;
        } else {
            self.boxed("Cleanup Complete!")?;
        }
        self.blank()?;

        if !dry_run {
            self.success(&format!("Total items deleted: {}", summary.deleted_count))?;
            self.success(&format!("Space freed: {}", size(summary.bytes_freed)))?;
        }

        if !summary.errors.is_empty() {
            self.blank()?;
            self.warning(&format!("Encountered {} error(s):", summary.errors.len()))?;
            for error in &summary.errors {
                self.error(error)?;
            }
        }

        self.blank()?;
        self.info("Next steps:")?;
        writeln!(self.out, "  1. Review any remaining legacy files")?;
        writeln!(
            self.out,
            "  2. Run: npm install (or pnpm install) to verify dependencies"
        )?;
        writeln!(
            self.out,
            "  3. Run: npm run build to verify the project still builds"
        )?;
        self.blank()?;
        self.out.flush()
    }
}

/// Human-readable byte count.
pub fn size(bytes: u64) -> String {
    format_size(bytes, BINARY)
}
