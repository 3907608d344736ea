//! Orchestrator for a single cleanup run.
//!
//! Phases run in a fixed order (patterns, directories, files, markdown),
//! one candidate at a time. A failed candidate is recorded in the
//! [`RunSummary`] and the run carries on.

use crate::cleaner::executor::{entry_size, remove_entry};
use crate::cleaner::prompt::Confirm;
use crate::cleaner::report::{size, Report};
use crate::cleaner::rules::RuleSet;
use crate::error::{DeletionError, Result, SweepError};
use globset::{GlobBuilder, GlobMatcher};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use walkdir::WalkDir;

/// How candidates are confirmed before removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Ask before every removal.
    Normal,
    /// Remove without asking.
    Force,
    /// Report what would be removed, touch nothing.
    DryRun,
    /// Ask before every removal, even when that is already the default.
    Interactive,
}

impl RunMode {
    /// Resolve CLI flags. Dry run wins over everything, force over interactive.
    pub fn from_flags(force: bool, dry_run: bool, interactive: bool) -> Self {
        if dry_run {
            RunMode::DryRun
        } else if force {
            RunMode::Force
        } else if interactive {
            RunMode::Interactive
        } else {
            RunMode::Normal
        }
    }

    pub fn is_dry_run(self) -> bool {
        self == RunMode::DryRun
    }

    fn needs_confirmation(self) -> bool {
        matches!(self, RunMode::Normal | RunMode::Interactive)
    }
}

/// Where to clean and how.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub project_root: PathBuf,
    pub mode: RunMode,
}

/// Totals accumulated over one run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Entries actually removed.
    pub deleted_count: usize,
    /// Bytes released by removed entries.
    pub bytes_freed: u64,
    /// One message per failed candidate, in the order they failed.
    pub errors: Vec<String>,
    /// Dry run only: candidates that would have been removed.
    pub would_delete: usize,
    /// Dry run only: bytes that would have been released.
    pub would_free: u64,
}

impl RunSummary {
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }
}

/// What happened to a single candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Deleted(u64),
    WouldDelete,
    Skipped,
    Failed,
}

/// Runs the four cleanup phases against a project root.
pub struct Cleaner<'a> {
    config: RunConfig,
    rules: &'a RuleSet,
    cancel: Option<&'a AtomicBool>,
}

impl<'a> Cleaner<'a> {
    pub fn new(config: RunConfig, rules: &'a RuleSet) -> Self {
        Self {
            config,
            rules,
            cancel: None,
        }
    }

    /// Stop at the next candidate once `flag` is raised.
    pub fn with_cancel_flag(mut self, flag: &'a AtomicBool) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Execute the run, rendering the report as it goes.
    ///
    /// Only a missing root, cancellation, a bad pattern or a broken
    /// report/prompt stream end the run early.
    pub fn run<W: Write>(
        &self,
        confirm: &mut dyn Confirm,
        report: &mut Report<W>,
    ) -> Result<RunSummary> {
        let root = &self.config.project_root;
        if !root.is_dir() {
            return Err(SweepError::RootNotFound(root.clone()));
        }

        let matchers = self.compile_patterns()?;
        let dry_run = self.config.mode.is_dry_run();

        tracing::info!(root = %root.display(), mode = ?self.config.mode, "Starting cleanup");

        let mut pass = Pass {
            cleaner: self,
            confirm,
            report,
            summary: RunSummary::default(),
        };

        pass.report.banner(root, dry_run)?;
        pass.clean_patterns(&matchers)?;
        pass.check_cancelled()?;
        pass.clean_directories()?;
        pass.check_cancelled()?;
        pass.clean_files()?;
        pass.check_cancelled()?;
        pass.clean_markdown()?;
        // a signal during the last removal must not end in a clean summary
        pass.check_cancelled()?;
        pass.report.summary(&pass.summary, dry_run)?;

        tracing::info!(
            deleted = pass.summary.deleted_count,
            freed = pass.summary.bytes_freed,
            errors = pass.summary.errors.len(),
            "Cleanup finished"
        );

        Ok(pass.summary)
    }

    fn compile_patterns(&self) -> Result<Vec<(GlobMatcher, &'a str, &'a str)>> {
        self.rules
            .patterns()
            .map(|(pattern, description)| {
                GlobBuilder::new(pattern)
                    .literal_separator(true)
                    .build()
                    .map(|glob| (glob.compile_matcher(), pattern, description))
                    .map_err(|source| SweepError::InvalidPattern {
                        pattern: pattern.to_string(),
                        source,
                    })
            })
            .collect()
    }

    /// Every entry below the root whose name matches, skipping excluded dirs.
    fn find_matches(&self, matcher: &GlobMatcher) -> Vec<PathBuf> {
        WalkDir::new(&self.config.project_root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| {
                e.depth() == 0 || !self.rules.is_excluded(&e.file_name().to_string_lossy())
            })
            .flatten()
            .filter(|e| e.depth() > 0 && matcher.is_match(e.file_name()))
            .map(|e| e.into_path())
            .collect()
    }
}

/// Mutable state of one run.
struct Pass<'c, 'a, 'r, W: Write> {
    cleaner: &'c Cleaner<'a>,
    confirm: &'r mut dyn Confirm,
    report: &'r mut Report<W>,
    summary: RunSummary,
}

impl<W: Write> Pass<'_, '_, '_, W> {
    fn root(&self) -> &Path {
        &self.cleaner.config.project_root
    }

    fn dry_run(&self) -> bool {
        self.cleaner.config.mode.is_dry_run()
    }

    fn check_cancelled(&self) -> Result<()> {
        match self.cleaner.cancel {
            Some(flag) if flag.load(Ordering::SeqCst) => Err(SweepError::Interrupted),
            _ => Ok(()),
        }
    }

    fn clean_patterns(&mut self, matchers: &[(GlobMatcher, &str, &str)]) -> Result<()> {
        self.report.phase("Removing Test Files")?;

        for (matcher, pattern, description) in matchers {
            self.check_cancelled()?;
            let matches = self.cleaner.find_matches(matcher);
            tracing::debug!(pattern, count = matches.len(), "Pattern matched");

            if self.dry_run() {
                if !matches.is_empty() {
                    let total: u64 = matches.iter().map(|p| entry_size(p)).sum();
                    self.summary.would_delete += matches.len();
                    self.summary.would_free += total;
                    self.report.info(&format!(
                        "[DRY RUN] Would delete {} files matching '{}' ({})",
                        matches.len(),
                        pattern,
                        size(total)
                    ))?;
                }
                continue;
            }

            let mut count = 0usize;
            let mut freed = 0u64;
            for path in matches {
                let relative = path.strip_prefix(self.root()).unwrap_or(&path);
                let label = format!("{} ({})", description, relative.display());
                if let Outcome::Deleted(bytes) = self.attempt_delete(&path, &label)? {
                    count += 1;
                    freed += bytes;
                }
            }

            if count > 0 {
                self.report
                    .success(&format!("Deleted {} files ({})", count, size(freed)))?;
            }
        }

        self.report.blank()?;
        Ok(())
    }

    fn clean_directories(&mut self) -> Result<()> {
        self.report.phase("Removing Directories")?;

        let rules = self.cleaner.rules;
        for (name, description) in rules.directories() {
            let path = self.root().join(name);
            if path.exists() {
                self.attempt_delete(&path, description)?;
            }
        }

        self.report.blank()?;
        Ok(())
    }

    fn clean_files(&mut self) -> Result<()> {
        self.report.phase("Removing Individual Files")?;

        let rules = self.cleaner.rules;
        for (name, description) in rules.files() {
            let path = self.root().join(name);
            if path.exists() {
                self.attempt_delete(&path, description)?;
            }
        }

        self.report.blank()?;
        Ok(())
    }

    fn clean_markdown(&mut self) -> Result<()> {
        self.report.phase("Removing Documentation Files (.md)")?;
        self.check_cancelled()?;

        let rules = self.cleaner.rules;
        let keep = rules.markdown_whitelist();
        let candidates = match self.top_level_markdown() {
            Ok(paths) => paths
                .into_iter()
                .filter(|p| !keep.contains(file_name(p).as_str()))
                .collect::<Vec<_>>(),
            Err(e) => {
                let message = format!("Failed to list markdown files: {}", e);
                tracing::debug!("{}", message);
                self.report.error(&message)?;
                self.summary.errors.push(message);
                Vec::new()
            }
        };

        if self.dry_run() {
            if !candidates.is_empty() {
                let total: u64 = candidates.iter().map(|p| entry_size(p)).sum();
                self.summary.would_delete += candidates.len();
                self.summary.would_free += total;
                self.report.info(&format!(
                    "[DRY RUN] Would delete {} markdown files ({})",
                    candidates.len(),
                    size(total)
                ))?;
            }
        } else {
            for path in candidates {
                let label = format!("Markdown file ({})", file_name(&path));
                self.attempt_delete(&path, &label)?;
            }
        }

        self.report.blank()?;
        Ok(())
    }

    fn top_level_markdown(&self) -> std::io::Result<Vec<PathBuf>> {
        let mut paths = Vec::new();
        for entry in fs::read_dir(self.root())? {
            let entry = entry?;
            if entry.file_name().to_string_lossy().ends_with(".md") {
                paths.push(entry.path());
            }
        }
        paths.sort();
        Ok(paths)
    }

    /// Apply the confirmation policy to one candidate and remove it.
    fn attempt_delete(&mut self, path: &Path, description: &str) -> Result<Outcome> {
        self.check_cancelled()?;

        if self.dry_run() {
            let bytes = entry_size(path);
            self.summary.would_delete += 1;
            self.summary.would_free += bytes;
            self.report.info(&format!(
                "[DRY RUN] Would delete: {} ({})",
                description,
                size(bytes)
            ))?;
            return Ok(Outcome::WouldDelete);
        }

        if self.cleaner.config.mode.needs_confirmation() {
            let approved = self.confirm.confirm(&format!("Delete {}?", description))?;
            self.check_cancelled()?;
            if !approved {
                tracing::debug!(path = %path.display(), "Skipped by operator");
                return Ok(Outcome::Skipped);
            }
        }

        match remove_entry(path) {
            Ok(bytes) => {
                self.summary.deleted_count += 1;
                self.summary.bytes_freed += bytes;
                tracing::info!(path = %path.display(), bytes, "Deleted");
                self.report
                    .success(&format!("Deleted: {} ({})", description, size(bytes)))?;
                Ok(Outcome::Deleted(bytes))
            }
            Err(source) => {
                let err = DeletionError {
                    description: description.to_string(),
                    path: path.to_path_buf(),
                    source,
                };
                tracing::debug!(
                    path = %err.path.display(),
                    error = %err.source,
                    "Deletion failed"
                );
                let message = err.to_string();
                self.report.error(&message)?;
                self.summary.errors.push(message);
                Ok(Outcome::Failed)
            }
        }
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
