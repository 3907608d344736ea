//! The static rule table that drives a cleanup run.

use crate::error::ConfigError;
use globset::Glob;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A single cleanup rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CleanupRule {
    /// Entries anywhere under the root whose name matches `pattern`.
    Glob { pattern: String, description: String },
    /// A directory directly under the root.
    Directory { name: String, description: String },
    /// A file directly under the root.
    File { name: String, description: String },
    /// Top-level markdown files that must survive the markdown phase.
    KeepMarkdown { names: BTreeSet<String> },
}

impl CleanupRule {
    pub fn glob(pattern: &str, description: &str) -> Self {
        Self::Glob {
            pattern: pattern.to_string(),
            description: description.to_string(),
        }
    }

    pub fn directory(name: &str, description: &str) -> Self {
        Self::Directory {
            name: name.to_string(),
            description: description.to_string(),
        }
    }

    pub fn file(name: &str, description: &str) -> Self {
        Self::File {
            name: name.to_string(),
            description: description.to_string(),
        }
    }

    pub fn keep_markdown<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        Self::KeepMarkdown {
            names: names.into_iter().map(str::to_string).collect(),
        }
    }
}

/// Immutable rule table handed to the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleSet {
    /// Directory names pruned from recursive pattern matching.
    pub excluded_dirs: Vec<String>,
    /// Rules, in declaration order.
    pub entries: Vec<CleanupRule>,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self {
            excluded_dirs: vec!["node_modules".to_string()],
            entries: vec![
                CleanupRule::glob("*.test.ts", "TypeScript test files"),
                CleanupRule::glob("*.test.tsx", "React test files"),
                CleanupRule::glob("*.spec.ts", "TypeScript spec files"),
                CleanupRule::glob("*.spec.tsx", "React spec files"),
                CleanupRule::glob("*.test.js", "JavaScript test files"),
                CleanupRule::glob("*.spec.js", "JavaScript spec files"),
                CleanupRule::directory("backups", "Backup directory"),
                CleanupRule::directory(".reserve-dist", "Reserve distribution cache"),
                CleanupRule::directory("playwright-report", "Playwright test reports"),
                CleanupRule::directory("test-results", "Test results directory"),
                CleanupRule::directory("reports", "Reports directory"),
                CleanupRule::directory(".qodo", "Qodo cache directory"),
                CleanupRule::file(
                    "playwright.component.config.ts",
                    "Playwright component config",
                ),
                CleanupRule::file("vitest.config.ts", "Vitest configuration"),
                CleanupRule::file("test-email.mjs", "Legacy test email script"),
                CleanupRule::file("squash_migrations.sh", "Migration squash script"),
                CleanupRule::file("restaurant.json", "Sample restaurant data"),
                CleanupRule::keep_markdown(["README.md", "CONTRIBUTING.md", "LICENSE.md"]),
            ],
        }
    }
}

impl RuleSet {
    /// An empty table; useful as a base for synthetic rule sets.
    pub fn empty() -> Self {
        Self {
            excluded_dirs: Vec::new(),
            entries: Vec::new(),
        }
    }

    pub fn with_rule(mut self, rule: CleanupRule) -> Self {
        self.entries.push(rule);
        self
    }

    pub fn with_excluded_dir(mut self, name: &str) -> Self {
        self.excluded_dirs.push(name.to_string());
        self
    }

    /// Glob rules as `(pattern, description)`.
    pub fn patterns(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().filter_map(|rule| match rule {
            CleanupRule::Glob {
                pattern,
                description,
            } => Some((pattern.as_str(), description.as_str())),
            _ => None,
        })
    }

    /// Directory rules as `(name, description)`.
    pub fn directories(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().filter_map(|rule| match rule {
            CleanupRule::Directory { name, description } => {
                Some((name.as_str(), description.as_str()))
            }
            _ => None,
        })
    }

    /// File rules as `(name, description)`.
    pub fn files(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().filter_map(|rule| match rule {
            CleanupRule::File { name, description } => Some((name.as_str(), description.as_str())),
            _ => None,
        })
    }

    /// Union of every `keep_markdown` rule.
    pub fn markdown_whitelist(&self) -> BTreeSet<&str> {
        self.entries
            .iter()
            .filter_map(|rule| match rule {
                CleanupRule::KeepMarkdown { names } => Some(names),
                _ => None,
            })
            .flatten()
            .map(String::as_str)
            .collect()
    }

    pub fn is_excluded(&self, name: &str) -> bool {
        self.excluded_dirs.iter().any(|d| d == name)
    }

    /// Reject rules that could not be applied safely.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for name in &self.excluded_dirs {
            check_single_component("excluded directory", name)?;
        }

        for (pattern, _) in self.patterns() {
            Glob::new(pattern).map_err(|e| {
                ConfigError::Invalid(format!("glob pattern '{}': {}", pattern, e))
            })?;
        }
        for (name, _) in self.directories() {
            check_single_component("directory", name)?;
        }
        for (name, _) in self.files() {
            check_single_component("file", name)?;
        }

        Ok(())
    }
}

/// Named rules are resolved against the root and must stay inside it.
fn check_single_component(what: &str, name: &str) -> Result<(), ConfigError> {
    if name.is_empty() {
        return Err(ConfigError::Invalid(format!("{} name must not be empty", what)));
    }
    if name == "." || name == ".." || name.contains('/') || name.contains('\\') {
        return Err(ConfigError::Invalid(format!(
            "{} name '{}' must be a single path component",
            what, name
        )));
    }
    Ok(())
}
