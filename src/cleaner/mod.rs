//! Rule-driven removal of legacy files.
//!
//! This module provides:
//! - The static rule table (glob patterns, named directories and files, markdown whitelist)
//! - The orchestrator that applies it to a project root
//! - Confirmation and reporting seams so runs can be scripted in tests

mod executor;
pub mod orchestrator;
pub mod prompt;
pub mod report;
pub mod rules;

pub use executor::{entry_size, remove_entry};
pub use orchestrator::{Cleaner, RunConfig, RunMode, RunSummary};
pub use prompt::{Confirm, ScriptedConfirm, StdinConfirm};
pub use report::{Level, Report};
pub use rules::{CleanupRule, RuleSet};
