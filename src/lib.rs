//! Legacy Sweep - rule-driven cleanup of legacy project files
//!
//! This crate provides functionality for:
//! - Removing test files, caches and stray docs from a project tree
//! - Dry runs, forced runs and per-item confirmation
//! - A phase-grouped report with a closing summary

pub mod cleaner;
pub mod cli;
pub mod config;
pub mod error;
pub mod signals;

// Re-export commonly used types
pub use config::Config;
pub use error::{Result, SweepError};
