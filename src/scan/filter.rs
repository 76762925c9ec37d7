//! Exclusion rules shared by every aggregate

use std::collections::BTreeSet;

use glob::Pattern;

use crate::error::{Result, ScanError};

use super::config::ScanOptions;
use super::utils::{basename, glob_match};

/// Directory basenames that are never descended into.
pub const DEFAULT_IGNORED_DIRS: &[&str] = &[
    ".git",
    ".venv",
    "__pycache__",
    "node_modules",
    ".pytest_cache",
];

/// Decides whether a root-relative path is excluded from the scan.
#[derive(Debug, Clone)]
pub struct PathFilter {
    ignored_dirs: BTreeSet<String>,
    patterns: Vec<Pattern>,
}

impl PathFilter {
    /// Create a filter from an explicit ignored-directory set and compiled patterns.
    pub fn new<I, S>(ignored_dirs: I, patterns: Vec<Pattern>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ignored_dirs: ignored_dirs.into_iter().map(Into::into).collect(),
            patterns,
        }
    }

    /// Build the filter for a scan: built-in ignored directories plus the
    /// user's extra directories and compiled glob patterns.
    pub fn from_options(options: &ScanOptions) -> Result<Self> {
        let patterns = options
            .ignore_patterns
            .iter()
            .map(|p| {
                Pattern::new(p).map_err(|source| ScanError::InvalidPattern {
                    pattern: p.clone(),
                    source,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let dirs = DEFAULT_IGNORED_DIRS
            .iter()
            .map(|d| d.to_string())
            .chain(options.ignore_dirs.iter().cloned());

        Ok(Self::new(dirs, patterns))
    }

    pub fn ignored_dirs(&self) -> &BTreeSet<String> {
        &self.ignored_dirs
    }

    /// Check a path and all of its ancestors.
    pub fn is_excluded(&self, rel_path: &str, is_dir: bool) -> bool {
        let mut ancestors = rel_path.match_indices('/').map(|(i, _)| &rel_path[..i]);
        if ancestors.any(|dir| self.is_entry_excluded(dir, true)) {
            return true;
        }
        self.is_entry_excluded(rel_path, is_dir)
    }

    /// Check only the final entry of a path, assuming its ancestors were
    /// already accepted. This is what the top-down traversal uses.
    pub fn is_entry_excluded(&self, rel_path: &str, is_dir: bool) -> bool {
        if is_dir && self.ignored_dirs.contains(basename(rel_path)) {
            return true;
        }
        self.patterns.iter().any(|p| glob_match(p, rel_path))
    }
}
