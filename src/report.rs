//! Scan report and its JSON rendering

use std::collections::BTreeMap;

use serde::Serialize;

pub use crate::duplicates::DuplicateGroup;
pub use crate::largest::LargestFile;

/// JSON layout of a rendered report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RenderMode {
    /// Two-space indented
    #[default]
    Pretty,
    /// No insignificant whitespace
    Compact,
}

/// The result of one scan.
///
/// Every path is relative to the scan root and uses `/` separators.
/// Collections are always serialized, even when empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    /// Absolute, resolved scan root
    pub path: String,
    pub todo_total: u64,
    pub todo_by_dir: BTreeMap<String, u64>,
    pub largest_files: Vec<LargestFile>,
    pub duplicate_candidates: Vec<DuplicateGroup>,
    pub ignore_patterns: Vec<String>,
}

impl Report {
    pub fn to_json(&self, mode: RenderMode) -> serde_json::Result<String> {
        match mode {
            RenderMode::Pretty => serde_json::to_string_pretty(self),
            RenderMode::Compact => serde_json::to_string(self),
        }
    }
}
