//! Configuration types for a scan

/// Number of entries reported in `largest_files` unless overridden.
pub const DEFAULT_TOP: usize = 10;

/// Options for a single scan invocation.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Maximum number of entries in the largest-files report. Must be > 0.
    pub top: usize,
    /// Shell-glob patterns matched against root-relative paths and basenames.
    pub ignore_patterns: Vec<String>,
    /// Directory basenames ignored in addition to the built-in set.
    pub ignore_dirs: Vec<String>,
    /// Number of parallel workers for reading file contents.
    /// 0 = auto-detect (use all available cores)
    /// 1 = sequential (no parallelism)
    /// N = use N worker threads
    pub jobs: usize,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            top: DEFAULT_TOP,
            ignore_patterns: Vec::new(),
            ignore_dirs: Vec::new(),
            jobs: 0,
        }
    }
}
