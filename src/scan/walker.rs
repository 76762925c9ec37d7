//! Scanner - one traversal feeding every aggregate

use std::fs;
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::duplicates::{DuplicateGrouper, hash_bytes, within_hash_limit};
use crate::error::{Result, ScanError};
use crate::largest::SizeRanker;
use crate::markers::{MarkerTally, count_markers_in_bytes, scan_markers};
use crate::report::Report;

use super::config::ScanOptions;
use super::filter::PathFilter;
use super::utils::relative_path;

/// A regular file that passed the filter, collected during traversal.
#[derive(Debug)]
struct Candidate {
    path: PathBuf,
    rel: String,
    size: Option<u64>,
}

/// What one file contributes to the aggregates.
#[derive(Debug)]
struct FileRecord {
    rel: String,
    size: Option<u64>,
    markers: Option<usize>,
    digest: Option<String>,
}

/// The three aggregates, kept independent until the report is assembled.
#[derive(Debug)]
struct Aggregates {
    markers: MarkerTally,
    sizes: SizeRanker,
    duplicates: DuplicateGrouper,
}

impl Aggregates {
    fn new(top: usize) -> Self {
        Self {
            markers: MarkerTally::new(),
            sizes: SizeRanker::new(top),
            duplicates: DuplicateGrouper::new(),
        }
    }

    fn record(mut self, file: FileRecord) -> Self {
        if let Some(size) = file.size {
            self.sizes.record(&file.rel, size);
        }
        if let Some(count) = file.markers {
            self.markers.record(&file.rel, count);
        }
        if let Some(digest) = file.digest {
            self.duplicates.record(&file.rel, digest);
        }
        self
    }

    fn merge(mut self, other: Aggregates) -> Self {
        self.markers.merge(other.markers);
        self.sizes.merge(other.sizes);
        self.duplicates.merge(other.duplicates);
        self
    }
}

/// Repository scanner.
///
/// Walks the tree once, pruning excluded directories before descending,
/// then reads each surviving file exactly once for all three aggregates.
/// File contents are read in parallel when `jobs != 1`; results are merged
/// so the report is identical for any worker count.
pub struct Scanner {
    options: ScanOptions,
    filter: Option<PathFilter>,
}

impl Scanner {
    pub fn new(options: ScanOptions) -> Self {
        Self {
            options,
            filter: None,
        }
    }

    /// Use an explicit filter instead of one built from the options.
    pub fn with_filter(mut self, filter: PathFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn scan(&self, root: &Path) -> Result<Report> {
        if self.options.top == 0 {
            return Err(ScanError::InvalidTop);
        }
        let filter = match &self.filter {
            Some(f) => f.clone(),
            None => PathFilter::from_options(&self.options)?,
        };
        let root = resolve_root(root)?;

        info!(root = %root.display(), top = self.options.top, "starting scan");

        let candidates = collect_candidates(&root, filter);
        let aggregates = self.aggregate(&candidates);

        let todo_total = aggregates.markers.total();
        let report = Report {
            path: root.to_string_lossy().into_owned(),
            todo_total,
            todo_by_dir: aggregates.markers.into_by_dir(),
            largest_files: aggregates.sizes.into_sorted(),
            duplicate_candidates: aggregates.duplicates.into_groups(),
            ignore_patterns: self.options.ignore_patterns.clone(),
        };

        info!(
            files = candidates.len(),
            todo_total = report.todo_total,
            duplicate_groups = report.duplicate_candidates.len(),
            "scan finished"
        );
        Ok(report)
    }

    fn aggregate(&self, candidates: &[Candidate]) -> Aggregates {
        let top = self.options.top;
        match Workers::from_jobs(self.options.jobs) {
            Workers::Sequential => candidates
                .iter()
                .fold(Aggregates::new(top), |acc, c| acc.record(inspect(c))),
            Workers::Auto => aggregate_parallel(candidates, top),
            Workers::Fixed(n) => match rayon::ThreadPoolBuilder::new().num_threads(n).build() {
                Ok(pool) => pool.install(|| aggregate_parallel(candidates, top)),
                Err(e) => {
                    // Fall back to rayon's global pool if custom pool creation fails
                    warn!(error = %e, "could not build worker pool, using global pool");
                    aggregate_parallel(candidates, top)
                }
            },
        }
    }
}

enum Workers {
    Auto,
    Sequential,
    Fixed(usize),
}

impl Workers {
    fn from_jobs(jobs: usize) -> Self {
        match jobs {
            0 => Workers::Auto,
            1 => Workers::Sequential,
            n => Workers::Fixed(n),
        }
    }
}

/// Scan `root` with the given options.
pub fn scan(root: &Path, options: &ScanOptions) -> Result<Report> {
    Scanner::new(options.clone()).scan(root)
}

fn resolve_root(root: &Path) -> Result<PathBuf> {
    if !root.exists() {
        return Err(ScanError::RootNotFound(root.to_path_buf()));
    }
    if !root.is_dir() {
        return Err(ScanError::NotADirectory(root.to_path_buf()));
    }
    fs::canonicalize(root).map_err(|source| ScanError::Io {
        path: root.to_path_buf(),
        source,
    })
}

/// Walk the tree and collect every regular file that survives the filter.
///
/// Excluded directories are pruned before they are entered, and symlinks are
/// never followed or reported.
fn collect_candidates(root: &Path, filter: PathFilter) -> Vec<Candidate> {
    let walk_root = root.to_path_buf();

    let walker = WalkBuilder::new(root)
        .standard_filters(false)
        .follow_links(false)
        .sort_by_file_name(|a, b| a.cmp(b))
        .filter_entry(move |entry| {
            if entry.depth() == 0 {
                return true;
            }
            if entry.path_is_symlink() {
                debug!(path = %entry.path().display(), "skipping symlink");
                return false;
            }
            let is_dir = entry.file_type().is_some_and(|t| t.is_dir());
            match relative_path(&walk_root, entry.path()) {
                Some(rel) => !filter.is_entry_excluded(&rel, is_dir),
                None => false,
            }
        })
        .build();

    let mut candidates = Vec::new();
    for result in walker {
        let entry = match result {
            Ok(entry) => entry,
            Err(e) => {
                debug!(error = %e, "skipping unreadable entry");
                continue;
            }
        };
        if !entry.file_type().is_some_and(|t| t.is_file()) {
            continue;
        }
        let Some(rel) = relative_path(root, entry.path()) else {
            continue;
        };
        let size = entry.metadata().ok().map(|m| m.len());
        candidates.push(Candidate {
            path: entry.into_path(),
            rel,
            size,
        });
    }
    candidates
}

fn aggregate_parallel(candidates: &[Candidate], top: usize) -> Aggregates {
    candidates
        .par_iter()
        .fold(|| Aggregates::new(top), |acc, c| acc.record(inspect(c)))
        .reduce(|| Aggregates::new(top), Aggregates::merge)
}

/// Read a file once and derive what it contributes to each aggregate.
///
/// Hash eligibility is decided from the metadata length before any read.
/// Files that are too large to hash, or whose size is unknown, are only
/// streamed for markers and never held in memory whole.
fn inspect(candidate: &Candidate) -> FileRecord {
    let record = |markers: Option<usize>, digest: Option<String>| FileRecord {
        rel: candidate.rel.clone(),
        size: candidate.size,
        markers,
        digest,
    };

    if !candidate.size.is_some_and(within_hash_limit) {
        debug!(path = %candidate.rel, bytes = ?candidate.size, "too large to hash");
        let markers = scan_markers(&candidate.path);
        if markers.is_none() {
            debug!(path = %candidate.rel, "unreadable or not UTF-8, skipping marker count");
        }
        return record(markers, None);
    }

    let content = match fs::read(&candidate.path) {
        Ok(bytes) => bytes,
        Err(e) => {
            debug!(path = %candidate.rel, error = %e, "skipping unreadable file");
            return record(None, None);
        }
    };

    let markers = count_markers_in_bytes(&content);
    if markers.is_none() {
        debug!(path = %candidate.rel, "not UTF-8, skipping marker count");
    }
    // The file may have grown since its metadata was read.
    let len = content.len() as u64;
    let digest = if within_hash_limit(len) {
        Some(hash_bytes(&content))
    } else {
        debug!(path = %candidate.rel, bytes = len, "too large to hash");
        None
    };

    record(markers, digest)
}
