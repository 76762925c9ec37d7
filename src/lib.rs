//! Shipshape - repository health scanner
//!
//! One traversal of a directory tree produces TODO/FIXME counts per
//! directory, the largest files, and groups of byte-identical files.

pub mod duplicates;
pub mod error;
pub mod largest;
pub mod logging;
pub mod markers;
pub mod output;
pub mod report;
pub mod scan;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use duplicates::{DuplicateGroup, HASH_SIZE_LIMIT};
pub use error::ScanError;
pub use largest::LargestFile;
pub use output::{print_report, write_report};
pub use report::{RenderMode, Report};
pub use scan::{DEFAULT_IGNORED_DIRS, PathFilter, ScanOptions, Scanner, scan};
