//! Single-pass repository scan
//!
//! This module owns the traversal and the exclusion rules:
//!
//! - `PathFilter`: decides which directories and files are excluded
//! - `Scanner`: walks the tree once and feeds every eligible file to the
//!   marker, size and duplicate aggregates

mod config;
mod filter;
pub(crate) mod utils;
mod walker;

// Re-export public types
pub use config::{DEFAULT_TOP, ScanOptions};
pub use filter::{DEFAULT_IGNORED_DIRS, PathFilter};
pub use utils::ROOT_KEY;
pub use walker::{Scanner, scan};
