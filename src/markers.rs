//! TODO/FIXME marker counting
//!
//! Counts every case-insensitive occurrence of `TODO` or `FIXME` in a text
//! file, wherever it appears. Files that are not valid UTF-8 are skipped.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::scan::utils::parent_key;

static MARKER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)todo|fixme").expect("MARKER_PATTERN regex is invalid"));

/// Read size for streamed marker counting.
const CHUNK_SIZE: usize = 64 * 1024;

/// A marker straddling a chunk boundary starts at most this many bytes before it.
const MARKER_OVERLAP: usize = "FIXME".len() - 1;

/// Count markers in a file on disk without loading it whole.
///
/// Returns `None` when the file cannot be read or is not UTF-8 text.
pub fn scan_markers(path: &Path) -> Option<usize> {
    let file = File::open(path).ok()?;
    count_markers_in_reader(file).ok().flatten()
}

/// Count markers from a reader in fixed-size chunks.
///
/// `Ok(None)` means the content is not valid UTF-8. Memory use stays at
/// one chunk plus a few carried-over bytes.
pub fn count_markers_in_reader<R: Read>(mut reader: R) -> io::Result<Option<usize>> {
    let mut buf = vec![0u8; CHUNK_SIZE];
    let mut pending: Vec<u8> = Vec::with_capacity(CHUNK_SIZE + MARKER_OVERLAP);
    let mut count = 0;

    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        pending.extend_from_slice(&buf[..n]);

        // A multi-byte character cut by the chunk boundary waits for the next read.
        let valid = match std::str::from_utf8(&pending) {
            Ok(text) => text.len(),
            Err(e) if e.error_len().is_none() => e.valid_up_to(),
            Err(_) => return Ok(None),
        };
        let Ok(text) = std::str::from_utf8(&pending[..valid]) else {
            return Ok(None);
        };

        let mut consumed = 0;
        for m in MARKER_PATTERN.find_iter(text) {
            count += 1;
            consumed = m.end();
        }
        // Keep a tail that could begin a marker completed by the next chunk.
        let mut keep_from = text.len().saturating_sub(MARKER_OVERLAP).max(consumed);
        while !text.is_char_boundary(keep_from) {
            keep_from -= 1;
        }
        pending.drain(..keep_from);
    }

    // Whatever is left holds no complete marker, but must still decode.
    if std::str::from_utf8(&pending).is_err() {
        return Ok(None);
    }
    Ok(Some(count))
}

/// Count markers in raw file content, `None` if it does not decode as UTF-8.
pub fn count_markers_in_bytes(bytes: &[u8]) -> Option<usize> {
    let text = std::str::from_utf8(bytes).ok()?;
    Some(count_markers(text))
}

/// Count markers in decoded text. Occurrences on the same line count separately.
pub fn count_markers(text: &str) -> usize {
    MARKER_PATTERN.find_iter(text).count()
}

/// Per-directory marker totals.
#[derive(Debug, Clone, Default)]
pub struct MarkerTally {
    by_dir: BTreeMap<String, u64>,
}

impl MarkerTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attribute `count` markers to the directory containing `rel_path`.
    /// Zero counts leave no trace.
    pub fn record(&mut self, rel_path: &str, count: usize) {
        if count == 0 {
            return;
        }
        *self.by_dir.entry(parent_key(rel_path).to_string()).or_insert(0) += count as u64;
    }

    pub fn merge(&mut self, other: MarkerTally) {
        for (dir, count) in other.by_dir {
            *self.by_dir.entry(dir).or_insert(0) += count;
        }
    }

    pub fn total(&self) -> u64 {
        self.by_dir.values().sum()
    }

    pub fn into_by_dir(self) -> BTreeMap<String, u64> {
        self.by_dir
    }
}
