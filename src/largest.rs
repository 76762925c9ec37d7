//! Bounded top-K selection of the largest files

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use serde::Serialize;

/// A file in the largest-files report.
///
/// Ordering ranks larger files higher, and for equal sizes the
/// lexicographically smaller path higher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LargestFile {
    pub path: String,
    pub bytes: u64,
}

impl Ord for LargestFile {
    fn cmp(&self, other: &Self) -> Ordering {
        self.bytes
            .cmp(&other.bytes)
            .then_with(|| other.path.cmp(&self.path))
    }
}

impl PartialOrd for LargestFile {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Keeps the `capacity` highest-ranked files seen so far.
///
/// Backed by a min-heap so the lowest-ranked survivor is evicted first.
#[derive(Debug, Clone)]
pub struct SizeRanker {
    capacity: usize,
    heap: BinaryHeap<Reverse<LargestFile>>,
}

impl SizeRanker {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            heap: BinaryHeap::with_capacity(capacity.saturating_add(1).min(1024)),
        }
    }

    pub fn record(&mut self, path: &str, bytes: u64) {
        if self.capacity == 0 {
            return;
        }
        if self.heap.len() == self.capacity {
            // Skip the allocation when the candidate would be evicted right away.
            let Some(Reverse(lowest)) = self.heap.peek() else {
                return;
            };
            let beats_lowest = bytes > lowest.bytes
                || (bytes == lowest.bytes && path < lowest.path.as_str());
            if !beats_lowest {
                return;
            }
        }
        self.heap.push(Reverse(LargestFile {
            path: path.to_string(),
            bytes,
        }));
        if self.heap.len() > self.capacity {
            self.heap.pop();
        }
    }

    pub fn merge(&mut self, other: SizeRanker) {
        for Reverse(file) in other.heap {
            self.record(&file.path, file.bytes);
        }
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.heap.len()
    }

    #[cfg(test)]
    fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Descending by size, ascending by path for ties.
    pub fn into_sorted(self) -> Vec<LargestFile> {
        // Ascending order of Reverse<_> is descending rank.
        self.heap
            .into_sorted_vec()
            .into_iter()
            .map(|Reverse(file)| file)
            .collect()
    }
}
