//! Duplicate detection by SHA-256 content hash
//!
//! Files up to [`HASH_SIZE_LIMIT`] bytes are hashed and bucketed by digest.
//! Only buckets with two or more members are reported. Groups are ordered
//! by ascending hash so output does not depend on traversal order.

use std::collections::BTreeMap;

use serde::Serialize;
use sha2::{Digest, Sha256};

/// Files larger than this are never hashed (5 MiB).
pub const HASH_SIZE_LIMIT: u64 = 5 * 1024 * 1024;

/// A set of files sharing identical content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateGroup {
    pub hash: String,
    pub files: Vec<String>,
}

/// Whether a file of `bytes` length takes part in duplicate detection.
pub fn within_hash_limit(bytes: u64) -> bool {
    bytes <= HASH_SIZE_LIMIT
}

/// Lowercase hex SHA-256 of `content`.
pub fn hash_bytes(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    format!("{:x}", hasher.finalize())
}

/// Buckets relative paths by content digest.
#[derive(Debug, Clone, Default)]
pub struct DuplicateGrouper {
    buckets: BTreeMap<String, Vec<String>>,
}

impl DuplicateGrouper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, rel_path: &str, digest: String) {
        self.buckets
            .entry(digest)
            .or_default()
            .push(rel_path.to_string());
    }

    pub fn merge(&mut self, other: DuplicateGrouper) {
        for (digest, mut files) in other.buckets {
            self.buckets.entry(digest).or_default().append(&mut files);
        }
    }

    /// Multi-member groups, hash-ascending, each with sorted file lists.
    pub fn into_groups(self) -> Vec<DuplicateGroup> {
        self.buckets
            .into_iter()
            .filter(|(_, files)| files.len() >= 2)
            .map(|(hash, mut files)| {
                files.sort();
                DuplicateGroup { hash, files }
            })
            .collect()
    }
}
