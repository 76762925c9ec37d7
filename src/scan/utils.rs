//! Shared path helpers for the scan

use std::path::{Component, Path};

use glob::{MatchOptions, Pattern};

/// Key used for the scan root in per-directory tallies.
pub const ROOT_KEY: &str = ".";

/// Glob options: `*` and `?` never cross a `/`, matching is case-sensitive.
const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// Match a compiled glob against a root-relative path or its basename.
pub fn glob_match(pattern: &Pattern, rel_path: &str) -> bool {
    if pattern.matches_with(rel_path, MATCH_OPTIONS) {
        return true;
    }
    let name = basename(rel_path);
    name != rel_path && pattern.matches_with(name, MATCH_OPTIONS)
}

/// Render `path` relative to `root` with forward-slash separators.
///
/// Returns `None` when `path` is not under `root`. The root itself maps to ".".
pub fn relative_path(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    let parts: Vec<_> = rel
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy()),
            _ => None,
        })
        .collect();
    if parts.is_empty() {
        Some(ROOT_KEY.to_string())
    } else {
        Some(parts.join("/"))
    }
}

/// Containing directory of a relative path, "." for entries directly under root.
pub fn parent_key(rel_path: &str) -> &str {
    match rel_path.rsplit_once('/') {
        Some((parent, _)) => parent,
        None => ROOT_KEY,
    }
}

/// Last segment of a relative path.
pub fn basename(rel_path: &str) -> &str {
    rel_path.rsplit_once('/').map_or(rel_path, |(_, name)| name)
}
