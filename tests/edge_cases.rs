//! Edge case and invariant tests for the scan core


use harness::TestTree;
use shipshape::duplicates::hash_bytes;
use shipshape::{DEFAULT_IGNORED_DIRS, HASH_SIZE_LIMIT, RenderMode, ScanOptions, scan};

fn scan_default(tree: &TestTree) -> shipshape::Report {
    scan(tree.path(), &ScanOptions::default()).expect("scan should succeed")
}

/// A small tree exercising every aggregate.
fn mixed_tree() -> TestTree {
    let tree = TestTree::new();
    tree.add_file("README.md", "TODO: write docs\n");
    tree.add_file("src/lib.rs", "// FIXME twice FIXME\n");
    tree.add_file("src/util/helpers.rs", "fn helper() {}\n");
    tree.add_file("src/util/copy.rs", "fn helper() {}\n");
    tree.add_file("docs/guide.md", "fn helper() {}\n");
    tree.add_bytes("assets/logo.bin", &[0u8, 159, 146, 150, 84, 79, 68, 79]);
    tree.add_file("node_modules/dep/index.js", "// TODO vendored\n");
    tree.add_dir("empty/dir");
    tree
}

// ============================================================================
// Invariants
// ============================================================================

#[test]
fn test_todo_total_matches_sum_by_dir() {
    let tree = mixed_tree();
    let report = scan_default(&tree);
    assert_eq!(report.todo_total, report.todo_by_dir.values().sum::<u64>());
    assert!(report.todo_by_dir.values().all(|&count| count > 0));
    assert_eq!(report.todo_total, 3);
}

#[test]
fn test_largest_files_sorted_and_bounded() {
    let tree = mixed_tree();
    let options = ScanOptions {
        top: 3,
        ..Default::default()
    };
    let report = scan(tree.path(), &options).unwrap();
    assert_eq!(report.largest_files.len(), 3);
    for pair in report.largest_files.windows(2) {
        assert!(
            pair[0].bytes > pair[1].bytes
                || (pair[0].bytes == pair[1].bytes && pair[0].path < pair[1].path),
            "bad order: {:?}",
            report.largest_files
        );
    }
    for file in &report.largest_files {
        let on_disk = std::fs::metadata(tree.path().join(&file.path)).unwrap();
        assert_eq!(on_disk.len(), file.bytes);
    }
}

#[test]
fn test_duplicate_groups_rehash_to_their_hash() {
    let tree = mixed_tree();
    let report = scan_default(&tree);
    assert_eq!(report.duplicate_candidates.len(), 1);
    let group = &report.duplicate_candidates[0];
    assert_eq!(
        group.files,
        vec!["docs/guide.md", "src/util/copy.rs", "src/util/helpers.rs"]
    );
    for file in &group.files {
        assert_eq!(hash_bytes(&std::fs::read(tree.path().join(file)).unwrap()), group.hash);
    }
    assert_eq!(group.hash.len(), 64);
    assert!(group.hash.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
}

#[test]
fn test_scan_is_idempotent() {
    let tree = mixed_tree();
    let first = scan_default(&tree).to_json(RenderMode::Compact).unwrap();
    let second = scan_default(&tree).to_json(RenderMode::Compact).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_default_ignored_dirs_contribute_nothing() {
    let tree = TestTree::new();
    for dir in DEFAULT_IGNORED_DIRS {
        tree.add_file(&format!("{dir}/a.txt"), "TODO dup\n");
        tree.add_file(&format!("nested/{dir}/b.txt"), "TODO dup\n");
    }
    tree.add_file("kept.txt", "nothing here\n");

    let report = scan_default(&tree);
    assert_eq!(report.todo_total, 0);
    assert!(report.todo_by_dir.is_empty());
    assert!(report.duplicate_candidates.is_empty());
    assert_eq!(report.largest_files.len(), 1);
    assert_eq!(report.largest_files[0].path, "kept.txt");
}

// ============================================================================
// Content edge cases
// ============================================================================

#[test]
fn test_binary_file_with_embedded_marker_is_skipped() {
    let tree = TestTree::new();
    tree.add_bytes("blob.bin", b"\x00\xffTODO\xfeFIXME");
    let report = scan_default(&tree);
    assert_eq!(report.todo_total, 0);
    // Still ranked by size
    assert_eq!(report.largest_files[0].path, "blob.bin");
}

#[test]
fn test_empty_files_are_duplicates_of_each_other() {
    let tree = TestTree::new();
    tree.add_file("a/empty.txt", "");
    tree.add_file("b/empty.txt", "");
    let report = scan_default(&tree);
    assert_eq!(report.duplicate_candidates.len(), 1);
    assert_eq!(report.duplicate_candidates[0].files, vec!["a/empty.txt", "b/empty.txt"]);
    assert!(report.largest_files.iter().all(|f| f.bytes == 0));
}

#[test]
fn test_file_at_hash_limit_is_hashed() {
    let tree = TestTree::new();
    let at_limit = vec![b'x'; HASH_SIZE_LIMIT as usize];
    tree.add_bytes("one.bin", &at_limit);
    tree.add_bytes("two.bin", &at_limit);
    let report = scan_default(&tree);
    assert_eq!(report.duplicate_candidates.len(), 1);
    assert_eq!(report.largest_files[0].bytes, HASH_SIZE_LIMIT);
}

#[test]
fn test_unicode_paths_and_content() {
    let tree = TestTree::new();
    tree.add_file("données/été.md", "// TODO café 🦀 todo\n");
    let report = scan_default(&tree);
    assert_eq!(report.todo_by_dir.get("données"), Some(&2));
    assert_eq!(report.largest_files[0].path, "données/été.md");
}

#[test]
fn test_deeply_nested_directory_key() {
    let tree = TestTree::new();
    tree.add_file("a/b/c/d/e/f.txt", "FIXME\n");
    let report = scan_default(&tree);
    assert_eq!(report.todo_by_dir.get("a/b/c/d/e"), Some(&1));
}

// ============================================================================
// Ignore patterns
// ============================================================================

#[test]
fn test_path_pattern_prunes_subtree() {
    let tree = TestTree::new();
    tree.add_file("docs/api/index.md", "TODO\n");
    tree.add_file("docs/intro.md", "TODO\n");
    tree.add_file("src/docs.rs", "TODO\n");

    let options = ScanOptions {
        ignore_patterns: vec!["docs/*".to_string()],
        ..Default::default()
    };
    let report = scan(tree.path(), &options).unwrap();
    assert_eq!(report.todo_total, 1);
    assert_eq!(report.todo_by_dir.get("src"), Some(&1));
}

#[test]
fn test_pattern_on_directory_name_excludes_whole_subtree() {
    let tree = TestTree::new();
    tree.add_file("cache_data/x/y.txt", "same\n");
    tree.add_file("cache_data/z.txt", "same\n");
    tree.add_file("keep/y.txt", "other\n");

    let options = ScanOptions {
        ignore_patterns: vec!["cache_*".to_string()],
        ..Default::default()
    };
    let report = scan(tree.path(), &options).unwrap();
    assert!(report.duplicate_candidates.is_empty());
    assert_eq!(report.largest_files.len(), 1);
    assert_eq!(report.ignore_patterns, vec!["cache_*"]);
}

// ============================================================================
// Symlinks and permissions
// ============================================================================

#[cfg(unix)]
#[test]
fn test_broken_symlink_is_ignored() {
    use std::os::unix::fs::symlink;

    let tree = TestTree::new();
    tree.add_file("real.txt", "TODO\n");
    symlink("nonexistent.txt", tree.path().join("broken.txt")).unwrap();

    let report = scan_default(&tree);
    assert_eq!(report.todo_total, 1);
    assert_eq!(report.largest_files.len(), 1);
}

#[cfg(unix)]
#[test]
fn test_symlink_cycle_terminates() {
    use std::os::unix::fs::symlink;

    let tree = TestTree::new();
    tree.add_file("a/file.txt", "TODO\n");
    symlink(tree.path(), tree.path().join("a/loop")).unwrap();

    let report = scan_default(&tree);
    assert_eq!(report.todo_total, 1);
}

#[cfg(unix)]
#[test]
fn test_symlinked_root_is_resolved() {
    use std::os::unix::fs::symlink;

    let tree = TestTree::new();
    tree.add_file("target/file.txt", "TODO\n");
    let link = tree.path().join("root-link");
    symlink(tree.path().join("target"), &link).unwrap();

    let report = scan(&link, &ScanOptions::default()).unwrap();
    let resolved = std::fs::canonicalize(tree.path().join("target")).unwrap();
    assert_eq!(report.path, resolved.to_string_lossy());
    assert_eq!(report.todo_by_dir.get("."), Some(&1));
}

#[cfg(unix)]
#[test]
fn test_unreadable_directory_does_not_abort() {
    use std::fs;
    use std::os::unix::fs::PermissionsExt;

    let tree = TestTree::new();
    tree.add_file("ok.txt", "TODO\n");
    let locked = tree.add_dir("locked");
    fs::write(locked.join("secret.txt"), "TODO\n").unwrap();
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    let result = scan(tree.path(), &ScanOptions::default());
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

    let report = result.expect("scan should recover from unreadable directory");
    assert!(report.todo_total >= 1);
    assert_eq!(report.todo_by_dir.get("."), Some(&1));
}
