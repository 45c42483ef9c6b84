use std::collections::HashSet;
use std::fs;
use std::path::Path;

use dirlaunch_scan::{CommandScanner, NodeKind, ScanConfig};
use tempfile::TempDir;

fn touch(root: &Path, relative: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, "").unwrap();
}

/// Count entries below `root` with std, for comparison with the scanner.
fn count_entries(root: &Path) -> usize {
    fs::read_dir(root)
        .unwrap()
        .map(|entry| {
            let entry = entry.unwrap();
            1 + if entry.file_type().unwrap().is_dir() {
                count_entries(&entry.path())
            } else {
                0
            }
        })
        .sum()
}

#[test]
fn test_node_count_matches_entries() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    touch(root, "vim/a.txt");
    touch(root, "vim/sub/b.txt");
    touch(root, "python3.u/scripts/hello.py");
    touch(root, "cat/empty/keep");
    fs::create_dir_all(root.join("lonely")).unwrap();
    touch(root, "top.sh");

    let tree = CommandScanner::new().scan(&ScanConfig::new(root)).unwrap();

    assert_eq!(tree.node_count(), count_entries(root));

    let mut seen = HashSet::new();
    for (indices, node) in tree.walk() {
        assert!(seen.insert(indices.clone()), "duplicate index path {indices:?}");
        assert_eq!(tree.node_at(&indices).map(|n| n.id), Some(node.id));
    }
}

#[test]
fn test_children_unique_by_name() {
    let temp = TempDir::new().unwrap();
    touch(temp.path(), "a/x");
    touch(temp.path(), "a/y");
    touch(temp.path(), "b/x");

    let tree = CommandScanner::new()
        .scan(&ScanConfig::new(temp.path()))
        .unwrap();

    for (_, node) in tree.walk() {
        let names: HashSet<_> = node.children.iter().map(|c| c.name.clone()).collect();
        assert_eq!(names.len(), node.children.len());
    }
}

#[test]
fn test_deep_command() {
    let temp = TempDir::new().unwrap();
    touch(temp.path(), "foo.bar/baz.qux/plain/target.txt");

    let tree = CommandScanner::new()
        .scan(&ScanConfig::new(temp.path()))
        .unwrap();

    let node = tree.node_at(&[0, 0, 0, 0]).unwrap();
    assert_eq!(node.kind, NodeKind::File);
    let target = temp.path().join("foo.bar/baz.qux/plain/target.txt");
    let mut expected: Vec<String> = ["foo", "--bar", "--baz", "qux", "plain"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    expected.push(target.to_string_lossy().into_owned());
    assert_eq!(node.command.tokens(), expected.as_slice());
}

#[test]
fn test_rescan_is_deterministic() {
    let temp = TempDir::new().unwrap();
    touch(temp.path(), "z/1");
    touch(temp.path(), "a.b/2");
    touch(temp.path(), "m/n.o/3");

    let scanner = CommandScanner::new();
    let first = scanner.scan(&ScanConfig::new(temp.path())).unwrap();
    let second = scanner.scan(&ScanConfig::new(temp.path())).unwrap();

    let flatten = |tree: &dirlaunch_scan::CommandTree| {
        tree.walk()
            .map(|(idx, n)| (idx, n.path.clone(), n.command.clone()))
            .collect::<Vec<_>>()
    };
    assert_eq!(flatten(&first), flatten(&second));
}

#[test]
fn test_hidden_entries_included_by_default() {
    let temp = TempDir::new().unwrap();
    touch(temp.path(), ".x/t.txt");
    touch(temp.path(), "v");

    let tree = CommandScanner::new()
        .scan(&ScanConfig::new(temp.path()))
        .unwrap();
    assert_eq!(count_entries(temp.path()), 3);
    assert_eq!(tree.node_count(), 3);

    // A leading delimiter leaves the program name empty.
    let hidden = tree.root.child(".x").unwrap().child("t.txt").unwrap();
    let target = temp.path().join(".x/t.txt").to_string_lossy().into_owned();
    assert_eq!(hidden.command.tokens(), ["", "--x", target.as_str()]);

    let config = ScanConfig::builder()
        .root(temp.path())
        .include_hidden(false)
        .build()
        .unwrap();
    let tree = CommandScanner::new().scan(&config).unwrap();
    assert_eq!(tree.node_count(), 1);
}

#[test]
fn test_max_depth() {
    let temp = TempDir::new().unwrap();
    touch(temp.path(), "a/b/c/d");

    let config = ScanConfig::builder()
        .root(temp.path())
        .max_depth(Some(2))
        .build()
        .unwrap();
    let tree = CommandScanner::new().scan(&config).unwrap();
    assert_eq!(tree.node_count(), 2);
    assert_eq!(tree.stats.max_depth, 2);
}

#[test]
fn test_progress_is_broadcast() {
    let temp = TempDir::new().unwrap();
    touch(temp.path(), "a/b");

    let scanner = CommandScanner::new();
    let mut rx = scanner.subscribe();
    scanner.scan(&ScanConfig::new(temp.path())).unwrap();

    let mut last = None;
    while let Ok(progress) = rx.try_recv() {
        last = Some(progress);
    }
    let last = last.expect("final progress snapshot");
    assert_eq!(last.total_items(), 2);
}
