//! Hand-built trees for unit tests.

use std::path::PathBuf;
use std::time::Duration;

use dirlaunch_core::{compile, CommandTree, Node, NodeId, NodeKind, ScanConfig, TreeStats};

/// Build a tree under root `t` from `(relative path, kind)` pairs given in
/// pre-order. Parents must precede their children.
pub fn tree(entries: &[(&str, NodeKind)]) -> CommandTree {
    let mut root = Node::root(NodeId::new(0), "t");
    for (i, (relative, kind)) in entries.iter().enumerate() {
        let segments: Vec<&str> = relative.split('/').collect();
        let (name, dirs) = segments.split_last().expect("non-empty path");
        let path = PathBuf::from("t").join(relative);
        let command = compile(dirs, &path.to_string_lossy());
        let node = Node::new(NodeId::new(i as u64 + 1), *name, path, *kind, command);

        let mut parent = &mut root;
        for dir in dirs {
            parent = parent
                .children
                .iter_mut()
                .find(|c| c.name == *dir)
                .expect("parent listed first");
        }
        parent.children.push(node);
    }
    CommandTree::new(
        root,
        ScanConfig::new("t"),
        TreeStats::new(),
        Duration::ZERO,
        Vec::new(),
    )
}

/// ```text
/// t/
///   foo.bar/          [0]
///     a.txt           [0, 0]
///     baz.qux/        [0, 1]
///       deep.txt      [0, 1, 0]
///   empty/            [1]
///   run.sh            [2]
/// ```
pub fn sample() -> CommandTree {
    tree(&[
        ("foo.bar", NodeKind::Directory),
        ("foo.bar/a.txt", NodeKind::File),
        ("foo.bar/baz.qux", NodeKind::Directory),
        ("foo.bar/baz.qux/deep.txt", NodeKind::File),
        ("empty", NodeKind::Directory),
        ("run.sh", NodeKind::File),
    ])
}
