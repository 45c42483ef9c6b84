use dirlaunch_core::{
    compile, CommandLine, CommandTree, LaunchError, Node, NodeId, NodeKind, ScanConfig,
    ScanWarning, TreeStats, WarningKind,
};
use std::path::Path;
use std::time::Duration;

/// Build a tree by hand the way the scanner would, compiling each command
/// from the parent segments.
fn build(root: &str, entries: &[(&str, NodeKind)]) -> CommandTree {
    let mut root_node = Node::root(NodeId::new(0), root);
    let mut next_id = 1;
    for (relative, kind) in entries {
        let segments: Vec<&str> = relative.split('/').collect();
        let (name, parents) = segments.split_last().unwrap();
        let mut node = &mut root_node;
        for parent in parents {
            let index = node.children.iter().position(|c| c.name == *parent).unwrap();
            node = &mut node.children[index];
        }
        let path = format!("{root}/{relative}");
        let command = compile(parents, &path);
        node.children
            .push(Node::new(NodeId::new(next_id), *name, path, *kind, command));
        next_id += 1;
    }
    CommandTree::new(
        root_node,
        ScanConfig::new(root),
        TreeStats::new(),
        Duration::ZERO,
        Vec::new(),
    )
}

#[test]
fn test_compiled_commands_follow_segments() {
    let tree = build(
        "testpath",
        &[
            ("foo.bar", NodeKind::Directory),
            ("foo.bar/target.txt", NodeKind::File),
            ("foo.bar/baz.qux", NodeKind::Directory),
            ("foo.bar/baz.qux/deep.txt", NodeKind::File),
        ],
    );

    let target = tree.node_at(&[0, 0]).unwrap();
    assert_eq!(
        target.command.tokens(),
        ["foo", "--bar", "testpath/foo.bar/target.txt"]
    );

    let deep = tree.node_at(&[0, 1, 0]).unwrap();
    assert_eq!(
        deep.command.tokens(),
        ["foo", "--bar", "--baz", "qux", "testpath/foo.bar/baz.qux/deep.txt"]
    );
}

#[test]
fn test_command_is_function_of_path() {
    let tree = build(
        "t",
        &[
            ("vim", NodeKind::Directory),
            ("vim/notes.md", NodeKind::File),
        ],
    );
    for (_, node) in tree.walk() {
        let relative = node.path.strip_prefix(&tree.root_path).unwrap();
        let segments: Vec<String> = relative
            .parent()
            .unwrap()
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        assert_eq!(node.command, compile(&segments, &node.path_str()));
    }
}

#[test]
fn test_every_node_has_unique_index_path() {
    let tree = build(
        "t",
        &[
            ("a", NodeKind::Directory),
            ("a/b", NodeKind::Directory),
            ("a/b/c.txt", NodeKind::File),
            ("a/d.txt", NodeKind::File),
            ("e.sh", NodeKind::File),
        ],
    );

    let paths: Vec<Vec<usize>> = tree.walk().map(|(idx, _)| idx).collect();
    assert_eq!(paths.len(), 5);
    assert_eq!(tree.node_count(), 5);
    for (i, a) in paths.iter().enumerate() {
        for b in &paths[i + 1..] {
            assert_ne!(a, b);
        }
        let node = tree.node_at(a).unwrap();
        assert_eq!(tree.find_path(&node.path).as_ref(), Some(a));
    }
}

#[test]
fn test_root_entry_runs_itself() {
    let tree = build("t", &[("hello.sh", NodeKind::File)]);
    let node = tree.node_at(&[0]).unwrap();
    assert_eq!(node.command.program(), Some("t/hello.sh"));
    assert!(node.command.args().is_empty());
    assert!(tree.root.command.is_empty());
}

#[test]
fn test_short_flag_retry_form() {
    let cmd = compile(&["foo.bar", "plain", "baz.qux"], "t/x");
    let retry = cmd.with_short_flags();
    assert_eq!(retry.tokens(), ["foo", "-bar", "plain", "-baz", "qux", "t/x"]);
    assert_eq!(retry.program(), cmd.program());
    assert_eq!(retry.len(), cmd.len());
}

#[test]
fn test_command_line_accessors() {
    let cmd = CommandLine::new(vec!["ls".into(), "-l".into()]);
    assert_eq!(cmd.program(), Some("ls"));
    assert_eq!(cmd.args(), ["-l"]);
    assert!(!cmd.is_empty());
    assert_eq!(CommandLine::empty().program(), None);
    assert!(CommandLine::empty().args().is_empty());
}

#[test]
fn test_scan_config_defaults() {
    let config = ScanConfig::default();
    assert_eq!(config.root, Path::new("testpath"));
    assert!(config.include_hidden);
    assert!(config.sort);
    assert!(config.max_depth.is_none());
}

#[test]
fn test_scan_config_serde_defaults() {
    let config: ScanConfig = serde_json::from_str(r#"{"max_depth": 2}"#).unwrap();
    assert_eq!(config.root, Path::new("testpath"));
    assert_eq!(config.max_depth, Some(2));
    assert!(config.include_hidden);
    assert!(config.sort);
}

#[test]
fn test_warning_kinds() {
    let warning = ScanWarning::new("/a", "bad", WarningKind::ReadError);
    assert_eq!(warning.kind, WarningKind::ReadError);
    assert_eq!(warning.message, "bad");
}

#[test]
fn test_launch_error_source_chain() {
    use std::error::Error;
    let err = LaunchError::Spawn {
        program: "nope".into(),
        source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
    };
    assert!(err.source().is_some());
    assert!(err.to_string().contains("nope"));
}
