//! Incremental tree construction from walked entries.

use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};

use compact_str::CompactString;

use dirlaunch_core::{compile, Node, NodeId, NodeKind};

/// Inserts walked entries into a node tree, compiling commands as nodes are
/// created.
///
/// Lookups go through a `(parent, name)` index so insertion stays linear in
/// the number of entries. The index lives only as long as the builder.
pub(crate) struct TreeBuilder {
    root: Node,
    root_path: PathBuf,
    index: HashMap<(NodeId, CompactString), usize>,
    next_id: u64,
}

/// Result of inserting one entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Inserted {
    /// A new node was created for the entry.
    Created,
    /// The entry was already present (e.g. synthesized as an ancestor).
    Existing,
    /// The path had no usable segments.
    Skipped,
}

impl TreeBuilder {
    pub(crate) fn new(root_path: &Path) -> Self {
        Self {
            root: Node::root(NodeId::new(0), root_path),
            root_path: root_path.to_path_buf(),
            index: HashMap::new(),
            next_id: 1,
        }
    }

    /// Insert an entry given its path relative to the root.
    ///
    /// Missing ancestors are created as directories. Siblings keep the
    /// order in which they were first seen.
    pub(crate) fn insert(&mut self, relative: &Path, kind: NodeKind) -> Inserted {
        let segments: Vec<String> = relative
            .components()
            .filter_map(|c| match c {
                Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect();
        if segments.is_empty() {
            return Inserted::Skipped;
        }

        let last = segments.len() - 1;
        let mut node = &mut self.root;
        let mut path = self.root_path.clone();
        let mut outcome = Inserted::Existing;

        for (depth, segment) in segments.iter().enumerate() {
            path.push(segment);
            let key = (node.id, CompactString::from(segment.as_str()));

            let position = match self.index.get(&key) {
                Some(&position) => {
                    if depth == last {
                        node.children[position].kind = kind;
                    }
                    position
                }
                None => {
                    let node_kind = if depth == last { kind } else { NodeKind::Directory };
                    let command = compile(&segments[..depth], &path.to_string_lossy());
                    let id = NodeId::new(self.next_id);
                    self.next_id += 1;

                    node.children
                        .push(Node::new(id, segment.as_str(), path.clone(), node_kind, command));
                    let position = node.children.len() - 1;
                    self.index.insert(key, position);
                    if depth == last {
                        outcome = Inserted::Created;
                    }
                    position
                }
            };

            node = &mut node.children[position];
        }

        outcome
    }

    /// Finish construction, dropping the lookup index.
    pub(crate) fn finish(self) -> Node {
        self.root
    }
}
