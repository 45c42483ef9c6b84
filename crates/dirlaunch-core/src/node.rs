//! Tree node types.

use std::path::PathBuf;

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

use crate::command::CommandLine;

/// Unique identifier for a node within a tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u64);

impl NodeId {
    /// Create a new NodeId from a u64.
    pub fn new(id: u64) -> Self {
        Self(id)
    }
}

/// Type of file system entry a node mirrors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeKind {
    /// Regular file.
    File,
    /// Directory.
    Directory,
    /// Symbolic link (not followed).
    Symlink,
    /// Other file types (sockets, devices, etc.).
    Other,
}

impl NodeKind {
    /// Check if this is a directory.
    pub fn is_dir(&self) -> bool {
        matches!(self, NodeKind::Directory)
    }

    /// Check if this is a regular file.
    pub fn is_file(&self) -> bool {
        matches!(self, NodeKind::File)
    }

    /// Check if this is a symlink.
    pub fn is_symlink(&self) -> bool {
        matches!(self, NodeKind::Symlink)
    }
}

/// A single entry in the mirrored tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    /// Identifier, unique within the tree.
    pub id: NodeId,

    /// Entry name (final path segment).
    pub name: CompactString,

    /// Full path, the configured root joined with the relative segments.
    pub path: PathBuf,

    /// Entry type.
    pub kind: NodeKind,

    /// Precompiled invocation. Empty for the root.
    pub command: CommandLine,

    /// Children in walk encounter order (directories only).
    pub children: Vec<Node>,
}

impl Node {
    /// Create the root node of a tree.
    pub fn root(id: NodeId, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());
        Self {
            id,
            name: name.into(),
            path,
            kind: NodeKind::Directory,
            command: CommandLine::empty(),
            children: Vec::new(),
        }
    }

    /// Create a non-root node.
    pub fn new(
        id: NodeId,
        name: impl Into<CompactString>,
        path: impl Into<PathBuf>,
        kind: NodeKind,
        command: CommandLine,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            path: path.into(),
            kind,
            command,
            children: Vec::new(),
        }
    }

    /// Check if this node is a directory.
    pub fn is_dir(&self) -> bool {
        self.kind.is_dir()
    }

    /// Check if this node is a file.
    pub fn is_file(&self) -> bool {
        self.kind.is_file()
    }

    /// Get the number of direct children.
    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Find a direct child by name.
    pub fn child(&self, name: &str) -> Option<&Node> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Position of a direct child by identity.
    pub fn position_of(&self, id: NodeId) -> Option<usize> {
        self.children.iter().position(|c| c.id == id)
    }

    /// Full path as a string for display and argv building.
    pub fn path_str(&self) -> std::borrow::Cow<'_, str> {
        self.path.to_string_lossy()
    }

    /// Number of nodes below this one.
    pub fn descendant_count(&self) -> usize {
        self.children
            .iter()
            .map(|c| 1 + c.descendant_count())
            .sum()
    }
}
