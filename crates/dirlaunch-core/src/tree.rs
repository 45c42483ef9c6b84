//! Command tree container and statistics.

use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use serde::{Deserialize, Serialize};

use crate::config::ScanConfig;
use crate::error::ScanWarning;
use crate::node::{Node, NodeId};

/// Summary statistics for a scanned tree.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TreeStats {
    /// Total number of files.
    pub total_files: u64,
    /// Total number of directories (root excluded).
    pub total_dirs: u64,
    /// Total number of symbolic links.
    pub total_symlinks: u64,
    /// Maximum depth reached.
    pub max_depth: u32,
}

impl TreeStats {
    /// Create new empty stats.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a file.
    pub fn record_file(&mut self, depth: u32) {
        self.total_files += 1;
        self.max_depth = self.max_depth.max(depth);
    }

    /// Record a directory.
    pub fn record_dir(&mut self, depth: u32) {
        self.total_dirs += 1;
        self.max_depth = self.max_depth.max(depth);
    }

    /// Record a symlink.
    pub fn record_symlink(&mut self, depth: u32) {
        self.total_symlinks += 1;
        self.max_depth = self.max_depth.max(depth);
    }
}

/// Scanned tree of launchable entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandTree {
    /// Root node of the tree.
    pub root: Node,

    /// Root path that was scanned, as configured.
    pub root_path: PathBuf,

    /// When this scan was performed.
    pub scanned_at: SystemTime,

    /// Duration of the scan.
    pub scan_duration: Duration,

    /// Scan configuration used.
    pub config: ScanConfig,

    /// Summary statistics.
    pub stats: TreeStats,

    /// Warnings encountered during scan.
    pub warnings: Vec<ScanWarning>,
}

impl CommandTree {
    /// Create a new command tree.
    pub fn new(
        root: Node,
        config: ScanConfig,
        stats: TreeStats,
        scan_duration: Duration,
        warnings: Vec<ScanWarning>,
    ) -> Self {
        Self {
            root_path: root.path.clone(),
            root,
            scanned_at: SystemTime::now(),
            scan_duration,
            config,
            stats,
            warnings,
        }
    }

    /// A tree holding only the root, used when the root cannot be scanned.
    pub fn empty(config: ScanConfig) -> Self {
        let root = Node::root(NodeId::new(0), config.root.clone());
        Self::new(root, config, TreeStats::new(), Duration::ZERO, Vec::new())
    }

    /// Number of nodes excluding the root.
    pub fn node_count(&self) -> usize {
        self.root.descendant_count()
    }

    /// Check if there were any warnings during scanning.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Follow an index path from the root.
    pub fn node_at(&self, indices: &[usize]) -> Option<&Node> {
        indices
            .iter()
            .try_fold(&self.root, |node, &i| node.children.get(i))
    }

    /// Index path of the node at `path`, if present.
    pub fn find_path(&self, path: &Path) -> Option<Vec<usize>> {
        let relative = path.strip_prefix(&self.root_path).ok()?;
        let mut node = &self.root;
        let mut indices = Vec::new();
        for component in relative.components() {
            let name = component.as_os_str().to_string_lossy();
            let index = node.children.iter().position(|c| c.name == name.as_ref())?;
            indices.push(index);
            node = &node.children[index];
        }
        Some(indices)
    }

    /// Pre-order iteration over non-root nodes with their index paths.
    pub fn walk(&self) -> Walk<'_> {
        let mut stack = Vec::new();
        for (i, child) in self.root.children.iter().enumerate().rev() {
            stack.push((vec![i], child));
        }
        Walk { stack }
    }
}

/// Iterator returned by [`CommandTree::walk`].
pub struct Walk<'a> {
    stack: Vec<(Vec<usize>, &'a Node)>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = (Vec<usize>, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        let (indices, node) = self.stack.pop()?;
        for (i, child) in node.children.iter().enumerate().rev() {
            let mut child_indices = indices.clone();
            child_indices.push(i);
            self.stack.push((child_indices, child));
        }
        Some((indices, node))
    }
}
