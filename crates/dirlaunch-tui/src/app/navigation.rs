//! Selection state and the transitions that move it through the tree.
//!
//! A selection is an index path from the root. Nodes carry no back-references;
//! the navigator remembers the [`NodeId`] of each directory it entered so
//! `back` can find it again among its siblings.

use std::path::Path;

use dirlaunch_core::{CommandTree, Node, NodeId, SelectionBoundsError};

/// Trait for types that support list-style navigation.
pub trait ListNavigator {
    /// Get the currently selected index.
    fn selected(&self) -> usize;

    /// Set the selected index.
    fn set_selected(&mut self, index: usize);

    /// Get the maximum valid index (item count - 1, or 0 if empty).
    fn max_index(&self) -> usize;

    /// Move selection up by count items.
    fn move_up(&mut self, count: usize) {
        let current = self.selected();
        self.set_selected(current.saturating_sub(count));
    }

    /// Move selection down by count items.
    fn move_down(&mut self, count: usize) {
        let current = self.selected();
        let max = self.max_index();
        self.set_selected((current + count).min(max));
    }
}

/// Index path from the root to the selected node. Empty addresses the root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection(Vec<usize>);

impl Selection {
    /// Selection addressing the root.
    pub fn root() -> Self {
        Self(Vec::new())
    }

    pub fn from_indices(indices: Vec<usize>) -> Self {
        Self(indices)
    }

    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    /// Number of levels below the root.
    pub fn depth(&self) -> usize {
        self.0.len()
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Index within the current level.
    pub fn last(&self) -> Option<usize> {
        self.0.last().copied()
    }

    /// Follow the index path through `tree`.
    pub fn resolve<'t>(&self, tree: &'t CommandTree) -> Result<&'t Node, SelectionBoundsError> {
        self.0
            .iter()
            .enumerate()
            .try_fold(&tree.root, |node, (depth, &index)| {
                node.children.get(index).ok_or(SelectionBoundsError {
                    depth,
                    index,
                    len: node.children.len(),
                })
            })
    }

    /// Selection of the enclosing level, or `None` at the root.
    fn parent(&self) -> Option<Selection> {
        let (_, rest) = self.0.split_last()?;
        Some(Self(rest.to_vec()))
    }
}

/// Cursor over the last level of a selection, clamped to `len` siblings.
struct LevelCursor<'a> {
    selection: &'a mut Selection,
    len: usize,
}

impl ListNavigator for LevelCursor<'_> {
    fn selected(&self) -> usize {
        self.selection.last().unwrap_or(0)
    }

    fn set_selected(&mut self, index: usize) {
        let index = index.min(self.max_index());
        if let Some(last) = self.selection.0.last_mut() {
            *last = index;
        }
    }

    fn max_index(&self) -> usize {
        self.len.saturating_sub(1)
    }
}

/// The siblings shown for the current selection.
#[derive(Debug, Clone, Copy)]
pub struct Level<'t> {
    /// Node whose children are listed, `None` at the root.
    pub parent: Option<&'t Node>,
    /// Listed entries.
    pub entries: &'t [Node],
    /// Selected position within `entries`.
    pub selected: usize,
}

/// Navigation state machine over a [`CommandTree`].
///
/// Every transition takes the tree it applies to and leaves the selection in
/// bounds for that tree.
#[derive(Debug, Clone, Default)]
pub struct Navigator {
    selection: Selection,
    /// Directories entered below the top level, outermost first.
    trail: Vec<NodeId>,
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Node addressed by the selection.
    ///
    /// Transitions keep the selection in bounds; an out-of-bounds selection
    /// asserts in debug builds and falls back to the root.
    pub fn selected<'t>(&self, tree: &'t CommandTree) -> &'t Node {
        match self.selection.resolve(tree) {
            Ok(node) => node,
            Err(err) => {
                debug_assert!(false, "{err}");
                tracing::error!(%err, "selection out of bounds");
                &tree.root
            }
        }
    }

    /// Siblings of the selected node and its position among them.
    pub fn level<'t>(&self, tree: &'t CommandTree) -> Level<'t> {
        match self.selection.parent() {
            None => Level {
                parent: None,
                entries: std::slice::from_ref(&tree.root),
                selected: 0,
            },
            Some(parent) => {
                let parent = parent.resolve(tree).unwrap_or(&tree.root);
                Level {
                    parent: Some(parent),
                    entries: &parent.children,
                    selected: self.selection.last().unwrap_or(0),
                }
            }
        }
    }

    /// Move to the previous sibling. No-op on the first sibling or at the root.
    pub fn move_up(&mut self, tree: &CommandTree) -> bool {
        self.step(tree, |cursor| cursor.move_up(1))
    }

    /// Move to the next sibling. No-op on the last sibling or at the root.
    pub fn move_down(&mut self, tree: &CommandTree) -> bool {
        self.step(tree, |cursor| cursor.move_down(1))
    }

    fn step(&mut self, tree: &CommandTree, f: impl FnOnce(&mut LevelCursor<'_>)) -> bool {
        if self.selection.is_root() {
            return false;
        }
        let len = self.level(tree).entries.len();
        let before = self.selection.last();
        f(&mut LevelCursor {
            selection: &mut self.selection,
            len,
        });
        self.selection.last() != before
    }

    /// Descend into the selected directory, selecting its first child.
    ///
    /// Files and empty directories are left alone.
    pub fn enter(&mut self, tree: &CommandTree) -> bool {
        let node = self.selected(tree);
        if !node.is_dir() || node.children.is_empty() {
            return false;
        }
        if !self.selection.is_root() {
            self.trail.push(node.id);
        }
        self.selection.0.push(0);
        true
    }

    /// Return to the enclosing level, selecting the directory just left.
    ///
    /// The directory is looked up by identity, so siblings inserted or removed
    /// ahead of it since it was entered do not shift the selection.
    pub fn back(&mut self, tree: &CommandTree) -> bool {
        let Some(mut parent) = self.selection.parent() else {
            return false;
        };
        let left = self.trail.pop();

        // The root level lists the root alone.
        if let Some(enclosing) = parent.parent() {
            let grandparent = enclosing.resolve(tree).ok();
            let position = grandparent
                .zip(left)
                .and_then(|(node, id)| node.position_of(id));
            let len = grandparent.map_or(0, Node::child_count);
            if let Some(last) = parent.0.last_mut() {
                *last = position.unwrap_or(*last).min(len.saturating_sub(1));
            }
        }

        self.selection = parent;
        true
    }

    /// Clamp every level of the selection to `tree`.
    ///
    /// Levels that no longer exist are dropped; an emptied selection selects
    /// the first top-level entry when there is one.
    pub fn revalidate(&mut self, tree: &CommandTree) {
        let mut node = &tree.root;
        let mut indices = Vec::with_capacity(self.selection.depth());
        for &index in self.selection.indices() {
            if node.children.is_empty() {
                break;
            }
            let index = index.min(node.children.len() - 1);
            indices.push(index);
            node = &node.children[index];
        }
        if indices.is_empty() && !tree.root.children.is_empty() {
            indices.push(0);
        }
        self.selection = Selection(indices);
        self.sync_trail(tree);
    }

    /// Select `path` in `tree` if it is still present, otherwise clamp.
    pub fn restore(&mut self, tree: &CommandTree, path: &Path) -> bool {
        match tree.find_path(path) {
            Some(indices) if !indices.is_empty() => {
                self.selection = Selection(indices);
                self.sync_trail(tree);
                true
            }
            _ => {
                self.revalidate(tree);
                false
            }
        }
    }

    /// Re-derive the entered directories from the selection.
    fn sync_trail(&mut self, tree: &CommandTree) {
        let indices = self.selection.indices();
        let entered = &indices[..indices.len().saturating_sub(1)];
        self.trail.clear();
        let mut node = &tree.root;
        for &index in entered {
            let Some(child) = node.children.get(index) else {
                break;
            };
            self.trail.push(child.id);
            node = child;
        }
    }
}
