//! The current level: a read model of what is on screen and the list widget
//! that draws it.

use std::path::Path;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, StatefulWidget, Widget};

use dirlaunch_core::{CommandLine, CommandTree, NodeKind};

use crate::app::navigation::Navigator;
use crate::theme::Theme;

/// One listed entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelEntry<'t> {
    pub name: &'t str,
    pub kind: NodeKind,
    pub child_count: usize,
}

/// Everything the screen shows about the navigation state.
#[derive(Debug, Clone)]
pub struct LevelView<'t> {
    /// Scan root as configured.
    pub root: &'t Path,
    /// Names of the directories enclosing the current level.
    pub breadcrumb: Vec<&'t str>,
    pub entries: Vec<LevelEntry<'t>>,
    pub selected: usize,
    /// Command that launching the selection would run. `None` for directories.
    pub command: Option<&'t CommandLine>,
    pub hold_progress: Option<f64>,
}

impl<'t> LevelView<'t> {
    pub fn build(tree: &'t CommandTree, navigator: &Navigator, hold_progress: Option<f64>) -> Self {
        let level = navigator.level(tree);
        let selection = navigator.selection().indices();

        let mut breadcrumb = Vec::with_capacity(selection.len());
        let mut node = &tree.root;
        for &index in selection.iter().take(selection.len().saturating_sub(1)) {
            let Some(child) = node.children.get(index) else {
                break;
            };
            breadcrumb.push(child.name.as_str());
            node = child;
        }

        let entries = level
            .entries
            .iter()
            .map(|n| LevelEntry {
                name: n.name.as_str(),
                kind: n.kind,
                child_count: n.child_count(),
            })
            .collect();

        let selected = navigator.selected(tree);
        let command = (!selected.is_dir() && !selected.command.is_empty()).then_some(&selected.command);

        Self {
            root: &tree.root_path,
            breadcrumb,
            entries,
            selected: level.selected,
            command,
            hold_progress,
        }
    }

    /// Breadcrumb joined under the root, e.g. `testpath/foo.bar/baz.qux`.
    pub fn location(&self) -> String {
        let mut location = self.root.display().to_string();
        for name in &self.breadcrumb {
            location.push('/');
            location.push_str(name);
        }
        location
    }
}

/// Scroll state for the level list.
#[derive(Debug, Default, Clone)]
pub struct LevelState {
    pub offset: usize,
}

impl LevelState {
    /// Ensure `selected` is visible, adjusting offset if needed.
    pub fn ensure_visible(&mut self, selected: usize, viewport_height: usize) {
        if selected < self.offset {
            self.offset = selected;
        } else if selected >= self.offset + viewport_height {
            self.offset = selected + 1 - viewport_height;
        }
    }
}

/// List of the entries in the current level.
pub struct LevelList<'a> {
    view: &'a LevelView<'a>,
    theme: &'a Theme,
    block: Option<Block<'a>>,
}

impl<'a> LevelList<'a> {
    pub fn new(view: &'a LevelView<'a>, theme: &'a Theme) -> Self {
        Self {
            view,
            theme,
            block: None,
        }
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    fn entry_style(&self, kind: NodeKind) -> Style {
        match kind {
            NodeKind::Directory => self.theme.directory,
            NodeKind::File => self.theme.file,
            NodeKind::Symlink => self.theme.symlink,
            NodeKind::Other => Style::default().fg(self.theme.muted),
        }
    }
}

impl StatefulWidget for LevelList<'_> {
    type State = LevelState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let inner_area = if let Some(block) = &self.block {
            let inner = block.inner(area);
            block.clone().render(area, buf);
            inner
        } else {
            area
        };

        if inner_area.height == 0 || inner_area.width == 0 {
            return;
        }

        let viewport_height = inner_area.height as usize;
        state.ensure_visible(self.view.selected, viewport_height);

        let entries = &self.view.entries;
        let start = state.offset.min(entries.len());
        let end = (start + viewport_height).min(entries.len());

        for (row, index) in (start..end).enumerate() {
            let entry = &entries[index];
            let is_selected = index == self.view.selected;

            let marker = if is_selected { "› " } else { "  " };
            let suffix = if entry.kind.is_dir() { "/" } else { "" };
            let detail = match entry.kind {
                NodeKind::Directory => format!("{} ", entry.child_count),
                NodeKind::Symlink => "link ".to_string(),
                _ => String::new(),
            };

            let name_width = (inner_area.width as usize)
                .saturating_sub(marker.chars().count() + detail.chars().count());
            let name = truncate(&format!("{}{suffix}", entry.name), name_width);
            let padding = name_width.saturating_sub(name.chars().count());

            let line = Line::from(vec![
                Span::styled(marker, Style::default().fg(self.theme.muted)),
                Span::styled(name, self.entry_style(entry.kind)),
                Span::raw(" ".repeat(padding)),
                Span::styled(detail, Style::default().fg(self.theme.muted)),
            ]);
            let line = if is_selected {
                line.style(self.theme.selected)
            } else {
                line
            };

            let line_area = Rect::new(inner_area.x, inner_area.y + row as u16, inner_area.width, 1);
            Widget::render(line, line_area, buf);
        }
    }
}

/// Truncate to `max` characters, marking the cut with an ellipsis.
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut out: String = s.chars().take(max - 1).collect();
    out.push('…');
    out
}
