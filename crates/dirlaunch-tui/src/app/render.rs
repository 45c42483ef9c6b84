//! Application rendering.

use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, StatefulWidget, Widget};

use dirlaunch_core::CommandTree;
use dirlaunch_scan::ScanProgress;

use crate::event::FOOTER_BINDINGS;
use crate::theme::Theme;
use crate::ui::{format_scan_time, AppLayout, HoldBar, LevelList, LevelState, LevelView};

use super::state::{StatusLevel, StatusMessage};

/// Render context containing all the state needed for rendering.
pub struct RenderContext<'a> {
    pub theme: &'a Theme,
    pub tree: &'a CommandTree,
    pub view: &'a LevelView<'a>,
    /// Set while a rescan is running.
    pub scan_progress: Option<&'a ScanProgress>,
    pub status: Option<&'a StatusMessage>,
}

/// Main render function for the application.
pub fn render_app(ctx: &RenderContext, area: Rect, buf: &mut Buffer, list_state: &mut LevelState) {
    let base_style = Style::default()
        .bg(ctx.theme.background)
        .fg(ctx.theme.foreground);
    buf.set_style(area, base_style);

    let layout = AppLayout::new(area);

    render_header(ctx, layout.header, buf);
    render_level(ctx, layout.main, buf, list_state);
    render_command(ctx, layout.command, buf);
    render_footer(ctx, layout.footer, buf);
}

fn render_header(ctx: &RenderContext, area: Rect, buf: &mut Buffer) {
    let title = Span::styled(" dirlaunch ", ctx.theme.title.add_modifier(Modifier::BOLD));
    let location = Span::styled(format!(" {} ", ctx.view.location()), ctx.theme.header);

    let stats = match ctx.scan_progress {
        Some(progress) => Span::styled(
            format!(" rescanning… {} entries ", progress.total_items()),
            Style::default().fg(ctx.theme.warning),
        ),
        None => Span::styled(
            format!(
                " {} files, {} dirs · scanned {} ",
                ctx.tree.stats.total_files,
                ctx.tree.stats.total_dirs,
                format_scan_time(ctx.tree.scanned_at)
            ),
            ctx.theme.header,
        ),
    };

    let [left, right] = Layout::horizontal([
        Constraint::Min(10),
        Constraint::Length(stats.width() as u16),
    ])
    .areas(area);

    Paragraph::new(Line::from(vec![title, location]))
        .style(ctx.theme.header)
        .render(left, buf);
    Paragraph::new(Line::from(stats))
        .style(ctx.theme.header)
        .render(right, buf);
}

fn render_level(ctx: &RenderContext, area: Rect, buf: &mut Buffer, list_state: &mut LevelState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(ctx.theme.border);

    if ctx.tree.root.children.is_empty() {
        let inner = block.inner(area);
        block.render(area, buf);

        let mut lines = vec![
            Line::raw(""),
            Line::styled(
                format!("  Nothing to launch under {}", ctx.tree.root_path.display()),
                Style::default().fg(ctx.theme.muted),
            ),
        ];
        if let Some(warning) = ctx.tree.warnings.first() {
            lines.push(Line::styled(
                format!("  {}", warning.message),
                Style::default().fg(ctx.theme.warning),
            ));
        }
        Paragraph::new(lines).render(inner, buf);
        return;
    }

    let title = match ctx.tree.warnings.len() {
        0 => format!(" {} ", ctx.view.entries.len()),
        n => format!(" {} · {n} unreadable ", ctx.view.entries.len()),
    };
    let block = block.title(title).title_style(ctx.theme.title);

    LevelList::new(ctx.view, ctx.theme)
        .block(block)
        .render(area, buf, list_state);
}

fn render_command(ctx: &RenderContext, area: Rect, buf: &mut Buffer) {
    let line = match ctx.view.command {
        Some(command) => Line::from(vec![
            Span::styled(" $ ", Style::default().fg(ctx.theme.muted)),
            Span::styled(command.to_string(), ctx.theme.command),
        ]),
        None => {
            let hint = ctx
                .view
                .entries
                .get(ctx.view.selected)
                .filter(|entry| entry.kind.is_dir())
                .map(|entry| match entry.child_count {
                    0 => format!(" {}/ is empty", entry.name),
                    n => format!(" ⏎ opens {}/ ({n} entries)", entry.name),
                })
                .unwrap_or_default();
            Line::styled(hint, Style::default().fg(ctx.theme.muted))
        }
    };

    Paragraph::new(line).render(area, buf);
}

fn render_footer(ctx: &RenderContext, area: Rect, buf: &mut Buffer) {
    if let Some(progress) = ctx.view.hold_progress {
        let label = " Hold to exit ";
        let [label_area, bar_area] =
            Layout::horizontal([Constraint::Length(label.len() as u16), Constraint::Min(1)])
                .areas(area);

        Paragraph::new(Span::styled(label, ctx.theme.help_key))
            .style(ctx.theme.footer)
            .render(label_area, buf);
        HoldBar::new(progress)
            .filled_style(ctx.theme.hold_bar)
            .empty_style(ctx.theme.hold_bg)
            .render(bar_area, buf);
        return;
    }

    let mut spans: Vec<Span> = FOOTER_BINDINGS
        .iter()
        .flat_map(|(key, desc)| {
            vec![
                Span::styled(format!(" {key} "), ctx.theme.help_key),
                Span::styled(format!("{desc} "), ctx.theme.help_desc),
            ]
        })
        .collect();

    if let Some(status) = ctx.status {
        let color = match status.level {
            StatusLevel::Info => ctx.theme.foreground,
            StatusLevel::Success => ctx.theme.success,
            StatusLevel::Warning => ctx.theme.warning,
            StatusLevel::Error => ctx.theme.error,
        };
        spans.push(Span::styled(
            format!(" │ {}", status.text),
            Style::default().fg(color),
        ));
    }

    Paragraph::new(Line::from(spans))
        .style(ctx.theme.footer)
        .render(area, buf);
}
