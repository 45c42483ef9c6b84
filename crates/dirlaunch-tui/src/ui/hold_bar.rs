//! Gauge showing how far the hold-to-exit gesture has progressed.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Widget;

/// A horizontal bar filled in proportion to the hold progress.
pub struct HoldBar {
    /// Value to display (0.0 - 1.0).
    ratio: f64,
    filled_style: Style,
    empty_style: Style,
}

impl HoldBar {
    pub fn new(ratio: f64) -> Self {
        Self {
            ratio: ratio.clamp(0.0, 1.0),
            filled_style: Style::default(),
            empty_style: Style::default(),
        }
    }

    pub fn filled_style(mut self, style: Style) -> Self {
        self.filled_style = style;
        self
    }

    pub fn empty_style(mut self, style: Style) -> Self {
        self.empty_style = style;
        self
    }
}

impl Widget for HoldBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let filled_width = (area.width as f64 * self.ratio).round() as u16;

        for x in 0..area.width {
            let (symbol, style) = if x < filled_width {
                ('█', self.filled_style)
            } else {
                ('░', self.empty_style)
            };

            buf[(area.x + x, area.y)].set_char(symbol).set_style(style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(ratio: f64) -> String {
        let area = Rect::new(0, 0, 10, 1);
        let mut buf = Buffer::empty(area);
        HoldBar::new(ratio).render(area, &mut buf);
        (0..10).map(|x| buf[(x, 0)].symbol().to_string()).collect()
    }

    #[test]
    fn test_hold_bar_fill() {
        assert_eq!(rendered(0.0), "░".repeat(10));
        assert_eq!(rendered(0.5), format!("{}{}", "█".repeat(5), "░".repeat(5)));
        assert_eq!(rendered(1.0), "█".repeat(10));
    }

    #[test]
    fn test_hold_bar_clamps() {
        assert_eq!(rendered(7.0), "█".repeat(10));
        assert_eq!(rendered(-1.0), "░".repeat(10));
    }
}
