//! Header bar widget
//!
//! Shows the app title, the two screen tabs, and the keybindings of the
//! current screen.

use agri_app::Screen;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::theme::{palette, styles};

/// Main header showing app title, screen tabs, and keybindings
pub struct MainHeader {
    screen: Screen,
}

impl MainHeader {
    pub fn new(screen: Screen) -> Self {
        Self { screen }
    }

    fn tab(&self, key: &'static str, screen: Screen) -> Vec<Span<'static>> {
        let style = if self.screen == screen {
            styles::focused_selected()
        } else {
            styles::text_secondary()
        };
        vec![
            Span::styled(key, styles::keybinding()),
            Span::styled(format!(" {} ", screen.title()), style),
            Span::raw("  "),
        ]
    }

    fn shortcuts(&self) -> &'static [(&'static str, &'static str)] {
        match self.screen {
            Screen::Predict => &[
                ("Tab", "Next"),
                ("←/→", "Choose"),
                ("Enter", "Predict"),
                ("^R", "Reset"),
            ],
            Screen::Fields => &[
                ("n", "New"),
                ("e", "Edit"),
                ("d", "Delete"),
                ("a", "Active"),
                ("r", "Refresh"),
                ("h", "Archived"),
            ],
        }
    }
}

impl Widget for MainHeader {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::glass_block(false).style(Style::default().bg(palette::CARD_BG));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let mut spans = vec![Span::styled(" AgriDesk ", styles::accent_bold()), Span::raw(" ")];
        spans.extend(self.tab("F1", Screen::Predict));
        spans.extend(self.tab("F2", Screen::Fields));

        let left_width: usize = spans.iter().map(|s| s.width()).sum();

        let mut hints = Vec::new();
        for (key, label) in self.shortcuts() {
            hints.push(Span::styled(format!("[{key}]"), styles::keybinding()));
            hints.push(Span::styled(format!(" {label} "), styles::text_muted()));
        }
        let hints_width: usize = hints.iter().map(|s| s.width()).sum();

        // Hints only when they fit next to the tabs
        if left_width + hints_width < inner.width as usize {
            let gap = inner.width as usize - left_width - hints_width;
            spans.push(Span::raw(" ".repeat(gap)));
            spans.extend(hints);
        }

        Paragraph::new(Line::from(spans)).render(inner, buf);
    }
}
