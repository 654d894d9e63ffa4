//! Status bar widget
//!
//! Active field, record count, and a spinner while any remote call is out.

use agri_app::AppState;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use super::spinner;
use crate::theme::{palette, styles};

/// Status bar widget showing application state
pub struct StatusBar<'a> {
    state: &'a AppState,
}

impl<'a> StatusBar<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    fn active_field(&self) -> Span<'static> {
        match self.state.field_store.active_field() {
            Some(field) => Span::styled(format!("● {}", field.field_name), styles::accent()),
            None => Span::styled("○ No active field", styles::text_muted()),
        }
    }

    fn field_count(&self) -> Span<'static> {
        let total = self.state.field_store.fields().len();
        let label = if total == 1 { "field" } else { "fields" };
        Span::styled(format!("{total} {label}"), styles::text_secondary())
    }

    fn activity(&self) -> Option<Span<'static>> {
        self.state.has_pending_requests().then(|| {
            Span::styled(
                format!("{} Working", spinner(self.state.tick)),
                styles::status_yellow(),
            )
        })
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let separator = || Span::styled(" │ ", styles::text_muted());

        let mut spans = vec![Span::raw(" "), self.active_field(), separator(), self.field_count()];
        if let Some(activity) = self.activity() {
            spans.push(separator());
            spans.push(activity);
        }

        Paragraph::new(Line::from(spans))
            .style(Style::default().bg(palette::CARD_BG))
            .render(area, buf);
    }
}
