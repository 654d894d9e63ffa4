//! Field list widget
//!
//! Table of field records with the cursor row highlighted and the active
//! field marked. A store error is shown as a banner above the table.

use agri_core::{Field, FieldId, FieldStatus};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, StatefulWidget, Table, TableState, Widget},
};

use super::spinner;
use crate::theme::{palette, styles};

pub struct FieldList<'a> {
    fields: Vec<&'a Field>,
    selected: usize,
    active: Option<&'a FieldId>,
    loading: bool,
    error: Option<&'a str>,
    show_archived: bool,
    tick: u64,
}

impl<'a> FieldList<'a> {
    pub fn new(fields: Vec<&'a Field>, selected: usize) -> Self {
        Self {
            fields,
            selected,
            active: None,
            loading: false,
            error: None,
            show_archived: false,
            tick: 0,
        }
    }

    pub fn active(mut self, active: Option<&'a FieldId>) -> Self {
        self.active = active;
        self
    }

    pub fn loading(mut self, loading: bool, tick: u64) -> Self {
        self.loading = loading;
        self.tick = tick;
        self
    }

    pub fn error(mut self, error: Option<&'a str>) -> Self {
        self.error = error;
        self
    }

    pub fn show_archived(mut self, show_archived: bool) -> Self {
        self.show_archived = show_archived;
        self
    }

    fn title(&self) -> Line<'static> {
        let mut spans = vec![Span::styled(
            format!(" Fields ({}) ", self.fields.len()),
            styles::text_bright(),
        )];
        if self.show_archived {
            spans.push(Span::styled("incl. archived ", styles::text_muted()));
        }
        if self.loading {
            spans.push(Span::styled(
                format!("{} ", spinner(self.tick)),
                styles::status_yellow(),
            ));
        }
        Line::from(spans)
    }

    fn status_style(status: FieldStatus) -> Style {
        match status {
            FieldStatus::Active => styles::status_green(),
            FieldStatus::Inactive => styles::status_yellow(),
            FieldStatus::Archived => styles::text_muted(),
        }
    }

    fn row(&self, field: &Field) -> Row<'static> {
        let is_active = self.active == Some(&field.id);
        let marker = if is_active { "●" } else { " " };
        let planted = field
            .planting_date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default();

        let row = Row::new(vec![
            Cell::from(Span::styled(marker, styles::accent())),
            Cell::from(field.field_name.clone()),
            Cell::from(field.crop.clone().unwrap_or_default()),
            Cell::from(field.area_display()),
            Cell::from(field.soil_type.label()),
            Cell::from(Span::styled(
                field.status.label(),
                Self::status_style(field.status),
            )),
            Cell::from(planted),
        ]);

        if field.is_archived() {
            row.style(styles::text_muted())
        } else {
            row.style(styles::text_primary())
        }
    }

    fn render_banner(&self, area: Rect, buf: &mut Buffer) {
        if let Some(error) = self.error {
            Paragraph::new(Line::from(vec![
                Span::styled(" ✗ ", styles::status_red().add_modifier(Modifier::BOLD)),
                Span::styled(error.to_string(), styles::status_red()),
                Span::styled("  [x] dismiss", styles::text_muted()),
            ]))
            .render(area, buf);
        }
    }

    fn render_empty(&self, area: Rect, buf: &mut Buffer) {
        let message = if self.loading {
            "Loading fields..."
        } else {
            "No fields yet. Press n to add one."
        };
        Paragraph::new(Line::from(Span::styled(message, styles::text_muted())))
            .centered()
            .render(area, buf);
    }
}

impl Widget for FieldList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::glass_block(true)
            .title(self.title())
            .style(Style::default().bg(palette::CARD_BG));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let banner_height = u16::from(self.error.is_some());
        let [banner, body] =
            Layout::vertical([Constraint::Length(banner_height), Constraint::Min(0)]).areas(inner);

        self.render_banner(banner, buf);

        if self.fields.is_empty() {
            self.render_empty(body, buf);
            return;
        }

        let header = Row::new(["", "Name", "Crop", "Area", "Soil", "Status", "Planted"])
            .style(styles::text_secondary().add_modifier(Modifier::BOLD));
        let rows: Vec<Row> = self.fields.iter().map(|f| self.row(f)).collect();
        let table = Table::new(
            rows,
            [
                Constraint::Length(1),
                Constraint::Fill(3),
                Constraint::Fill(2),
                Constraint::Length(16),
                Constraint::Length(7),
                Constraint::Length(9),
                Constraint::Length(10),
            ],
        )
        .header(header)
        .row_highlight_style(styles::focused_selected());

        let mut state = TableState::default().with_selected(Some(self.selected));
        StatefulWidget::render(table, body, buf, &mut state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestTerminal;
    use agri_client::test_utils::test_field;

    #[test]
    fn test_lists_fields_with_active_marker() {
        let a = test_field("a", "North Plot");
        let b = test_field("b", "River Bend");
        let active = FieldId::new("b");

        let mut term = TestTerminal::with_size(100, 10);
        term.render_widget(
            FieldList::new(vec![&a, &b], 0).active(Some(&active)),
            term.area(),
        );

        assert!(term.buffer_contains("North Plot"));
        assert!(term.buffer_contains("River Bend"));
        assert!(term.buffer_contains("10 acres"));
        assert!(term.buffer_contains("Fields (2)"));
        assert!(term.buffer_contains("●"));
    }

    #[test]
    fn test_empty_list_hint() {
        let mut term = TestTerminal::with_size(80, 8);
        term.render_widget(FieldList::new(vec![], 0), term.area());
        assert!(term.buffer_contains("No fields yet"));
    }

    #[test]
    fn test_loading_empty_list() {
        let mut term = TestTerminal::with_size(80, 8);
        term.render_widget(FieldList::new(vec![], 0).loading(true, 0), term.area());
        assert!(term.buffer_contains("Loading fields..."));
    }

    #[test]
    fn test_error_banner() {
        let a = test_field("a", "North Plot");
        let mut term = TestTerminal::with_size(80, 8);
        term.render_widget(
            FieldList::new(vec![&a], 0).error(Some("Store unreachable")),
            term.area(),
        );

        assert!(term.buffer_contains("Store unreachable"));
        assert!(term.buffer_contains("North Plot"));
    }
}
