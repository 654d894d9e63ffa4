//! Create/edit field dialog

use agri_app::field_manager::FieldDialog;
use agri_core::DraftField;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use super::modal_overlay;
use crate::theme::styles;

const DIALOG_WIDTH: u16 = 64;
const LABEL_WIDTH: usize = 18;

/// Inputs whose value must be given
const REQUIRED: [DraftField; 4] = [
    DraftField::FieldName,
    DraftField::Area,
    DraftField::Latitude,
    DraftField::Longitude,
];

pub struct FieldDialogView<'a> {
    dialog: &'a FieldDialog,
}

impl<'a> FieldDialogView<'a> {
    pub fn new(dialog: &'a FieldDialog) -> Self {
        Self { dialog }
    }

    fn input_line(&self, input: DraftField) -> Line<'static> {
        let focused = self.dialog.focus == input;
        let value = self.dialog.draft.display_value(input).to_string();

        let label = if REQUIRED.contains(&input) {
            format!("{}*", input.label())
        } else {
            input.label().to_string()
        };
        let marker = if focused {
            Span::styled(" ▸ ", styles::accent_bold())
        } else {
            Span::raw("   ")
        };

        let mut spans = vec![
            marker,
            Span::styled(format!("{label:<LABEL_WIDTH$}"), styles::text_secondary()),
        ];

        if input.is_choice() {
            let style = if focused {
                styles::focused_selected()
            } else {
                styles::text_primary()
            };
            spans.push(Span::styled(format!("‹ {value} ›"), style));
        } else {
            spans.push(Span::styled(value, styles::text_primary()));
            if focused {
                spans.push(Span::styled("_", styles::accent()));
            }
        }

        if focused && matches!(input, DraftField::PlantingDate | DraftField::ExpectedHarvestDate) {
            spans.push(Span::styled("  YYYY-MM-DD", styles::text_muted()));
        }

        Line::from(spans)
    }

    fn footer(&self) -> Line<'static> {
        if self.dialog.submitting {
            return Line::from(Span::styled("   Saving...", styles::status_yellow()));
        }
        Line::from(vec![
            Span::styled("   [Enter]", styles::keybinding()),
            Span::styled(" Save  ", styles::text_muted()),
            Span::styled("[Tab]", styles::keybinding()),
            Span::styled(" Next  ", styles::text_muted()),
            Span::styled("[←/→]", styles::keybinding()),
            Span::styled(" Choose  ", styles::text_muted()),
            Span::styled("[Esc]", styles::keybinding()),
            Span::styled(" Cancel", styles::text_muted()),
        ])
    }
}

impl Widget for FieldDialogView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Borders + blank + inputs + blank + error + footer
        let height = DraftField::ALL.len() as u16 + 6;
        let modal = modal_overlay::prepare_modal(buf, area, DIALOG_WIDTH, height);

        let mut lines = vec![Line::default()];
        lines.extend(DraftField::ALL.iter().map(|input| self.input_line(*input)));
        lines.push(Line::default());
        lines.push(match &self.dialog.error {
            Some(error) => Line::from(Span::styled(
                format!("   {error}"),
                styles::status_red().add_modifier(Modifier::BOLD),
            )),
            None => Line::default(),
        });
        lines.push(self.footer());

        Paragraph::new(lines)
            .block(styles::modal_block(self.dialog.title()))
            .render(modal, buf);
    }
}
