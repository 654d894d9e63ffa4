//! Yes/no confirmation modal, used for quitting and deleting fields

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

use super::modal_overlay;
use crate::theme::styles;

pub struct ConfirmDialog<'a> {
    title: &'a str,
    message: String,
    error: Option<&'a str>,
    busy: bool,
}

impl<'a> ConfirmDialog<'a> {
    pub fn new(title: &'a str, message: impl Into<String>) -> Self {
        Self {
            title,
            message: message.into(),
            error: None,
            busy: false,
        }
    }

    /// Failure of the confirmed operation; the prompt stays open to retry
    pub fn error(mut self, error: Option<&'a str>) -> Self {
        self.error = error;
        self
    }

    /// The confirmed operation is in flight
    pub fn busy(mut self, busy: bool) -> Self {
        self.busy = busy;
        self
    }
}

impl Widget for ConfirmDialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let modal = modal_overlay::prepare_modal(buf, area, 50, 8);

        let mut lines = vec![
            Line::default(),
            Line::from(Span::styled(self.message, styles::text_primary())).centered(),
        ];

        lines.push(match self.error {
            Some(error) => Line::from(Span::styled(error.to_string(), styles::status_red())).centered(),
            None => Line::default(),
        });
        lines.push(Line::default());

        lines.push(if self.busy {
            Line::from(Span::styled("Working...", styles::status_yellow())).centered()
        } else {
            Line::from(vec![
                Span::styled("[y]", styles::status_green()),
                Span::styled(" Yes    ", styles::text_secondary()),
                Span::styled("[n]", styles::status_red()),
                Span::styled(" No", styles::text_secondary()),
            ])
            .centered()
        });

        Paragraph::new(lines)
            .block(styles::modal_block(self.title))
            .wrap(Wrap { trim: true })
            .render(modal, buf);
    }
}
