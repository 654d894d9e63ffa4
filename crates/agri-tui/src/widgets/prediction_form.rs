//! Prediction form widget
//!
//! Mode selector, the nine inputs, and one status line that shows exactly
//! one of: the idle hint, the loading spinner, the result, or the error.

use agri_app::prediction_form::{FormFocus, PredictionFormState, RequestState};
use agri_core::{FieldPolicy, InputField, InputKind};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

use super::spinner;
use crate::theme::{palette, styles};

/// Width of the label column
const LABEL_WIDTH: usize = 14;

pub struct PredictionForm<'a> {
    form: &'a PredictionFormState,
    tick: u64,
}

impl<'a> PredictionForm<'a> {
    pub fn new(form: &'a PredictionFormState) -> Self {
        Self { form, tick: 0 }
    }

    /// Animation frame for the loading spinner
    pub fn tick(mut self, tick: u64) -> Self {
        self.tick = tick;
        self
    }

    fn marker(focused: bool) -> Span<'static> {
        if focused {
            Span::styled(" ▸ ", styles::accent_bold())
        } else {
            Span::raw("   ")
        }
    }

    fn mode_line(&self) -> Line<'static> {
        let focused = self.form.focus == FormFocus::Mode;
        let value_style = if focused {
            styles::focused_selected()
        } else {
            styles::accent_bold()
        };
        Line::from(vec![
            Self::marker(focused),
            Span::styled(format!("{:<LABEL_WIDTH$}", "Mode"), styles::text_secondary()),
            Span::styled(format!("‹ {} ›", self.form.mode.label()), value_style),
        ])
    }

    fn input_line(&self, field: InputField) -> Line<'static> {
        let focused = self.form.focus == FormFocus::Input(field);
        let policy = self.form.policy(field);
        let value = self.form.input.get(field);

        let label = match policy {
            FieldPolicy::Required => format!("{}*", field.label()),
            _ => field.label().to_string(),
        };
        let label_style = if policy == FieldPolicy::Disabled {
            styles::text_muted()
        } else {
            styles::text_secondary()
        };

        let mut spans = vec![
            Self::marker(focused),
            Span::styled(format!("{label:<LABEL_WIDTH$}"), label_style),
        ];

        match (policy, field.kind()) {
            (FieldPolicy::Disabled, _) => {
                spans.push(Span::styled(
                    "(predicted)",
                    styles::text_muted().add_modifier(Modifier::ITALIC),
                ));
            }
            (_, InputKind::Categorical) => {
                let shown = if value.is_empty() { "select" } else { value };
                let style = match (focused, value.is_empty()) {
                    (true, _) => styles::focused_selected(),
                    (false, true) => styles::text_muted(),
                    (false, false) => styles::text_primary(),
                };
                spans.push(Span::styled(format!("‹ {shown} ›"), style));
            }
            (_, InputKind::Numeric) => {
                spans.push(Span::styled(value.to_string(), styles::text_primary()));
                if focused {
                    spans.push(Span::styled(
                        "_",
                        Style::default()
                            .fg(palette::ACCENT)
                            .add_modifier(Modifier::SLOW_BLINK),
                    ));
                }
            }
        }

        Line::from(spans)
    }

    fn status_line(&self) -> Line<'static> {
        match &self.form.request {
            RequestState::Idle => Line::from(Span::styled(
                "   Fill in the inputs and press Enter to predict.",
                styles::text_muted(),
            )),
            RequestState::Loading => Line::from(Span::styled(
                format!("   {} Predicting...", spinner(self.tick)),
                styles::status_yellow(),
            )),
            RequestState::Success { mode, result } => Line::from(vec![
                Span::styled(format!("   {}: ", mode.target().label()), styles::text_secondary()),
                Span::styled(result.to_string(), styles::status_green().add_modifier(Modifier::BOLD)),
            ]),
            RequestState::Error(err) => Line::from(Span::styled(
                format!("   {err}"),
                styles::prediction_error(err.kind()),
            )),
        }
    }
}

impl Widget for PredictionForm<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::glass_block(true)
            .title(format!(" {} Prediction ", self.form.mode.label()))
            .title_style(styles::text_bright())
            .style(Style::default().bg(palette::CARD_BG));

        let mut lines = vec![Line::default(), self.mode_line(), Line::default()];
        lines.extend(InputField::ALL.iter().map(|f| self.input_line(*f)));
        lines.push(Line::default());
        lines.push(self.status_line());

        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }
}
