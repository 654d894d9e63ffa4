//! Main render/view function (View in TEA pattern)


use agri_app::state::{AppState, Screen, UiMode};
use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::Frame;

use crate::layout;
use crate::theme::palette;
use crate::widgets;

/// Render the complete UI (View function in TEA)
///
/// Pure: reads state, never modifies it.
pub fn view(frame: &mut Frame, state: &AppState) {
    let area = frame.area();

    // Fill entire terminal with deepest background color
    frame.render_widget(
        Block::default().style(Style::default().bg(palette::DEEPEST_BG)),
        area,
    );

    let areas = layout::create(area);

    frame.render_widget(widgets::MainHeader::new(state.screen), areas.header);

    match state.screen {
        Screen::Predict => {
            frame.render_widget(
                widgets::PredictionForm::new(&state.prediction).tick(state.tick),
                areas.body,
            );
        }
        Screen::Fields => {
            let list = widgets::FieldList::new(state.visible_fields(), state.field_manager.selected)
                .active(state.field_store.active_field_id())
                .loading(state.field_store.is_loading(), state.tick)
                .error(state.field_store.error())
                .show_archived(state.field_manager.show_archived);
            frame.render_widget(list, areas.body);
        }
    }

    frame.render_widget(widgets::StatusBar::new(state), areas.status);

    render_modal(frame, state);
}

/// Modals draw over the whole frame
fn render_modal(frame: &mut Frame, state: &AppState) {
    let area = frame.area();

    match state.ui_mode() {
        UiMode::Normal => {}

        UiMode::FieldDialog => {
            if let Some(dialog) = &state.field_manager.dialog {
                frame.render_widget(widgets::FieldDialogView::new(dialog), area);
            }
        }

        UiMode::ConfirmDelete => {
            if let Some(pending) = &state.field_manager.pending_delete {
                let verb = if state.field_manager.hard_delete {
                    "Permanently delete"
                } else {
                    "Archive"
                };
                let dialog = widgets::ConfirmDialog::new(
                    "Delete Field",
                    format!("{verb} \"{}\"?", pending.name),
                )
                .error(pending.error.as_deref())
                .busy(pending.deleting);
                frame.render_widget(dialog, area);
            }
        }

        UiMode::ConfirmQuit => {
            let dialog = widgets::ConfirmDialog::new(
                "Quit AgriDesk",
                "Requests are still running. Quit anyway?",
            );
            frame.render_widget(dialog, area);
        }
    }
}
