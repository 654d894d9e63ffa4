//! Main update function - handles state transitions (TEA pattern)
//!
//! Handler implementations live in:
//! - `prediction`: Prediction form handlers
//! - `fields`: Field list, dialog, and delete handlers

use crate::message::Message;
use crate::state::AppState;

use super::{fields, keys::handle_key, prediction, UpdateResult};

/// Process a message and update state
/// Returns optional follow-up message and/or action
pub fn update(state: &mut AppState, message: Message) -> UpdateResult {
    match message {
        Message::RequestQuit => {
            state.request_quit();
            UpdateResult::none()
        }

        Message::Quit => {
            state.force_quit();
            UpdateResult::none()
        }

        Message::ConfirmQuit => {
            state.confirm_quit();
            UpdateResult::none()
        }

        Message::CancelQuit => {
            state.cancel_quit();
            UpdateResult::none()
        }

        Message::Key(key) => match handle_key(state, key) {
            Some(msg) => UpdateResult::message(msg),
            None => UpdateResult::none(),
        },

        Message::Tick => {
            state.tick = state.tick.wrapping_add(1);
            UpdateResult::none()
        }

        Message::ShowScreen(screen) => {
            state.screen = screen;
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // Prediction Form Messages
        // ─────────────────────────────────────────────────────────
        Message::SetPredictionMode(mode) => prediction::handle_set_mode(state, mode),
        Message::SetPredictionField { field, value } => {
            prediction::handle_set_field(state, field, value)
        }
        Message::CyclePredictionField { field, forward } => {
            prediction::handle_cycle_field(state, field, forward)
        }
        Message::PredictionFocusNext => {
            state.prediction.focus_next();
            UpdateResult::none()
        }
        Message::PredictionFocusPrev => {
            state.prediction.focus_prev();
            UpdateResult::none()
        }
        Message::SubmitPrediction => prediction::handle_submit(state),
        Message::ResetPrediction => prediction::handle_reset(state),
        Message::PredictionCompleted {
            generation,
            mode,
            result,
        } => prediction::handle_completed(state, generation, mode, result),

        // ─────────────────────────────────────────────────────────
        // Field List Messages
        // ─────────────────────────────────────────────────────────
        Message::LoadFields => fields::handle_load(state),
        Message::FieldsLoaded(result) => fields::handle_loaded(state, result),
        Message::FieldListUp => {
            state.field_manager.select_prev();
            UpdateResult::none()
        }
        Message::FieldListDown => {
            let len = state.visible_fields().len();
            state.field_manager.select_next(len);
            UpdateResult::none()
        }
        Message::FieldListTop => {
            state.field_manager.selected = 0;
            UpdateResult::none()
        }
        Message::FieldListBottom => {
            let len = state.visible_fields().len();
            state.field_manager.selected = len.saturating_sub(1);
            UpdateResult::none()
        }
        Message::ToggleShowArchived => fields::handle_toggle_archived(state),
        Message::SelectActiveField(id) => fields::handle_select_active(state, &id),
        Message::ClearStoreError => {
            state.field_store.clear_error();
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // Field Dialog Messages
        // ─────────────────────────────────────────────────────────
        Message::OpenCreateField => {
            state.field_manager.open_create();
            UpdateResult::none()
        }
        Message::OpenEditField(id) => fields::handle_open_edit(state, &id),
        Message::CancelFieldDialog => {
            state.field_manager.close_dialog();
            UpdateResult::none()
        }
        Message::FieldDialogFocusNext => {
            if let Some(dialog) = state.field_manager.dialog.as_mut() {
                dialog.focus_next();
            }
            UpdateResult::none()
        }
        Message::FieldDialogFocusPrev => {
            if let Some(dialog) = state.field_manager.dialog.as_mut() {
                dialog.focus_prev();
            }
            UpdateResult::none()
        }
        Message::FieldDialogInput(c) => {
            if let Some(dialog) = state.field_manager.dialog.as_mut() {
                dialog.push_char(c);
            }
            UpdateResult::none()
        }
        Message::FieldDialogBackspace => {
            if let Some(dialog) = state.field_manager.dialog.as_mut() {
                dialog.pop_char();
            }
            UpdateResult::none()
        }
        Message::CycleDraftChoice { input, forward } => {
            if let Some(dialog) = state.field_manager.dialog.as_mut() {
                dialog.draft.cycle_choice(input, forward);
            }
            UpdateResult::none()
        }
        Message::SubmitFieldDialog => fields::handle_submit_dialog(state),
        Message::FieldCreated(result) => fields::handle_created(state, result),
        Message::FieldUpdated(result) => fields::handle_updated(state, result),

        // ─────────────────────────────────────────────────────────
        // Delete Messages
        // ─────────────────────────────────────────────────────────
        Message::RequestDeleteField(id) => fields::handle_request_delete(state, &id),
        Message::ConfirmDeleteField => fields::handle_confirm_delete(state),
        Message::CancelDeleteField => {
            state.field_manager.cancel_delete();
            UpdateResult::none()
        }
        Message::FieldDeleted {
            id,
            hard_delete,
            result,
        } => fields::handle_deleted(state, &id, hard_delete, result),
    }
}
