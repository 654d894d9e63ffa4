//! Key event handlers for different UI modes

use agri_core::InputKind;

use crate::input_key::InputKey;
use crate::message::Message;
use crate::prediction_form::FormFocus;
use crate::state::{AppState, Screen, UiMode};

/// Convert key events to messages based on current UI mode
pub fn handle_key(state: &AppState, key: InputKey) -> Option<Message> {
    match state.ui_mode() {
        UiMode::ConfirmQuit => handle_key_confirm_quit(key),
        UiMode::ConfirmDelete => handle_key_confirm_delete(key),
        UiMode::FieldDialog => handle_key_field_dialog(state, key),
        UiMode::Normal => handle_key_normal(state, key),
    }
}

/// Handle key events in the quit confirmation dialog
fn handle_key_confirm_quit(key: InputKey) -> Option<Message> {
    match key {
        InputKey::Char('y' | 'Y') | InputKey::Enter => Some(Message::ConfirmQuit),
        InputKey::Char('n' | 'N') | InputKey::Esc => Some(Message::CancelQuit),
        // Force quit with Ctrl+C even in dialog
        InputKey::CharCtrl('c') => Some(Message::Quit),
        _ => None,
    }
}

/// Handle key events in the delete confirmation dialog
fn handle_key_confirm_delete(key: InputKey) -> Option<Message> {
    match key {
        InputKey::Char('y' | 'Y') | InputKey::Enter => Some(Message::ConfirmDeleteField),
        InputKey::Char('n' | 'N') | InputKey::Esc => Some(Message::CancelDeleteField),
        InputKey::CharCtrl('c') => Some(Message::Quit),
        _ => None,
    }
}

/// Handle key events in the field create/edit dialog
fn handle_key_field_dialog(state: &AppState, key: InputKey) -> Option<Message> {
    let focus = state.field_manager.dialog.as_ref()?.focus;

    match key {
        InputKey::Esc => Some(Message::CancelFieldDialog),
        InputKey::Enter => Some(Message::SubmitFieldDialog),
        InputKey::Tab | InputKey::Down => Some(Message::FieldDialogFocusNext),
        InputKey::BackTab | InputKey::Up => Some(Message::FieldDialogFocusPrev),
        InputKey::Left if focus.is_choice() => Some(Message::CycleDraftChoice {
            input: focus,
            forward: false,
        }),
        InputKey::Right | InputKey::Char(' ') if focus.is_choice() => {
            Some(Message::CycleDraftChoice {
                input: focus,
                forward: true,
            })
        }
        InputKey::Backspace => Some(Message::FieldDialogBackspace),
        InputKey::Char(c) => Some(Message::FieldDialogInput(c)),
        InputKey::CharCtrl('c') => Some(Message::Quit),
        _ => None,
    }
}

/// Handle key events on the current screen
fn handle_key_normal(state: &AppState, key: InputKey) -> Option<Message> {
    match key {
        // Force quit (bypass confirmation) - Ctrl+C for emergency exit
        InputKey::CharCtrl('c') => Some(Message::Quit),

        InputKey::F(1) => Some(Message::ShowScreen(Screen::Predict)),
        InputKey::F(2) => Some(Message::ShowScreen(Screen::Fields)),

        _ => match state.screen {
            Screen::Predict => handle_key_predict(state, key),
            Screen::Fields => handle_key_fields(state, key),
        },
    }
}

// ─────────────────────────────────────────────────────────
// Prediction Screen
// ─────────────────────────────────────────────────────────

fn handle_key_predict(state: &AppState, key: InputKey) -> Option<Message> {
    let form = &state.prediction;

    match key {
        InputKey::Tab | InputKey::Down => Some(Message::PredictionFocusNext),
        InputKey::BackTab | InputKey::Up => Some(Message::PredictionFocusPrev),
        InputKey::Enter => Some(Message::SubmitPrediction),
        InputKey::CharCtrl('r') => Some(Message::ResetPrediction),

        _ => match form.focus {
            FormFocus::Mode => match key {
                InputKey::Left => Some(Message::SetPredictionMode(form.mode.prev())),
                InputKey::Right | InputKey::Char(' ') => {
                    Some(Message::SetPredictionMode(form.mode.next()))
                }
                InputKey::Char('q') | InputKey::Esc => Some(Message::RequestQuit),
                _ => None,
            },

            FormFocus::Input(field) if field.kind() == InputKind::Categorical => match key {
                InputKey::Left => Some(Message::CyclePredictionField {
                    field,
                    forward: false,
                }),
                InputKey::Right | InputKey::Char(' ') => Some(Message::CyclePredictionField {
                    field,
                    forward: true,
                }),
                InputKey::Backspace | InputKey::Delete => Some(Message::SetPredictionField {
                    field,
                    value: String::new(),
                }),
                InputKey::Char('q') | InputKey::Esc => Some(Message::RequestQuit),
                _ => None,
            },

            // Numeric text entry: every printable character is kept raw
            FormFocus::Input(field) => match key {
                InputKey::Char(c) => {
                    let mut value = form.input.get(field).to_string();
                    value.push(c);
                    Some(Message::SetPredictionField { field, value })
                }
                InputKey::Backspace => {
                    let mut value = form.input.get(field).to_string();
                    value.pop();
                    Some(Message::SetPredictionField { field, value })
                }
                InputKey::CharCtrl('u') | InputKey::Delete => Some(Message::SetPredictionField {
                    field,
                    value: String::new(),
                }),
                InputKey::Esc => Some(Message::RequestQuit),
                _ => None,
            },
        },
    }
}

// ─────────────────────────────────────────────────────────
// Fields Screen
// ─────────────────────────────────────────────────────────

fn handle_key_fields(state: &AppState, key: InputKey) -> Option<Message> {
    let selected = || state.selected_field().map(|f| f.id.clone());

    match key {
        InputKey::Char('q') | InputKey::Esc => Some(Message::RequestQuit),

        InputKey::Up | InputKey::Char('k') => Some(Message::FieldListUp),
        InputKey::Down | InputKey::Char('j') => Some(Message::FieldListDown),
        InputKey::Home | InputKey::PageUp => Some(Message::FieldListTop),
        InputKey::End | InputKey::PageDown => Some(Message::FieldListBottom),

        InputKey::Char('n') => Some(Message::OpenCreateField),
        InputKey::Char('e') | InputKey::Enter => selected().map(Message::OpenEditField),
        InputKey::Char('d') | InputKey::Delete => selected().map(Message::RequestDeleteField),
        InputKey::Char('a') => selected().map(Message::SelectActiveField),
        InputKey::Char('r') => Some(Message::LoadFields),
        InputKey::Char('h') => Some(Message::ToggleShowArchived),
        InputKey::Char('x') => Some(Message::ClearStoreError),

        _ => None,
    }
}
