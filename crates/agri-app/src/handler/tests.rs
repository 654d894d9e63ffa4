//! Tests for handler module

use super::*;
use crate::input_key::InputKey;
use crate::message::Message;
use crate::prediction_form::{FormFocus, RequestState};
use crate::state::{AppPhase, AppState, Screen, UiMode};
use agri_client::test_utils::test_field;
use agri_client::{PredictionError, StoreError};
use agri_core::{DraftField, FieldId, InputField, PredictionMode, PredictionResult};
use serde_json::json;

/// State with a fully valid crop-mode form
fn filled_state() -> AppState {
    let mut state = AppState::new();
    for (field, value) in [
        (InputField::Temperature, "29"),
        (InputField::Humidity, "52"),
        (InputField::Moisture, "45"),
        (InputField::SoilType, "Loamy"),
        (InputField::Nitrogen, "12"),
        (InputField::Potassium, "0"),
        (InputField::Phosphorous, "36"),
    ] {
        state.prediction.input.set(field, value);
    }
    state
}

/// State on the fields screen with two loaded records
fn fields_state() -> AppState {
    let mut state = AppState::new();
    state.screen = Screen::Fields;
    update(
        &mut state,
        Message::FieldsLoaded(Ok(vec![
            test_field("a", "Alpha"),
            test_field("b", "Bravo"),
        ])),
    );
    state
}

// ─────────────────────────────────────────────────────────
// Quit
// ─────────────────────────────────────────────────────────

#[test]
fn test_quit_message_sets_quitting_phase() {
    let mut state = AppState::new();
    assert_ne!(state.phase, AppPhase::Quitting);

    update(&mut state, Message::Quit);

    assert_eq!(state.phase, AppPhase::Quitting);
    assert!(state.should_quit());
}

#[test]
fn test_ctrl_c_produces_quit_message() {
    let state = AppState::new();
    let result = handle_key(&state, InputKey::CharCtrl('c'));
    assert!(matches!(result, Some(Message::Quit)));
}

#[test]
fn test_q_on_mode_selector_requests_quit() {
    let state = AppState::new();
    assert_eq!(state.prediction.focus, FormFocus::Mode);
    let result = handle_key(&state, InputKey::Char('q'));
    assert!(matches!(result, Some(Message::RequestQuit)));
}

#[test]
fn test_q_in_numeric_input_is_typed() {
    let mut state = AppState::new();
    state.prediction.focus = FormFocus::Input(InputField::Humidity);

    let result = handle_key(&state, InputKey::Char('q'));

    assert!(matches!(
        result,
        Some(Message::SetPredictionField { field: InputField::Humidity, ref value }) if value == "q"
    ));
}

#[test]
fn test_confirm_quit_dialog_keys() {
    let mut state = AppState::new();
    state.quit_prompt = true;
    assert_eq!(state.ui_mode(), UiMode::ConfirmQuit);

    assert!(matches!(
        handle_key(&state, InputKey::Char('y')),
        Some(Message::ConfirmQuit)
    ));
    assert!(matches!(
        handle_key(&state, InputKey::Esc),
        Some(Message::CancelQuit)
    ));
    assert!(matches!(
        handle_key(&state, InputKey::CharCtrl('c')),
        Some(Message::Quit)
    ));
}

// ─────────────────────────────────────────────────────────
// Screens
// ─────────────────────────────────────────────────────────

#[test]
fn test_function_keys_switch_screens() {
    let mut state = AppState::new();

    let msg = handle_key(&state, InputKey::F(2)).unwrap();
    update(&mut state, msg);
    assert_eq!(state.screen, Screen::Fields);

    let msg = handle_key(&state, InputKey::F(1)).unwrap();
    update(&mut state, msg);
    assert_eq!(state.screen, Screen::Predict);
}

#[test]
fn test_tick_advances_frame() {
    let mut state = AppState::new();
    update(&mut state, Message::Tick);
    update(&mut state, Message::Tick);
    assert_eq!(state.tick, 2);
}

// ─────────────────────────────────────────────────────────
// Prediction Form
// ─────────────────────────────────────────────────────────

#[test]
fn test_submit_valid_form_emits_one_request() {
    let mut state = filled_state();

    let result = update(&mut state, Message::SubmitPrediction);

    match result.action {
        Some(UpdateAction::SubmitPrediction { mode, payload, .. }) => {
            assert_eq!(mode, PredictionMode::CropPrediction);
            assert_eq!(payload.crop_type, "");
            assert_eq!(payload.phosphorous, 36.0);
        }
        other => panic!("expected SubmitPrediction, got {other:?}"),
    }
    assert_eq!(state.prediction.request, RequestState::Loading);
}

#[test]
fn test_each_invalid_numeric_blocks_request() {
    for field in InputField::NUMERIC {
        let mut state = filled_state();
        state.prediction.input.set(field, "1,5");

        let result = update(&mut state, Message::SubmitPrediction);

        assert!(result.action.is_none(), "{field:?} should block submit");
        match state.prediction.error() {
            Some(PredictionError::Validation(err)) => assert_eq!(err.field, field),
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}

#[test]
fn test_missing_required_selection_blocks_request() {
    let cases = [
        (PredictionMode::CropPrediction, InputField::SoilType, "Please select a soil type"),
        (PredictionMode::SoilPrediction, InputField::CropType, "Please select a crop type"),
        (PredictionMode::FertilizerPrediction, InputField::SoilType, "Please select a soil type"),
        (PredictionMode::FertilizerPrediction, InputField::CropType, "Please select a crop type"),
    ];

    for (mode, cleared, expected) in cases {
        let mut state = filled_state();
        state.prediction.input.set(InputField::CropType, "Wheat");
        state.prediction.mode = mode;
        state.prediction.input.set(cleared, "");

        let result = update(&mut state, Message::SubmitPrediction);

        assert!(result.action.is_none());
        assert_eq!(
            state.prediction.error().map(|e| e.to_string()).as_deref(),
            Some(expected)
        );
    }
}

#[test]
fn test_submit_while_loading_is_ignored() {
    let mut state = filled_state();
    assert!(update(&mut state, Message::SubmitPrediction).action.is_some());
    assert!(update(&mut state, Message::SubmitPrediction).action.is_none());
}

#[test]
fn test_completion_stores_result() {
    let mut state = filled_state();
    let Some(UpdateAction::SubmitPrediction {
        generation, mode, ..
    }) = update(&mut state, Message::SubmitPrediction).action
    else {
        panic!("expected request");
    };

    update(
        &mut state,
        Message::PredictionCompleted {
            generation,
            mode,
            result: Ok(PredictionResult::new(json!("Maize"))),
        },
    );

    assert_eq!(
        state.prediction.result().map(|r| r.to_string()).as_deref(),
        Some("Maize")
    );
    assert!(state.prediction.error().is_none());
}

#[test]
fn test_switching_modes_preserves_values() {
    let mut state = filled_state();
    state.prediction.input.set(InputField::FertilizerName, "DAP");
    let before = state.prediction.input.clone();

    update(&mut state, Message::SetPredictionMode(PredictionMode::SoilPrediction));
    update(
        &mut state,
        Message::SetPredictionMode(PredictionMode::FertilizerPrediction),
    );

    assert_eq!(state.prediction.input, before);
}

#[test]
fn test_reset_clears_inputs_result_and_error() {
    let mut state = filled_state();
    state.prediction.request = RequestState::Error(PredictionError::unexpected("x"));

    let msg = handle_key(&state, InputKey::CharCtrl('r')).unwrap();
    update(&mut state, msg);

    for field in InputField::ALL {
        assert_eq!(state.prediction.input.get(field), "");
    }
    assert_eq!(state.prediction.request, RequestState::Idle);
}

#[test]
fn test_typing_appends_raw_characters() {
    let mut state = AppState::new();
    state.prediction.focus = FormFocus::Input(InputField::Temperature);

    for key in [InputKey::Char('2'), InputKey::Char('9'), InputKey::Char('.')] {
        let msg = handle_key(&state, key).unwrap();
        update(&mut state, msg);
    }
    assert_eq!(state.prediction.input.temperature, "29.");

    let msg = handle_key(&state, InputKey::Backspace).unwrap();
    update(&mut state, msg);
    assert_eq!(state.prediction.input.temperature, "29");
}

#[test]
fn test_right_on_mode_selector_cycles_mode() {
    let mut state = AppState::new();
    let msg = handle_key(&state, InputKey::Right).unwrap();
    update(&mut state, msg);
    assert_eq!(state.prediction.mode, PredictionMode::SoilPrediction);
}

#[test]
fn test_left_right_cycle_categorical_input() {
    let mut state = AppState::new();
    state.prediction.focus = FormFocus::Input(InputField::SoilType);

    let msg = handle_key(&state, InputKey::Right).unwrap();
    update(&mut state, msg);
    assert_eq!(state.prediction.input.soil_type, "Sandy");

    let msg = handle_key(&state, InputKey::Left).unwrap();
    update(&mut state, msg);
    assert_eq!(state.prediction.input.soil_type, "");
}

#[test]
fn test_tab_skips_disabled_target() {
    let mut state = AppState::new();
    state.prediction.focus = FormFocus::Input(InputField::SoilType);

    let msg = handle_key(&state, InputKey::Tab).unwrap();
    update(&mut state, msg);

    assert_eq!(
        state.prediction.focus,
        FormFocus::Input(InputField::Nitrogen)
    );
}

// ─────────────────────────────────────────────────────────
// Field List
// ─────────────────────────────────────────────────────────

#[test]
fn test_load_fields_emits_action_once() {
    let mut state = AppState::new();
    let result = update(&mut state, Message::LoadFields);
    assert_eq!(result.action, Some(UpdateAction::LoadFields));
    assert!(state.field_store.is_loading());

    let result = update(&mut state, Message::LoadFields);
    assert!(result.action.is_none());
}

#[test]
fn test_list_navigation_and_active_selection() {
    let mut state = fields_state();

    let msg = handle_key(&state, InputKey::Down).unwrap();
    update(&mut state, msg);
    assert_eq!(state.selected_field().unwrap().id, FieldId::new("b"));

    let msg = handle_key(&state, InputKey::Char('a')).unwrap();
    update(&mut state, msg);
    assert_eq!(
        state.field_store.active_field_id(),
        Some(&FieldId::new("b"))
    );
}

#[test]
fn test_store_error_banner_and_clear() {
    let mut state = fields_state();
    update(
        &mut state,
        Message::FieldsLoaded(Err(StoreError::rejected("store offline"))),
    );
    assert_eq!(state.field_store.error(), Some("store offline"));
    assert_eq!(state.field_store.fields().len(), 2);

    let msg = handle_key(&state, InputKey::Char('x')).unwrap();
    update(&mut state, msg);
    assert!(state.field_store.error().is_none());
}

#[test]
fn test_hiding_archived_clamps_selection() {
    let mut state = fields_state();
    state.field_manager.show_archived = true;
    state.field_manager.selected = 1;
    let mut archived = test_field("b", "Bravo");
    archived.status = agri_core::FieldStatus::Archived;
    update(&mut state, Message::FieldUpdated(Ok(archived)));

    update(&mut state, Message::ToggleShowArchived);

    assert_eq!(state.visible_fields().len(), 1);
    assert_eq!(state.field_manager.selected, 0);
}

// ─────────────────────────────────────────────────────────
// Field Dialog
// ─────────────────────────────────────────────────────────

#[test]
fn test_edit_key_opens_dialog_for_selected() {
    let mut state = fields_state();

    let msg = handle_key(&state, InputKey::Enter).unwrap();
    update(&mut state, msg);

    assert_eq!(state.ui_mode(), UiMode::FieldDialog);
    let dialog = state.field_manager.dialog.as_ref().unwrap();
    assert_eq!(dialog.draft.field_name, "Alpha");
    assert_eq!(dialog.draft.area, "10");
}

#[test]
fn test_dialog_keys_edit_focused_input() {
    let mut state = fields_state();
    update(&mut state, Message::OpenCreateField);

    for key in [InputKey::Char('P'), InputKey::Char('1'), InputKey::Tab] {
        let msg = handle_key(&state, key).unwrap();
        update(&mut state, msg);
    }

    let dialog = state.field_manager.dialog.as_ref().unwrap();
    assert_eq!(dialog.draft.field_name, "P1");
    assert_eq!(dialog.focus, DraftField::Crop);
}

#[test]
fn test_dialog_right_cycles_choice_input() {
    let mut state = fields_state();
    update(&mut state, Message::OpenCreateField);
    state.field_manager.dialog.as_mut().unwrap().focus = DraftField::AreaUnit;

    let msg = handle_key(&state, InputKey::Right).unwrap();
    update(&mut state, msg);

    let dialog = state.field_manager.dialog.as_ref().unwrap();
    assert_eq!(dialog.draft.area_unit, agri_core::AreaUnit::Hectares);
}

#[test]
fn test_invalid_dialog_submit_emits_nothing() {
    let mut state = fields_state();
    update(&mut state, Message::OpenCreateField);

    let result = update(&mut state, Message::SubmitFieldDialog);

    assert!(result.action.is_none());
    let dialog = state.field_manager.dialog.as_ref().unwrap();
    assert_eq!(dialog.error.as_deref(), Some("Field name is required"));
}

#[test]
fn test_edit_submit_emits_update_then_reconciles() {
    let mut state = fields_state();
    update(&mut state, Message::OpenEditField(FieldId::new("a")));
    state.field_manager.dialog.as_mut().unwrap().draft.field_name = "Alpha West".into();

    let result = update(&mut state, Message::SubmitFieldDialog);
    let Some(UpdateAction::UpdateField { id, payload }) = result.action else {
        panic!("expected UpdateField");
    };
    assert_eq!(id, FieldId::new("a"));
    assert_eq!(payload.field_name, "Alpha West");

    update(
        &mut state,
        Message::FieldUpdated(Ok(test_field("a", "Alpha West"))),
    );

    assert!(state.field_manager.dialog.is_none());
    assert_eq!(
        state.field_store.get(&FieldId::new("a")).unwrap().field_name,
        "Alpha West"
    );
}

#[test]
fn test_create_failure_keeps_dialog_open() {
    let mut state = fields_state();
    update(&mut state, Message::OpenCreateField);
    {
        let draft = &mut state.field_manager.dialog.as_mut().unwrap().draft;
        draft.field_name = "Gamma".into();
        draft.area = "1".into();
        draft.location.latitude = "0".into();
        draft.location.longitude = "0".into();
    }
    let result = update(&mut state, Message::SubmitFieldDialog);
    assert!(matches!(result.action, Some(UpdateAction::CreateField { .. })));

    update(
        &mut state,
        Message::FieldCreated(Err(StoreError::rejected("Duplicate name"))),
    );

    assert_eq!(state.ui_mode(), UiMode::FieldDialog);
    let dialog = state.field_manager.dialog.as_ref().unwrap();
    assert_eq!(dialog.error.as_deref(), Some("Duplicate name"));
    assert_eq!(state.field_store.fields().len(), 2);
}

#[test]
fn test_escape_cancels_dialog() {
    let mut state = fields_state();
    update(&mut state, Message::OpenCreateField);

    let msg = handle_key(&state, InputKey::Esc).unwrap();
    update(&mut state, msg);

    assert!(state.field_manager.dialog.is_none());
    assert_eq!(state.ui_mode(), UiMode::Normal);
}

#[test]
fn test_escape_while_submitting_keeps_dialog_for_completion() {
    let mut state = fields_state();
    update(&mut state, Message::OpenCreateField);
    {
        let draft = &mut state.field_manager.dialog.as_mut().unwrap().draft;
        draft.field_name = "Gamma".into();
        draft.area = "1".into();
        draft.location.latitude = "0".into();
        draft.location.longitude = "0".into();
    }
    let result = update(&mut state, Message::SubmitFieldDialog);
    assert!(matches!(result.action, Some(UpdateAction::CreateField { .. })));

    let msg = handle_key(&state, InputKey::Esc).unwrap();
    update(&mut state, msg);
    update(&mut state, Message::OpenCreateField);

    let dialog = state.field_manager.dialog.as_ref().unwrap();
    assert!(dialog.submitting);
    assert_eq!(dialog.draft.field_name, "Gamma");

    update(
        &mut state,
        Message::FieldCreated(Err(StoreError::rejected("Duplicate name"))),
    );
    let dialog = state.field_manager.dialog.as_ref().unwrap();
    assert_eq!(dialog.error.as_deref(), Some("Duplicate name"));
    assert_eq!(dialog.draft.field_name, "Gamma");

    let msg = handle_key(&state, InputKey::Esc).unwrap();
    update(&mut state, msg);
    assert!(state.field_manager.dialog.is_none());
}

#[test]
fn test_late_completion_does_not_touch_fresh_dialog() {
    let mut state = fields_state();
    update(&mut state, Message::OpenCreateField);

    update(
        &mut state,
        Message::FieldCreated(Err(StoreError::rejected("Duplicate name"))),
    );

    let dialog = state.field_manager.dialog.as_ref().unwrap();
    assert!(dialog.error.is_none());
    assert!(!dialog.submitting);
}

// ─────────────────────────────────────────────────────────
// Delete
// ─────────────────────────────────────────────────────────

#[test]
fn test_delete_is_two_phase_and_archives_by_default() {
    let mut state = fields_state();

    let msg = handle_key(&state, InputKey::Char('d')).unwrap();
    let result = update(&mut state, msg);
    assert!(result.action.is_none());
    assert_eq!(state.ui_mode(), UiMode::ConfirmDelete);

    let msg = handle_key(&state, InputKey::Char('y')).unwrap();
    let result = update(&mut state, msg);
    assert_eq!(
        result.action,
        Some(UpdateAction::DeleteField {
            id: FieldId::new("a"),
            hard_delete: false,
        })
    );
}

#[test]
fn test_delete_cancel_issues_no_call() {
    let mut state = fields_state();
    update(&mut state, Message::RequestDeleteField(FieldId::new("a")));

    let msg = handle_key(&state, InputKey::Char('n')).unwrap();
    let result = update(&mut state, msg);

    assert!(result.action.is_none());
    assert!(state.field_manager.pending_delete.is_none());
    assert!(update(&mut state, Message::ConfirmDeleteField).action.is_none());
}

#[test]
fn test_hard_delete_setting_is_forwarded() {
    let mut state = fields_state();
    state.field_manager.hard_delete = true;
    update(&mut state, Message::RequestDeleteField(FieldId::new("b")));

    let result = update(&mut state, Message::ConfirmDeleteField);

    assert_eq!(
        result.action,
        Some(UpdateAction::DeleteField {
            id: FieldId::new("b"),
            hard_delete: true,
        })
    );
}

#[test]
fn test_delete_completion_dismisses_prompt() {
    let mut state = fields_state();
    state.field_manager.selected = 1;
    update(&mut state, Message::RequestDeleteField(FieldId::new("b")));
    update(&mut state, Message::ConfirmDeleteField);

    update(
        &mut state,
        Message::FieldDeleted {
            id: FieldId::new("b"),
            hard_delete: true,
            result: Ok(None),
        },
    );

    assert!(state.field_manager.pending_delete.is_none());
    assert_eq!(state.field_store.fields().len(), 1);
    assert_eq!(state.field_manager.selected, 0);
}

#[test]
fn test_stale_delete_completion_leaves_other_prompt() {
    let mut state = fields_state();
    update(&mut state, Message::RequestDeleteField(FieldId::new("a")));
    let result = update(&mut state, Message::ConfirmDeleteField);
    assert!(result.action.is_some());

    update(&mut state, Message::CancelDeleteField);
    update(&mut state, Message::RequestDeleteField(FieldId::new("b")));

    update(
        &mut state,
        Message::FieldDeleted {
            id: FieldId::new("a"),
            hard_delete: false,
            result: Err(StoreError::rejected("denied")),
        },
    );

    let pending = state.field_manager.pending_delete.as_ref().unwrap();
    assert_eq!(pending.id, FieldId::new("b"));
    assert!(!pending.deleting);
    assert!(pending.error.is_none());
    assert_eq!(state.ui_mode(), UiMode::ConfirmDelete);

    let result = update(&mut state, Message::ConfirmDeleteField);
    assert_eq!(
        result.action,
        Some(UpdateAction::DeleteField {
            id: FieldId::new("b"),
            hard_delete: false,
        })
    );
}
