//! Field manager handlers: list, create/edit dialog, and two-phase delete

use agri_client::StoreError;
use agri_core::{Field, FieldId};
use tracing::{debug, warn};

use crate::field_manager::DialogSubmit;
use crate::state::AppState;

use super::{UpdateAction, UpdateResult};

// ─────────────────────────────────────────────────────────
// List
// ─────────────────────────────────────────────────────────

pub fn handle_load(state: &mut AppState) -> UpdateResult {
    if state.field_store.is_loading() {
        debug!("Field list already loading");
        return UpdateResult::none();
    }
    state.field_store.begin();
    UpdateResult::action(UpdateAction::LoadFields)
}

pub fn handle_loaded(state: &mut AppState, result: Result<Vec<Field>, StoreError>) -> UpdateResult {
    state.field_store.apply_loaded(result);
    clamp_selection(state);
    UpdateResult::none()
}

pub fn handle_toggle_archived(state: &mut AppState) -> UpdateResult {
    state.field_manager.toggle_show_archived();
    clamp_selection(state);
    UpdateResult::none()
}

pub fn handle_select_active(state: &mut AppState, id: &FieldId) -> UpdateResult {
    if !state.field_store.select_active(id) {
        warn!("Cannot make unknown field {} active", id);
    }
    UpdateResult::none()
}

fn clamp_selection(state: &mut AppState) {
    let len = state.visible_fields().len();
    state.field_manager.clamp_selection(len);
}

// ─────────────────────────────────────────────────────────
// Create / Edit
// ─────────────────────────────────────────────────────────

pub fn handle_open_edit(state: &mut AppState, id: &FieldId) -> UpdateResult {
    match state.field_store.get(id) {
        Some(field) => state.field_manager.open_edit(field),
        None => warn!("Cannot edit unknown field {}", id),
    }
    UpdateResult::none()
}

pub fn handle_submit_dialog(state: &mut AppState) -> UpdateResult {
    match state.field_manager.submit_dialog() {
        Some(DialogSubmit::Create(payload)) => {
            state.field_store.begin();
            UpdateResult::action(UpdateAction::CreateField { payload })
        }
        Some(DialogSubmit::Update(id, payload)) => {
            state.field_store.begin();
            UpdateResult::action(UpdateAction::UpdateField { id, payload })
        }
        None => UpdateResult::none(),
    }
}

pub fn handle_created(state: &mut AppState, result: Result<Field, StoreError>) -> UpdateResult {
    let outcome = state.field_store.apply_created(result);
    state
        .field_manager
        .dialog_completed(outcome.success, outcome.error);
    UpdateResult::none()
}

pub fn handle_updated(state: &mut AppState, result: Result<Field, StoreError>) -> UpdateResult {
    let outcome = state.field_store.apply_updated(result);
    state
        .field_manager
        .dialog_completed(outcome.success, outcome.error);
    UpdateResult::none()
}

// ─────────────────────────────────────────────────────────
// Delete
// ─────────────────────────────────────────────────────────

pub fn handle_request_delete(state: &mut AppState, id: &FieldId) -> UpdateResult {
    match state.field_store.get(id) {
        Some(field) => state.field_manager.request_delete(field),
        None => warn!("Cannot delete unknown field {}", id),
    }
    UpdateResult::none()
}

pub fn handle_confirm_delete(state: &mut AppState) -> UpdateResult {
    match state.field_manager.confirm_delete() {
        Some((id, hard_delete)) => {
            state.field_store.begin();
            UpdateResult::action(UpdateAction::DeleteField { id, hard_delete })
        }
        None => UpdateResult::none(),
    }
}

pub fn handle_deleted(
    state: &mut AppState,
    id: &FieldId,
    hard_delete: bool,
    result: Result<Option<Field>, StoreError>,
) -> UpdateResult {
    let outcome = state.field_store.apply_deleted(id, hard_delete, result);
    state
        .field_manager
        .delete_completed(id, outcome.success, outcome.error);
    clamp_selection(state);
    UpdateResult::none()
}
