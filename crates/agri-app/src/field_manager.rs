//! Field manager UI state
//!
//! Owns the transient state around the field list: the selected row, the
//! create/edit dialog and its draft, and the two-phase delete prompt. The
//! records themselves live in [`FieldStore`](crate::field_store::FieldStore).

use agri_core::{DraftField, Field, FieldDraft, FieldId, FieldPayload};

/// Whether the dialog creates a record or edits an existing one
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogKind {
    Create,
    Edit(FieldId),
}

/// Create/edit dialog with its draft
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDialog {
    pub kind: DialogKind,
    pub draft: FieldDraft,
    pub focus: DraftField,
    /// Conversion or store error shown under the form
    pub error: Option<String>,
    pub submitting: bool,
}

impl FieldDialog {
    pub fn create() -> Self {
        Self {
            kind: DialogKind::Create,
            draft: FieldDraft::new(),
            focus: DraftField::default(),
            error: None,
            submitting: false,
        }
    }

    pub fn edit(field: &Field) -> Self {
        Self {
            kind: DialogKind::Edit(field.id.clone()),
            draft: FieldDraft::from_field(field),
            focus: DraftField::default(),
            error: None,
            submitting: false,
        }
    }

    pub fn title(&self) -> &'static str {
        match self.kind {
            DialogKind::Create => "New Field",
            DialogKind::Edit(_) => "Edit Field",
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    /// Append a typed character to the focused text input
    pub fn push_char(&mut self, c: char) {
        if let Some(text) = self.draft.text_mut(self.focus) {
            text.push(c);
        }
    }

    pub fn pop_char(&mut self) {
        if let Some(text) = self.draft.text_mut(self.focus) {
            text.pop();
        }
    }
}

/// A delete awaiting confirmation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDelete {
    pub id: FieldId,
    pub name: String,
    pub deleting: bool,
    pub error: Option<String>,
}

/// What confirming a dialog asks the store to do
#[derive(Debug, Clone, PartialEq)]
pub enum DialogSubmit {
    Create(FieldPayload),
    Update(FieldId, FieldPayload),
}

#[derive(Debug, Clone, Default)]
pub struct FieldManagerState {
    /// Row index into the visible list
    pub selected: usize,
    pub show_archived: bool,
    /// Remove records on delete instead of archiving them
    pub hard_delete: bool,
    pub dialog: Option<FieldDialog>,
    pub pending_delete: Option<PendingDelete>,
}

impl FieldManagerState {
    pub fn new(show_archived: bool, hard_delete: bool) -> Self {
        Self {
            show_archived,
            hard_delete,
            ..Default::default()
        }
    }

    // ─────────────────────────────────────────────────────────
    // Selection
    // ─────────────────────────────────────────────────────────

    pub fn select_next(&mut self, len: usize) {
        if len > 0 {
            self.selected = (self.selected + 1).min(len - 1);
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Keep the selection inside a list of `len` rows
    pub fn clamp_selection(&mut self, len: usize) {
        self.selected = self.selected.min(len.saturating_sub(1));
    }

    pub fn toggle_show_archived(&mut self) {
        self.show_archived = !self.show_archived;
    }

    // ─────────────────────────────────────────────────────────
    // Create / Edit
    // ─────────────────────────────────────────────────────────

    fn dialog_in_flight(&self) -> bool {
        self.dialog.as_ref().is_some_and(|d| d.submitting)
    }

    pub fn open_create(&mut self) {
        if !self.dialog_in_flight() {
            self.dialog = Some(FieldDialog::create());
        }
    }

    pub fn open_edit(&mut self, field: &Field) {
        if !self.dialog_in_flight() {
            self.dialog = Some(FieldDialog::edit(field));
        }
    }

    /// Discard the dialog and its draft.
    ///
    /// Ignored while a submit is in flight so its completion always lands
    /// on the dialog that sent it. Returns whether the dialog was closed.
    pub fn close_dialog(&mut self) -> bool {
        if self.dialog_in_flight() {
            return false;
        }
        self.dialog.take().is_some()
    }

    /// Convert the draft for submission.
    ///
    /// A conversion error stays on the dialog and nothing is returned. A
    /// second submit while one is in flight is ignored.
    pub fn submit_dialog(&mut self) -> Option<DialogSubmit> {
        let dialog = self.dialog.as_mut()?;
        if dialog.submitting {
            return None;
        }

        match dialog.draft.to_payload() {
            Ok(payload) => {
                dialog.error = None;
                dialog.submitting = true;
                Some(match &dialog.kind {
                    DialogKind::Create => DialogSubmit::Create(payload),
                    DialogKind::Edit(id) => DialogSubmit::Update(id.clone(), payload),
                })
            }
            Err(e) => {
                dialog.error = Some(e.to_string());
                None
            }
        }
    }

    /// Close on success; otherwise keep the dialog open with `error`.
    ///
    /// Only a submitting dialog is affected.
    pub fn dialog_completed(&mut self, success: bool, error: Option<String>) {
        let Some(dialog) = self.dialog.as_mut().filter(|d| d.submitting) else {
            return;
        };
        if success {
            self.dialog = None;
        } else {
            dialog.submitting = false;
            dialog.error = error;
        }
    }

    // ─────────────────────────────────────────────────────────
    // Delete
    // ─────────────────────────────────────────────────────────

    pub fn request_delete(&mut self, field: &Field) {
        self.pending_delete = Some(PendingDelete {
            id: field.id.clone(),
            name: field.field_name.clone(),
            deleting: false,
            error: None,
        });
    }

    /// Confirm the pending delete, returning `(id, hard_delete)` for the call
    pub fn confirm_delete(&mut self) -> Option<(FieldId, bool)> {
        let pending = self.pending_delete.as_mut()?;
        if pending.deleting {
            return None;
        }
        pending.deleting = true;
        pending.error = None;
        Some((pending.id.clone(), self.hard_delete))
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Dismiss the prompt on success; otherwise show `error` in it.
    ///
    /// Only a prompt for `id` that is still deleting is affected; a prompt
    /// opened for another record after a cancel is left alone.
    pub fn delete_completed(&mut self, id: &FieldId, success: bool, error: Option<String>) {
        let Some(pending) = self
            .pending_delete
            .as_mut()
            .filter(|p| p.deleting && p.id == *id)
        else {
            return;
        };
        if success {
            self.pending_delete = None;
        } else {
            pending.deleting = false;
            pending.error = error;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agri_client::test_utils::test_field;
    use serde_json::json;

    fn valid_dialog(manager: &mut FieldManagerState) {
        manager.open_create();
        let draft = &mut manager.dialog.as_mut().unwrap().draft;
        draft.field_name = "North".into();
        draft.area = "3".into();
        draft.location.latitude = "10".into();
        draft.location.longitude = "20".into();
    }

    #[test]
    fn test_open_edit_seeds_draft_from_record() {
        let field: Field = serde_json::from_value(json!({
            "_id": "a",
            "fieldName": "Alpha",
            "area": 12.5,
            "location": {"latitude": -33.5, "longitude": 151},
            "plantingDate": "2024-03-15T22:00:00.000Z",
            "expectedHarvestDate": "2024-09-01 08:00:00"
        }))
        .unwrap();

        let mut manager = FieldManagerState::default();
        manager.open_edit(&field);

        let dialog = manager.dialog.as_ref().unwrap();
        assert_eq!(dialog.kind, DialogKind::Edit(FieldId::new("a")));
        assert_eq!(dialog.title(), "Edit Field");
        assert_eq!(dialog.draft.area, "12.5");
        assert_eq!(dialog.draft.location.latitude, "-33.5");
        assert_eq!(dialog.draft.location.longitude, "151");
        assert_eq!(dialog.draft.planting_date, "2024-03-15");
        assert_eq!(dialog.draft.expected_harvest_date, "2024-09-01");
    }

    #[test]
    fn test_submit_invalid_draft_keeps_dialog_with_error() {
        let mut manager = FieldManagerState::default();
        manager.open_create();

        assert!(manager.submit_dialog().is_none());

        let dialog = manager.dialog.as_ref().unwrap();
        assert_eq!(dialog.error.as_deref(), Some("Field name is required"));
        assert!(!dialog.submitting);
    }

    #[test]
    fn test_submit_create_then_success_closes() {
        let mut manager = FieldManagerState::default();
        valid_dialog(&mut manager);

        let submit = manager.submit_dialog().unwrap();
        assert!(matches!(submit, DialogSubmit::Create(ref p) if p.field_name == "North"));
        assert!(manager.dialog.as_ref().unwrap().submitting);
        assert!(manager.submit_dialog().is_none());

        manager.dialog_completed(true, None);
        assert!(manager.dialog.is_none());

        manager.open_create();
        assert_eq!(manager.dialog.unwrap().draft, FieldDraft::new());
    }

    #[test]
    fn test_submit_failure_keeps_dialog_and_draft() {
        let mut manager = FieldManagerState::default();
        valid_dialog(&mut manager);
        manager.submit_dialog().unwrap();

        manager.dialog_completed(false, Some("Duplicate name".into()));

        let dialog = manager.dialog.as_ref().unwrap();
        assert_eq!(dialog.error.as_deref(), Some("Duplicate name"));
        assert!(!dialog.submitting);
        assert_eq!(dialog.draft.field_name, "North");
    }

    #[test]
    fn test_submit_edit_targets_record_id() {
        let mut manager = FieldManagerState::default();
        manager.open_edit(&test_field("abc", "Alpha"));

        let submit = manager.submit_dialog().unwrap();
        assert!(matches!(submit, DialogSubmit::Update(ref id, _) if id.as_str() == "abc"));
    }

    #[test]
    fn test_dialog_typing_edits_focused_input_only() {
        let mut dialog = FieldDialog::create();
        dialog.focus = DraftField::Latitude;
        dialog.push_char('4');
        dialog.push_char('5');
        dialog.pop_char();

        assert_eq!(dialog.draft.location.latitude, "4");
        assert!(dialog.draft.location.longitude.is_empty());

        dialog.focus = DraftField::SoilType;
        dialog.push_char('x');
        assert_eq!(dialog.draft, {
            let mut expected = FieldDraft::new();
            expected.location.latitude = "4".into();
            expected
        });
    }

    #[test]
    fn test_two_phase_delete_uses_configured_flag() {
        let mut manager = FieldManagerState::new(false, false);
        assert!(manager.confirm_delete().is_none());

        manager.request_delete(&test_field("a", "Alpha"));
        assert_eq!(manager.confirm_delete(), Some((FieldId::new("a"), false)));
        assert!(manager.confirm_delete().is_none());

        manager.delete_completed(&FieldId::new("a"), true, None);
        assert!(manager.pending_delete.is_none());
    }

    #[test]
    fn test_failed_delete_keeps_prompt_with_error() {
        let mut manager = FieldManagerState::new(false, true);
        manager.request_delete(&test_field("a", "Alpha"));
        assert_eq!(manager.confirm_delete(), Some((FieldId::new("a"), true)));

        manager.delete_completed(&FieldId::new("a"), false, Some("denied".into()));

        let pending = manager.pending_delete.as_ref().unwrap();
        assert!(!pending.deleting);
        assert_eq!(pending.error.as_deref(), Some("denied"));
    }

    #[test]
    fn test_close_dialog_ignored_while_submitting() {
        let mut manager = FieldManagerState::default();
        valid_dialog(&mut manager);
        manager.submit_dialog().unwrap();

        assert!(!manager.close_dialog());
        manager.open_create();
        let dialog = manager.dialog.as_ref().unwrap();
        assert!(dialog.submitting);
        assert_eq!(dialog.draft.field_name, "North");

        manager.dialog_completed(false, Some("Duplicate name".into()));
        assert!(manager.close_dialog());
        assert!(manager.dialog.is_none());
    }

    #[test]
    fn test_completion_without_submitting_dialog_is_ignored() {
        let mut manager = FieldManagerState::default();
        manager.open_create();

        manager.dialog_completed(false, Some("late".into()));
        assert!(manager.dialog.as_ref().unwrap().error.is_none());

        manager.dialog_completed(true, None);
        assert!(manager.dialog.is_some());
    }

    #[test]
    fn test_stale_delete_completion_leaves_new_prompt() {
        let mut manager = FieldManagerState::default();
        manager.request_delete(&test_field("a", "Alpha"));
        manager.confirm_delete().unwrap();
        manager.cancel_delete();
        manager.request_delete(&test_field("b", "Bravo"));

        manager.delete_completed(&FieldId::new("a"), false, Some("denied".into()));
        let pending = manager.pending_delete.as_ref().unwrap();
        assert_eq!(pending.id, FieldId::new("b"));
        assert!(pending.error.is_none());

        manager.delete_completed(&FieldId::new("a"), true, None);
        assert!(manager.pending_delete.is_some());
    }

    #[test]
    fn test_cancel_delete_clears_prompt() {
        let mut manager = FieldManagerState::default();
        manager.request_delete(&test_field("a", "Alpha"));
        manager.cancel_delete();
        assert!(manager.pending_delete.is_none());
        assert!(manager.confirm_delete().is_none());
    }

    #[test]
    fn test_selection_stays_in_bounds() {
        let mut manager = FieldManagerState::default();
        manager.select_prev();
        assert_eq!(manager.selected, 0);

        manager.select_next(3);
        manager.select_next(3);
        manager.select_next(3);
        assert_eq!(manager.selected, 2);

        manager.clamp_selection(1);
        assert_eq!(manager.selected, 0);
        manager.select_next(0);
        assert_eq!(manager.selected, 0);
    }
}
