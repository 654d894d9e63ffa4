//! Locally owned view of the remote field store
//!
//! `FieldStore` holds the last known records, the active-field pointer, and
//! the loading/error flags. The record list only changes through the
//! `apply_*` reconcilers, each of which takes the transport result and
//! reports a [`StoreOutcome`].

use agri_client::StoreError;
use agri_core::{Field, FieldId, FieldStatus};
use tracing::{debug, info, warn};

/// Result of reconciling one store call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreOutcome {
    pub success: bool,
    pub error: Option<String>,
}

impl StoreOutcome {
    pub fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct FieldStore {
    fields: Vec<Field>,
    active_field: Option<FieldId>,
    loading: bool,
    error: Option<String>,
}

impl FieldStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn get(&self, id: &FieldId) -> Option<&Field> {
        self.fields.iter().find(|f| &f.id == id)
    }

    /// Records shown in the list, optionally hiding archived ones
    pub fn visible(&self, show_archived: bool) -> Vec<&Field> {
        self.fields
            .iter()
            .filter(|f| show_archived || !f.is_archived())
            .collect()
    }

    pub fn active_field(&self) -> Option<&Field> {
        self.active_field.as_ref().and_then(|id| self.get(id))
    }

    pub fn active_field_id(&self) -> Option<&FieldId> {
        self.active_field.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Mark a store call as in flight
    pub fn begin(&mut self) {
        self.loading = true;
    }

    /// Point the active-field selection at a known record.
    ///
    /// Local only; never sent to the store.
    pub fn select_active(&mut self, id: &FieldId) -> bool {
        if self.get(id).is_none() {
            return false;
        }
        self.active_field = Some(id.clone());
        true
    }

    // ─────────────────────────────────────────────────────────
    // Reconcilers
    // ─────────────────────────────────────────────────────────

    pub fn apply_loaded(&mut self, result: Result<Vec<Field>, StoreError>) -> StoreOutcome {
        self.finish(result).map_or_else(
            |outcome| outcome,
            |fields| {
                debug!("Loaded {} fields", fields.len());
                self.fields = fields;
                if self.active_field().is_none() {
                    self.active_field = None;
                }
                StoreOutcome::ok()
            },
        )
    }

    pub fn apply_created(&mut self, result: Result<Field, StoreError>) -> StoreOutcome {
        self.finish(result).map_or_else(
            |outcome| outcome,
            |field| {
                info!("Created field {} ({})", field.field_name, field.id);
                self.fields.push(field);
                StoreOutcome::ok()
            },
        )
    }

    pub fn apply_updated(&mut self, result: Result<Field, StoreError>) -> StoreOutcome {
        self.finish(result).map_or_else(
            |outcome| outcome,
            |field| {
                info!("Updated field {}", field.id);
                self.replace(field);
                StoreOutcome::ok()
            },
        )
    }

    /// Reconcile a delete of `id`.
    ///
    /// An archive replaces the record with the store's copy (or flips its
    /// status when the store sent none); a hard delete removes it.
    pub fn apply_deleted(
        &mut self,
        id: &FieldId,
        hard_delete: bool,
        result: Result<Option<Field>, StoreError>,
    ) -> StoreOutcome {
        let record = match self.finish(result) {
            Ok(record) => record,
            Err(outcome) => return outcome,
        };

        if hard_delete {
            info!("Removed field {}", id);
            self.fields.retain(|f| &f.id != id);
            if self.active_field.as_ref() == Some(id) {
                self.active_field = None;
            }
        } else {
            info!("Archived field {}", id);
            match record {
                Some(field) => self.replace(field),
                None => {
                    if let Some(field) = self.fields.iter_mut().find(|f| &f.id == id) {
                        field.status = FieldStatus::Archived;
                    }
                }
            }
        }
        StoreOutcome::ok()
    }

    /// Clear the loading flag and record any failure
    fn finish<T>(&mut self, result: Result<T, StoreError>) -> Result<T, StoreOutcome> {
        self.loading = false;
        match result {
            Ok(value) => {
                self.error = None;
                Ok(value)
            }
            Err(e) => {
                warn!("Field store call failed: {}", e);
                let message = e.to_string();
                self.error = Some(message.clone());
                Err(StoreOutcome::failed(message))
            }
        }
    }

    fn replace(&mut self, field: Field) {
        match self.fields.iter_mut().find(|f| f.id == field.id) {
            Some(existing) => *existing = field,
            None => self.fields.push(field),
        }
    }
}
