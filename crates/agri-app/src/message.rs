//! Message types for the application (TEA pattern)

use agri_client::{PredictionError, StoreError};
use agri_core::{DraftField, Field, FieldId, InputField, PredictionMode, PredictionResult};

use crate::input_key::InputKey;
use crate::state::Screen;

/// All possible messages/actions in the application
#[derive(Debug, Clone)]
pub enum Message {
    /// Keyboard event from terminal
    Key(InputKey),

    /// Tick event for periodic updates
    Tick,

    /// Request to quit (may show confirmation dialog if a request is in flight)
    RequestQuit,

    /// Force quit without confirmation (Ctrl+C)
    Quit,

    /// Confirm quit from confirmation dialog
    ConfirmQuit,

    /// Cancel quit from confirmation dialog
    CancelQuit,

    /// Switch between the prediction form and the field list
    ShowScreen(Screen),

    // ─────────────────────────────────────────────────────────
    // Prediction Form Messages
    // ─────────────────────────────────────────────────────────
    SetPredictionMode(PredictionMode),
    /// Store a raw input value (no parsing)
    SetPredictionField {
        field: InputField,
        value: String,
    },
    /// Step a categorical input through its catalog
    CyclePredictionField {
        field: InputField,
        forward: bool,
    },
    PredictionFocusNext,
    PredictionFocusPrev,
    SubmitPrediction,
    ResetPrediction,
    /// A prediction request finished
    PredictionCompleted {
        generation: u64,
        mode: PredictionMode,
        result: Result<PredictionResult, PredictionError>,
    },

    // ─────────────────────────────────────────────────────────
    // Field List Messages
    // ─────────────────────────────────────────────────────────
    /// Fetch the field list from the store
    LoadFields,
    FieldsLoaded(Result<Vec<Field>, StoreError>),
    FieldListUp,
    FieldListDown,
    FieldListTop,
    FieldListBottom,
    ToggleShowArchived,
    /// Mark a record as the active field (local only)
    SelectActiveField(FieldId),
    ClearStoreError,

    // ─────────────────────────────────────────────────────────
    // Field Dialog Messages
    // ─────────────────────────────────────────────────────────
    OpenCreateField,
    OpenEditField(FieldId),
    CancelFieldDialog,
    FieldDialogFocusNext,
    FieldDialogFocusPrev,
    FieldDialogInput(char),
    FieldDialogBackspace,
    CycleDraftChoice {
        input: DraftField,
        forward: bool,
    },
    SubmitFieldDialog,
    FieldCreated(Result<Field, StoreError>),
    FieldUpdated(Result<Field, StoreError>),

    // ─────────────────────────────────────────────────────────
    // Delete Messages
    // ─────────────────────────────────────────────────────────
    /// First phase: show the confirmation prompt
    RequestDeleteField(FieldId),
    ConfirmDeleteField,
    CancelDeleteField,
    FieldDeleted {
        id: FieldId,
        hard_delete: bool,
        result: Result<Option<Field>, StoreError>,
    },
}
