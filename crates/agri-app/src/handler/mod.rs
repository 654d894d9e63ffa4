//! Handler module - TEA update function and event handlers
//!
//! Organized into submodules:
//! - `update`: Main update() function and message dispatch
//! - `keys`: Key event handlers for UI modes
//! - `prediction`: Prediction form handlers
//! - `fields`: Field list, dialog, and delete handlers

pub(crate) mod fields;
pub(crate) mod keys;
pub(crate) mod prediction;
pub(crate) mod update;

#[cfg(test)]
mod tests;

use agri_core::{FieldId, FieldPayload, PredictionMode, PredictionPayload};

use crate::message::Message;

// Re-export main entry point
pub use update::update;

pub use keys::handle_key;

/// Actions that the event loop should perform after update
///
/// Each action is one remote call; its completion comes back as a message.
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateAction {
    /// POST the payload to the endpoint for `mode`
    SubmitPrediction {
        /// Form generation at submit time, echoed in the completion
        generation: u64,
        mode: PredictionMode,
        payload: PredictionPayload,
    },

    /// Fetch every record from the field store
    LoadFields,

    CreateField { payload: FieldPayload },

    UpdateField { id: FieldId, payload: FieldPayload },

    /// Archive (`hard_delete == false`) or remove a record
    DeleteField { id: FieldId, hard_delete: bool },
}

/// Result of processing a message
#[derive(Debug, Default)]
pub struct UpdateResult {
    /// Optional follow-up message to process
    pub message: Option<Message>,
    /// Optional action for the event loop to perform
    pub action: Option<UpdateAction>,
}

impl UpdateResult {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn message(msg: Message) -> Self {
        Self {
            message: Some(msg),
            action: None,
        }
    }

    pub fn action(action: UpdateAction) -> Self {
        Self {
            message: None,
            action: Some(action),
        }
    }
}
