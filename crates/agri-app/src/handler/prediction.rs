//! Prediction form handlers

use agri_client::PredictionError;
use agri_core::{InputField, PredictionMode, PredictionResult};
use tracing::{debug, info, warn};

use crate::state::AppState;

use super::{UpdateAction, UpdateResult};

pub fn handle_set_mode(state: &mut AppState, mode: PredictionMode) -> UpdateResult {
    state.prediction.set_mode(mode);
    UpdateResult::none()
}

pub fn handle_set_field(state: &mut AppState, field: InputField, value: String) -> UpdateResult {
    if !state.prediction.set_field(field, value) {
        debug!("Ignoring edit of {:?}: disabled in {} mode", field, state.prediction.mode);
    }
    UpdateResult::none()
}

pub fn handle_cycle_field(state: &mut AppState, field: InputField, forward: bool) -> UpdateResult {
    state.prediction.cycle_field(field, forward);
    UpdateResult::none()
}

/// Validate and, if the form is valid, emit exactly one request
pub fn handle_submit(state: &mut AppState) -> UpdateResult {
    if state.prediction.is_loading() {
        debug!("Prediction already in flight, ignoring submit");
        return UpdateResult::none();
    }

    match state.prediction.begin_submit() {
        Some(submission) => {
            info!("Submitting {} prediction", submission.mode.label());
            UpdateResult::action(UpdateAction::SubmitPrediction {
                generation: submission.generation,
                mode: submission.mode,
                payload: submission.payload,
            })
        }
        None => {
            if let Some(err) = state.prediction.error() {
                debug!("Prediction rejected locally: {}", err);
            }
            UpdateResult::none()
        }
    }
}

pub fn handle_reset(state: &mut AppState) -> UpdateResult {
    state.prediction.reset();
    UpdateResult::none()
}

pub fn handle_completed(
    state: &mut AppState,
    generation: u64,
    mode: PredictionMode,
    result: Result<PredictionResult, PredictionError>,
) -> UpdateResult {
    if let Err(e) = &result {
        warn!("{} prediction failed: {}", mode.label(), e);
    }
    if !state.prediction.complete(generation, mode, result) {
        debug!("Dropping prediction result from before the last reset");
    }
    UpdateResult::none()
}
