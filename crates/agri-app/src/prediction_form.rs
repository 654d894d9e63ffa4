//! Prediction form state
//!
//! Holds the raw inputs, the selected [`PredictionMode`], focus, and the
//! state of the last submission. Nothing here talks to the network: a
//! successful [`PredictionFormState::begin_submit`] hands back the payload
//! and the engine performs the request.

use agri_client::PredictionError;
use agri_core::{
    cycle_option, field_policy, FieldPolicy, InputField, InputKind, PredictionInput,
    PredictionMode, PredictionPayload, PredictionResult,
};

/// Outcome of the most recent submission
#[derive(Debug, Clone, Default, PartialEq)]
pub enum RequestState {
    /// Nothing submitted since the last reset
    #[default]
    Idle,
    /// A request is in flight
    Loading,
    /// The service answered with a result
    Success {
        mode: PredictionMode,
        result: PredictionResult,
    },
    /// Validation or the request failed
    Error(PredictionError),
}

/// What the form's keyboard focus is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormFocus {
    /// The mode selector row
    #[default]
    Mode,
    Input(InputField),
}

/// A validated submission ready to be sent
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub generation: u64,
    pub mode: PredictionMode,
    pub payload: PredictionPayload,
}

#[derive(Debug, Clone, Default)]
pub struct PredictionFormState {
    pub input: PredictionInput,
    pub mode: PredictionMode,
    pub request: RequestState,
    pub focus: FormFocus,
    /// Bumped on reset so completions of earlier submissions are dropped
    generation: u64,
}

impl PredictionFormState {
    pub fn new(mode: PredictionMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    pub fn policy(&self, field: InputField) -> FieldPolicy {
        field_policy(self.mode, field)
    }

    pub fn is_disabled(&self, field: InputField) -> bool {
        self.policy(field) == FieldPolicy::Disabled
    }

    pub fn is_loading(&self) -> bool {
        self.request == RequestState::Loading
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Store a raw value. Returns `false` (and stores nothing) when the
    /// input is the current mode's target.
    pub fn set_field(&mut self, field: InputField, value: impl Into<String>) -> bool {
        if self.is_disabled(field) {
            return false;
        }
        self.input.set(field, value);
        true
    }

    /// Step a categorical input through its catalog (with an empty slot).
    pub fn cycle_field(&mut self, field: InputField, forward: bool) -> bool {
        if field.kind() != InputKind::Categorical {
            return false;
        }
        let next = cycle_option(field.options(), self.input.get(field), forward);
        self.set_field(field, next)
    }

    /// Switch modes. Entered values are kept.
    pub fn set_mode(&mut self, mode: PredictionMode) {
        self.mode = mode;
        if let FormFocus::Input(field) = self.focus {
            if self.is_disabled(field) {
                self.focus = self.step_focus(self.focus, true);
            }
        }
    }

    // ─────────────────────────────────────────────────────────
    // Focus
    // ─────────────────────────────────────────────────────────

    pub fn focus_next(&mut self) {
        self.focus = self.step_focus(self.focus, true);
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.step_focus(self.focus, false);
    }

    /// Focus ring: mode selector, then every input not disabled by the mode.
    fn step_focus(&self, from: FormFocus, forward: bool) -> FormFocus {
        let mut ring = vec![FormFocus::Mode];
        ring.extend(
            InputField::ALL
                .iter()
                .filter(|f| !self.is_disabled(**f))
                .map(|f| FormFocus::Input(*f)),
        );

        let position = match from {
            FormFocus::Mode => Some(0),
            FormFocus::Input(field) => ring.iter().position(|f| *f == FormFocus::Input(field)),
        };

        match position {
            Some(i) if forward => ring[(i + 1) % ring.len()],
            Some(i) => ring[(i + ring.len() - 1) % ring.len()],
            // Current focus just became disabled: land on the next enabled input
            None => {
                let FormFocus::Input(field) = from else {
                    return FormFocus::Mode;
                };
                let mut candidate = field;
                for _ in 0..InputField::ALL.len() {
                    candidate = if forward {
                        candidate.next()
                    } else {
                        candidate.prev()
                    };
                    if !self.is_disabled(candidate) {
                        return FormFocus::Input(candidate);
                    }
                }
                FormFocus::Mode
            }
        }
    }

    // ─────────────────────────────────────────────────────────
    // Submission
    // ─────────────────────────────────────────────────────────

    /// Validate and move to `Loading`.
    ///
    /// Returns `None` when a request is already in flight or validation
    /// fails; in the latter case the error is stored for display.
    pub fn begin_submit(&mut self) -> Option<Submission> {
        if self.is_loading() {
            return None;
        }

        match self.input.validate(self.mode) {
            Ok(payload) => {
                self.request = RequestState::Loading;
                Some(Submission {
                    generation: self.generation,
                    mode: self.mode,
                    payload,
                })
            }
            Err(e) => {
                self.request = RequestState::Error(e.into());
                None
            }
        }
    }

    /// Record a finished request. Returns `false` for a stale completion.
    pub fn complete(
        &mut self,
        generation: u64,
        mode: PredictionMode,
        outcome: Result<PredictionResult, PredictionError>,
    ) -> bool {
        if generation != self.generation {
            return false;
        }
        self.request = match outcome {
            Ok(result) => RequestState::Success { mode, result },
            Err(e) => RequestState::Error(e),
        };
        true
    }

    /// Clear all inputs, the result, and the error. The mode is kept.
    pub fn reset(&mut self) {
        self.input.clear();
        self.request = RequestState::Idle;
        self.generation += 1;
    }

    pub fn result(&self) -> Option<&PredictionResult> {
        match &self.request {
            RequestState::Success { result, .. } => Some(result),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&PredictionError> {
        match &self.request {
            RequestState::Error(e) => Some(e),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agri_client::PredictionErrorKind;
    use serde_json::json;

    fn filled(mode: PredictionMode) -> PredictionFormState {
        let mut form = PredictionFormState::new(mode);
        form.input = PredictionInput {
            temperature: "29".into(),
            humidity: "52".into(),
            moisture: "45".into(),
            soil_type: "Loamy".into(),
            crop_type: "Wheat".into(),
            nitrogen: "12".into(),
            potassium: "0".into(),
            phosphorous: "36".into(),
            fertilizer_name: String::new(),
        };
        form
    }

    #[test]
    fn test_each_bad_numeric_is_named() {
        for field in InputField::NUMERIC {
            let mut form = filled(PredictionMode::CropPrediction);
            form.input.set(field, "abc");

            assert!(form.begin_submit().is_none());
            let Some(PredictionError::Validation(err)) = form.error() else {
                panic!("expected validation error for {field:?}");
            };
            assert_eq!(err.field, field);
            assert!(err.message.contains(field.label()));
        }
    }

    #[test]
    fn test_required_selection_per_mode() {
        let mut form = filled(PredictionMode::CropPrediction);
        form.input.soil_type.clear();
        assert!(form.begin_submit().is_none());
        assert_eq!(
            form.error().map(|e| e.to_string()).as_deref(),
            Some("Please select a soil type")
        );

        let mut form = filled(PredictionMode::SoilPrediction);
        form.input.crop_type.clear();
        assert!(form.begin_submit().is_none());
        assert_eq!(
            form.error().map(|e| e.to_string()).as_deref(),
            Some("Please select a crop type")
        );

        let mut form = filled(PredictionMode::FertilizerPrediction);
        form.input.crop_type.clear();
        assert!(form.begin_submit().is_none());
        assert_eq!(
            form.error().map(|e| e.kind()),
            Some(PredictionErrorKind::Validation)
        );
    }

    #[test]
    fn test_begin_submit_blanks_target_and_sets_loading() {
        let mut form = filled(PredictionMode::CropPrediction);
        let submission = form.begin_submit().unwrap();

        assert!(form.is_loading());
        assert_eq!(submission.mode, PredictionMode::CropPrediction);
        assert_eq!(submission.payload.crop_type, "");
        assert_eq!(submission.payload.soil_type, "Loamy");
        assert_eq!(submission.payload.temperature, 29.0);
    }

    #[test]
    fn test_submit_while_loading_is_ignored() {
        let mut form = filled(PredictionMode::CropPrediction);
        assert!(form.begin_submit().is_some());
        assert!(form.begin_submit().is_none());
        assert!(form.is_loading());
    }

    #[test]
    fn test_complete_success_and_error_clear_loading() {
        let mut form = filled(PredictionMode::CropPrediction);
        let submission = form.begin_submit().unwrap();
        assert!(form.complete(
            submission.generation,
            submission.mode,
            Ok(PredictionResult::new(json!("Maize")))
        ));
        assert_eq!(form.result().map(|r| r.to_string()).as_deref(), Some("Maize"));
        assert!(form.error().is_none());

        let submission = form.begin_submit().unwrap();
        form.complete(
            submission.generation,
            submission.mode,
            Err(PredictionError::unexpected("boom")),
        );
        assert!(!form.is_loading());
        assert!(form.result().is_none());
        assert_eq!(
            form.error().map(|e| e.kind()),
            Some(PredictionErrorKind::Unexpected)
        );
    }

    #[test]
    fn test_mode_switch_preserves_values() {
        let mut form = filled(PredictionMode::CropPrediction);
        form.input.fertilizer_name = "Urea".into();
        let before = form.input.clone();

        form.set_mode(PredictionMode::SoilPrediction);
        form.set_mode(PredictionMode::FertilizerPrediction);

        assert_eq!(form.input, before);
        assert_eq!(form.mode, PredictionMode::FertilizerPrediction);
    }

    #[test]
    fn test_reset_clears_everything_but_mode() {
        let mut form = filled(PredictionMode::SoilPrediction);
        form.request = RequestState::Error(PredictionError::unexpected("x"));

        form.reset();

        assert!(form.input.is_empty());
        assert_eq!(form.request, RequestState::Idle);
        assert_eq!(form.mode, PredictionMode::SoilPrediction);
    }

    #[test]
    fn test_completion_after_reset_is_dropped() {
        let mut form = filled(PredictionMode::CropPrediction);
        let submission = form.begin_submit().unwrap();
        form.reset();

        assert!(!form.complete(
            submission.generation,
            submission.mode,
            Ok(PredictionResult::new(json!("Maize")))
        ));
        assert_eq!(form.request, RequestState::Idle);
    }

    #[test]
    fn test_set_field_ignores_disabled_target() {
        let mut form = PredictionFormState::new(PredictionMode::CropPrediction);
        assert!(!form.set_field(InputField::CropType, "Maize"));
        assert!(form.input.crop_type.is_empty());
        assert!(form.set_field(InputField::SoilType, "Red"));
    }

    #[test]
    fn test_cycle_field_walks_catalog() {
        let mut form = PredictionFormState::new(PredictionMode::CropPrediction);
        assert!(form.cycle_field(InputField::SoilType, true));
        assert_eq!(form.input.soil_type, "Sandy");
        assert!(form.cycle_field(InputField::SoilType, false));
        assert_eq!(form.input.soil_type, "");
        assert!(!form.cycle_field(InputField::Humidity, true));
    }

    #[test]
    fn test_focus_skips_disabled_inputs() {
        let mut form = PredictionFormState::new(PredictionMode::CropPrediction);
        form.focus = FormFocus::Input(InputField::SoilType);
        form.focus_next();
        assert_eq!(form.focus, FormFocus::Input(InputField::Nitrogen));
        form.focus_prev();
        assert_eq!(form.focus, FormFocus::Input(InputField::SoilType));
    }

    #[test]
    fn test_focus_wraps_through_mode_selector() {
        let mut form = PredictionFormState::new(PredictionMode::FertilizerPrediction);
        form.focus = FormFocus::Input(InputField::Phosphorous);
        form.focus_next();
        assert_eq!(form.focus, FormFocus::Mode);
        form.focus_prev();
        assert_eq!(form.focus, FormFocus::Input(InputField::Phosphorous));
    }

    #[test]
    fn test_mode_change_moves_focus_off_new_target() {
        let mut form = PredictionFormState::new(PredictionMode::CropPrediction);
        form.focus = FormFocus::Input(InputField::SoilType);

        form.set_mode(PredictionMode::SoilPrediction);

        assert_eq!(form.focus, FormFocus::Input(InputField::CropType));
    }
}
