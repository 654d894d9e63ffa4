//! Application state (Model in TEA pattern)

use agri_core::Field;

use crate::config::Settings;
use crate::field_manager::FieldManagerState;
use crate::field_store::FieldStore;
use crate::prediction_form::PredictionFormState;

/// Top-level screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    /// Prediction form (F1)
    #[default]
    Predict,
    /// Field list (F2)
    Fields,
}

impl Screen {
    pub fn title(&self) -> &'static str {
        match self {
            Screen::Predict => "Predict",
            Screen::Fields => "Fields",
        }
    }
}

/// Which surface receives key input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    /// The current screen
    Normal,
    /// Field create/edit dialog
    FieldDialog,
    /// Delete confirmation prompt
    ConfirmDelete,
    /// Quit confirmation prompt
    ConfirmQuit,
}

/// Application lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppPhase {
    #[default]
    Running,
    Quitting,
}

/// Complete application state (the Model in TEA)
#[derive(Debug)]
pub struct AppState {
    pub screen: Screen,

    /// Application settings from config file
    pub settings: Settings,

    pub prediction: PredictionFormState,

    /// Records last received from the field store
    pub field_store: FieldStore,

    pub field_manager: FieldManagerState,

    /// Quit confirmation dialog is showing
    pub quit_prompt: bool,

    pub phase: AppPhase,

    /// Animation frame counter, advanced on every tick
    pub tick: u64,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::with_settings(Settings::default())
    }

    pub fn with_settings(settings: Settings) -> Self {
        Self {
            screen: Screen::default(),
            prediction: PredictionFormState::new(settings.ui.default_mode),
            field_store: FieldStore::new(),
            field_manager: FieldManagerState::new(
                settings.ui.show_archived,
                settings.store.hard_delete,
            ),
            quit_prompt: false,
            phase: AppPhase::Running,
            tick: 0,
            settings,
        }
    }

    /// Modal surfaces take precedence over the screen
    pub fn ui_mode(&self) -> UiMode {
        if self.quit_prompt {
            UiMode::ConfirmQuit
        } else if self.field_manager.pending_delete.is_some() {
            UiMode::ConfirmDelete
        } else if self.field_manager.dialog.is_some() {
            UiMode::FieldDialog
        } else {
            UiMode::Normal
        }
    }

    /// Records shown in the field list
    pub fn visible_fields(&self) -> Vec<&Field> {
        self.field_store.visible(self.field_manager.show_archived)
    }

    /// Record under the list cursor
    pub fn selected_field(&self) -> Option<&Field> {
        self.visible_fields()
            .get(self.field_manager.selected)
            .copied()
    }

    /// Any remote call in flight
    pub fn has_pending_requests(&self) -> bool {
        self.prediction.is_loading()
            || self.field_store.is_loading()
            || self
                .field_manager
                .dialog
                .as_ref()
                .is_some_and(|d| d.submitting)
            || self
                .field_manager
                .pending_delete
                .as_ref()
                .is_some_and(|p| p.deleting)
    }

    /// Request quit (may show confirmation dialog)
    pub fn request_quit(&mut self) {
        if self.settings.ui.confirm_quit && self.has_pending_requests() {
            self.quit_prompt = true;
        } else {
            self.phase = AppPhase::Quitting;
        }
    }

    /// Force quit without confirmation
    pub fn force_quit(&mut self) {
        self.phase = AppPhase::Quitting;
    }

    /// Confirm quit (from confirmation dialog)
    pub fn confirm_quit(&mut self) {
        self.phase = AppPhase::Quitting;
    }

    /// Cancel quit (from confirmation dialog)
    pub fn cancel_quit(&mut self) {
        self.quit_prompt = false;
    }

    /// Check if the app should quit
    pub fn should_quit(&self) -> bool {
        self.phase == AppPhase::Quitting
    }
}
