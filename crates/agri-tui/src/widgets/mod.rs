//! Custom widget components

mod confirm_dialog;
mod field_dialog;
mod field_list;
mod header;
pub mod modal_overlay;
mod prediction_form;
mod status_bar;

pub use confirm_dialog::ConfirmDialog;
pub use field_dialog::FieldDialogView;
pub use field_list::FieldList;
pub use header::MainHeader;
pub use prediction_form::PredictionForm;
pub use status_bar::StatusBar;

/// Braille spinner frames, one per tick
const SPINNER: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub(crate) fn spinner(tick: u64) -> &'static str {
    SPINNER[(tick % SPINNER.len() as u64) as usize]
}
