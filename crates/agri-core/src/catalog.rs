//! Categorical values accepted by the prediction service
//!
//! The prediction models were trained on a fixed vocabulary, so the form only
//! offers these values. Cycling always includes an empty slot so a value can
//! be unset again.

/// Soil types understood by the prediction models
pub const SOIL_TYPES: &[&str] = &["Sandy", "Loamy", "Black", "Red", "Clayey"];

/// Crop types understood by the prediction models
pub const CROP_TYPES: &[&str] = &[
    "Maize",
    "Sugarcane",
    "Cotton",
    "Tobacco",
    "Paddy",
    "Barley",
    "Wheat",
    "Millets",
    "Oil seeds",
    "Pulses",
    "Ground Nuts",
];

/// Fertilizer names understood by the prediction models
pub const FERTILIZERS: &[&str] = &[
    "Urea", "DAP", "14-35-14", "28-28", "17-17-17", "20-20", "10-26-26",
];

/// Step through `options` starting from `current`.
///
/// The sequence is `["", options[0], .., options[n-1]]` and wraps in both
/// directions. A `current` value that is not in the list is treated as the
/// empty slot.
pub fn cycle_option(options: &[&str], current: &str, forward: bool) -> String {
    if options.is_empty() {
        return String::new();
    }

    // Slot 0 is the empty value, slots 1..=n are the options
    let slots = options.len() + 1;
    let position = options
        .iter()
        .position(|o| *o == current)
        .map(|i| i + 1)
        .unwrap_or(0);

    let next = if forward {
        (position + 1) % slots
    } else {
        (position + slots - 1) % slots
    };

    if next == 0 {
        String::new()
    } else {
        options[next - 1].to_string()
    }
}

/// Whether `value` is one of the known `options` (exact match)
pub fn is_known(options: &[&str], value: &str) -> bool {
    options.contains(&value)
}
