//! Calculator Module - Pure display scale math.
//!
//! Side-effect-free functions deriving scale comparisons from two display
//! profiles. Everything here is independent of the form model and the
//! controller so it can be used (and tested) on its own.
//!
//! # API
//!
//! - `round2` - 2-decimal rounding used at every internal stage
//! - `pixels_per_inch` - raw pixel density from resolution and diagonal
//! - `effective_ppi` - density adjusted by the display's own scale setting
//! - `percentage` - ratio to 2-decimal percentage
//! - `DerivedResult::derive` - the full derivation from an `InputSnapshot`
//! - `fmt_fixed` - fixed-decimal display formatting
//!
//! # Example
//!
//! ```ignore
//! use scale_tui::calc::{pixels_per_inch, effective_ppi, percentage};
//!
//! let ppi = pixels_per_inch(1920.0, 1080.0, 15.6); // 141.21
//! let eff = effective_ppi(ppi, 150.0);
//! let scale = percentage(ppi / eff);
//! ```
//!
//! Degenerate inputs are policy, not errors: unparsable fields arrive here as
//! `NaN`, a zero diagonal or zero scale produces `Infinity`, and both flow
//! through every formula unchecked.

// =============================================================================
// FORMULAS
// =============================================================================

/// Round to 2 decimal places, ties away from zero.
///
/// Every internal stage rounds independently at 2 decimals before the display
/// formatting applies its own precision. The two-stage rounding is part of the
/// observable output and must not be collapsed into a single final rounding.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Raw pixel density: diagonal pixel count over diagonal inches.
///
/// The diagonal pixel count is the Euclidean norm of the resolution. A zero
/// diagonal yields `Infinity` - division by zero is deliberate here.
pub fn pixels_per_inch(pixel_width: f64, pixel_height: f64, diagonal_inches: f64) -> f64 {
    let diagonal_pixels = (pixel_width * pixel_width + pixel_height * pixel_height).sqrt();
    round2(diagonal_pixels / diagonal_inches)
}

/// Density adjusted by the display's own scale setting.
///
/// Converts the percentage to a fractional multiplier before dividing, so a
/// 200% scale halves the effective density. A zero scale yields `Infinity`.
/// No rounding at this stage.
pub fn effective_ppi(raw_ppi: f64, scale_percent: f64) -> f64 {
    raw_ppi / (scale_percent / 100.0)
}

/// Ratio to percentage, rounded to 2 decimals.
pub fn percentage(ratio: f64) -> f64 {
    round2(ratio * 100.0)
}

/// Format a value with a fixed number of decimals for an output slot.
///
/// Non-finite values render the way Rust formats them (`NaN`, `inf`); they
/// reach the output slots verbatim rather than being rejected.
pub fn fmt_fixed(value: f64, decimals: usize) -> String {
    format!("{:.*}", decimals, value)
}

// =============================================================================
// SNAPSHOT AND RESULT
// =============================================================================

/// The eight numeric inputs read from the form at one instant.
///
/// Each value is the parse of the corresponding field's text; a failed parse
/// is `NaN` and propagates silently through the derivation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InputSnapshot {
    pub old_width: f64,
    pub old_height: f64,
    pub old_size: f64,
    pub old_scale: f64,
    pub new_width: f64,
    pub new_height: f64,
    pub new_size: f64,
    pub new_scale: f64,
}

/// Everything the widget displays, recomputed in full on every event.
///
/// Values are kept at their internal precision; display rounding happens in
/// the controller via `fmt_fixed` (percentages and densities at 0 decimals,
/// font size at 1).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedResult {
    /// How much to scale new-display UI relative to old: the ratio of
    /// effective (scale-adjusted) densities, old over new.
    pub size_scale_percent: f64,
    /// Ratio of new to old nominal scale setting - a proxy for rendering
    /// quality headroom, deliberately not based on pixel density.
    pub quality_percent: f64,
    /// `16 x (size_scale_percent / 100)`.
    pub font_size: f64,
    pub old_ppi_raw: f64,
    pub old_ppi_effective: f64,
    pub new_ppi_raw: f64,
    pub new_ppi_effective: f64,
}

impl DerivedResult {
    /// Derive the full result set from a snapshot. Pure.
    pub fn derive(snapshot: &InputSnapshot) -> Self {
        let old_ppi = pixels_per_inch(snapshot.old_width, snapshot.old_height, snapshot.old_size);
        let new_ppi = pixels_per_inch(snapshot.new_width, snapshot.new_height, snapshot.new_size);
        let old_ppi_effective = effective_ppi(old_ppi, snapshot.old_scale);
        let new_ppi_effective = effective_ppi(new_ppi, snapshot.new_scale);
        let size_scale_percent = percentage(old_ppi_effective / new_ppi_effective);
        let quality_percent = percentage(snapshot.new_scale / snapshot.old_scale);
        let font_size = 16.0 * (size_scale_percent / 100.0);

        Self {
            size_scale_percent,
            quality_percent,
            font_size,
            old_ppi_raw: old_ppi,
            old_ppi_effective,
            new_ppi_raw: new_ppi,
            new_ppi_effective,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
