//! Rule-based domain classifiers.
//!
//! Each classifier is a closed, ordered guard chain that settles on exactly
//! one diagnosis code per run. Anything no rule recognises falls through to
//! the domain's `Undiagnosed` code.
//!
//! ```text
//! VibrationSurvey + FFT peaks ──▶ mechanical::diagnose ──┐
//! HydraulicParameters ─────────▶ hydraulic::diagnose ───┼──▶ aggregate
//! ElectricalParameters ────────▶ electrical::diagnose ──┘        ▲
//! BearingTemperatures ─────────▶ temperature::adjust ────────────┘
//! ```

pub mod electrical;
pub mod hydraulic;
pub mod mechanical;
pub mod temperature;

pub use temperature::{TemperatureAdjustment, TemperatureBand};

/// `base + round(bonus)`, clamped to `[0, cap]`.
pub(crate) fn score(base: u8, bonus: f64, cap: u8) -> u8 {
    let value = f64::from(base) + bonus.round();
    if value.is_nan() {
        return base.min(cap);
    }
    value.clamp(0.0, f64::from(cap)) as u8
}
