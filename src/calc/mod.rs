//! Derived physical quantities.
//!
//! Pure transforms from raw measurements to the values the classifiers work
//! on. Every division is guarded and degrades to `0` instead of failing, so a
//! degenerate measurement still yields a deterministic diagnosis.
//!
//! ## Submodules
//!
//! - [`hydraulic`]: head, hydraulic power, efficiency, NPSH available, and
//!   estimation of missing design data
//! - [`electrical`]: phase averages, unbalance, load estimate

pub mod electrical;
pub mod hydraulic;

pub use electrical::ElectricalParameters;
pub use hydraulic::{resolve_design, HydraulicParameters};

/// `numerator / denominator`, or `0` when the denominator is not positive.
pub(crate) fn ratio_or_zero(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

/// Percent deviation of `actual` from `reference`, `0` when the reference is not positive.
pub(crate) fn deviation_percent(actual: f64, reference: f64) -> f64 {
    ratio_or_zero(actual - reference, reference) * 100.0
}
