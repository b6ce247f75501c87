//! Bearing temperature evidence.
//!
//! Temperatures never produce a diagnosis of their own. They raise or lower
//! confidence in the mechanical finding and flag thermal patterns (DE/NDE
//! gradients, a motor running hotter than the pump) for the integrated
//! assessment.

use core::fmt;

use pumpdiag_types::{BearingLocation, BearingTemperatures};
use serde::Serialize;

use crate::thresholds::TemperatureLimits;

/// Largest total confidence bonus from temperature evidence.
pub const MAX_ADJUSTMENT: i32 = 20;
/// Largest total confidence penalty from temperature evidence.
pub const MIN_ADJUSTMENT: i32 = -10;

/// Band of a measured bearing temperature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum TemperatureBand {
    Normal,
    Elevated,
    Warning,
    Critical,
}

impl TemperatureBand {
    pub fn classify(celsius: f64, limits: &TemperatureLimits) -> Self {
        if celsius >= limits.critical {
            TemperatureBand::Critical
        } else if celsius >= limits.warning {
            TemperatureBand::Warning
        } else if celsius >= limits.elevated {
            TemperatureBand::Elevated
        } else {
            TemperatureBand::Normal
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TemperatureBand::Normal => "Normal",
            TemperatureBand::Elevated => "Elevated",
            TemperatureBand::Warning => "Warning",
            TemperatureBand::Critical => "Critical",
        }
    }

    /// Confidence change and note suffix for this band.
    fn evidence(self, consistent: bool) -> Option<(i32, &'static str)> {
        match (self, consistent) {
            (TemperatureBand::Critical, true) => Some((20, "Strong thermal confirmation")),
            (TemperatureBand::Critical, false) => Some((-10, "Review required")),
            (TemperatureBand::Warning, true) => Some((15, "Thermal confirmation")),
            (TemperatureBand::Warning, false) => Some((-5, "Monitor closely")),
            (TemperatureBand::Elevated, true) => Some((10, "Early thermal indication")),
            (TemperatureBand::Elevated, false) => Some((0, "Monitor trend")),
            (TemperatureBand::Normal, _) => None,
        }
    }
}

impl fmt::Display for TemperatureBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Measured locations with their bands, in evaluation order.
pub fn bands<'a>(
    temps: &'a BearingTemperatures,
    limits: &TemperatureLimits,
) -> impl Iterator<Item = (BearingLocation, f64, TemperatureBand)> + 'a {
    let limits = limits.clone();
    temps
        .present()
        .map(move |(loc, t)| (loc, t, TemperatureBand::classify(t, &limits)))
}

/// One note per measured bearing at Elevated or above.
pub fn band_notes(temps: &BearingTemperatures, limits: &TemperatureLimits) -> Vec<String> {
    bands(temps, limits)
        .filter(|(_, _, band)| *band >= TemperatureBand::Elevated)
        .map(|(loc, t, band)| format!("{loc}: {t:.1}°C ({band})"))
        .collect()
}

/// Whether any measured bearing has reached the critical bound.
pub fn any_critical(temps: &BearingTemperatures, limits: &TemperatureLimits) -> bool {
    temps.present().any(|(_, t)| t >= limits.critical)
}

/// Pump DE/NDE difference when both are measured and it exceeds the limit.
pub fn pump_gradient(temps: &BearingTemperatures, limits: &TemperatureLimits) -> Option<f64> {
    temps
        .delta(BearingLocation::PumpDe, BearingLocation::PumpNde)
        .filter(|d| *d > limits.delta)
}

/// Motor DE/NDE difference when both are measured and it exceeds the limit.
pub fn motor_gradient(temps: &BearingTemperatures, limits: &TemperatureLimits) -> Option<f64> {
    temps
        .delta(BearingLocation::MotorDe, BearingLocation::MotorNde)
        .filter(|d| *d > limits.delta)
}

/// Motor DE running markedly hotter than pump DE.
pub fn motor_hotter_than_pump(temps: &BearingTemperatures, limits: &TemperatureLimits) -> bool {
    match (
        temps.reading(BearingLocation::MotorDe),
        temps.reading(BearingLocation::PumpDe),
    ) {
        (Some(motor), Some(pump)) => motor > pump + limits.motor_over_pump,
        _ => false,
    }
}

/// Confidence delta and explanatory notes derived from bearing temperatures.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct TemperatureAdjustment {
    /// Total change in integrated confidence, within `[-10, 20]`.
    pub delta: i32,
    pub notes: Vec<String>,
}

/// Weigh temperature evidence against the mechanical finding.
///
/// `diagnosis_consistent` is true when the mechanical result reports a fault;
/// hot bearings then confirm it, otherwise they call for review.
pub fn adjust(
    temps: &BearingTemperatures,
    diagnosis_consistent: bool,
    limits: &TemperatureLimits,
) -> TemperatureAdjustment {
    let mut delta = 0;
    let mut notes = Vec::new();

    for (loc, t, band) in bands(temps, limits) {
        if let Some((change, remark)) = band.evidence(diagnosis_consistent) {
            delta += change;
            notes.push(format!("{loc}: {t:.1}°C ({band}) - {remark}"));
        }
    }

    if let Some(d) = pump_gradient(temps, limits) {
        delta += 5;
        notes.push(format!(
            "Pump DE-NDE ΔT: {d:.1}°C (>{:.0}°C) - Localized fault indicated",
            limits.delta
        ));
    }
    if let Some(d) = motor_gradient(temps, limits) {
        delta += 5;
        notes.push(format!(
            "Motor DE-NDE ΔT: {d:.1}°C (>{:.0}°C) - Localized fault indicated",
            limits.delta
        ));
    }
    if motor_hotter_than_pump(temps, limits) {
        notes.push("Motor DE > Pump DE - Possible electrical origin".to_string());
    }

    let delta = delta.clamp(MIN_ADJUSTMENT, MAX_ADJUSTMENT);
    tracing::debug!(delta, consistent = diagnosis_consistent, "temperature adjustment");
    TemperatureAdjustment { delta, notes }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limits() -> TemperatureLimits {
        TemperatureLimits::default()
    }

    #[test]
    fn test_band_boundaries() {
        let l = limits();
        assert_eq!(TemperatureBand::classify(69.9, &l), TemperatureBand::Normal);
        assert_eq!(TemperatureBand::classify(70.0, &l), TemperatureBand::Elevated);
        assert_eq!(TemperatureBand::classify(80.0, &l), TemperatureBand::Warning);
        assert_eq!(TemperatureBand::classify(90.0, &l), TemperatureBand::Critical);
    }

    #[test]
    fn test_critical_consistent_confirms() {
        let temps = BearingTemperatures::new(95.0, 0.0, 0.0, 0.0);
        let adj = adjust(&temps, true, &limits());
        assert_eq!(adj.delta, 20);
        assert_eq!(adj.notes, vec!["Pump_DE: 95.0°C (Critical) - Strong thermal confirmation".to_string()]);
    }

    #[test]
    fn test_critical_inconsistent_penalises() {
        let temps = BearingTemperatures::new(95.0, 0.0, 0.0, 0.0);
        let adj = adjust(&temps, false, &limits());
        assert_eq!(adj.delta, -10);
        assert!(adj.notes[0].ends_with("Review required"));
    }

    #[test]
    fn test_elevated_inconsistent_is_note_only() {
        let temps = BearingTemperatures::new(72.0, 0.0, 0.0, 0.0);
        let adj = adjust(&temps, false, &limits());
        assert_eq!(adj.delta, 0);
        assert_eq!(adj.notes.len(), 1);
    }

    #[test]
    fn test_total_clamped() {
        // Two critical plus a gradient would be +45
        let temps = BearingTemperatures::new(110.0, 92.0, 60.0, 0.0);
        assert_eq!(adjust(&temps, true, &limits()).delta, MAX_ADJUSTMENT);

        // Two warnings and a critical against a normal mechanical result
        let temps = BearingTemperatures::new(85.0, 85.0, 95.0, 0.0);
        assert_eq!(adjust(&temps, false, &limits()).delta, MIN_ADJUSTMENT);
    }

    #[test]
    fn test_gradient_needs_both_ends() {
        let temps = BearingTemperatures::new(68.0, 0.0, 0.0, 0.0);
        assert_eq!(pump_gradient(&temps, &limits()), None);

        let temps = BearingTemperatures::new(68.0, 50.0, 0.0, 0.0);
        assert_eq!(pump_gradient(&temps, &limits()), Some(18.0));
        let adj = adjust(&temps, false, &limits());
        assert_eq!(adj.delta, 5);
        assert_eq!(adj.notes, vec!["Pump DE-NDE ΔT: 18.0°C (>15°C) - Localized fault indicated".to_string()]);
    }

    #[test]
    fn test_motor_hotter_is_note_only() {
        let temps = BearingTemperatures::new(50.0, 0.0, 65.0, 0.0);
        assert!(motor_hotter_than_pump(&temps, &limits()));
        let adj = adjust(&temps, true, &limits());
        assert_eq!(adj.delta, 0);
        assert_eq!(adj.notes, vec!["Motor DE > Pump DE - Possible electrical origin".to_string()]);
    }

    #[test]
    fn test_not_measured_is_ignored() {
        let temps = BearingTemperatures::new(0.0, 0.0, 0.0, 0.0);
        let adj = adjust(&temps, true, &limits());
        assert_eq!(adj, TemperatureAdjustment::default());
        assert!(!any_critical(&temps, &limits()));
    }

    #[test]
    fn test_band_notes_skip_normal() {
        let temps = BearingTemperatures::new(82.0, 60.0, 71.0, 0.0);
        assert_eq!(
            band_notes(&temps, &limits()),
            vec!["Pump_DE: 82.0°C (Warning)".to_string(), "Motor_DE: 71.0°C (Elevated)".to_string()]
        );
    }
}
