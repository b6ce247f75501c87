//! Three-phase supply calculations.

use pumpdiag_types::ElectricalMeasurement;
use serde::Serialize;

use super::ratio_or_zero;
use crate::thresholds::ElectricalLimits;

/// Quantities derived from one electrical measurement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ElectricalParameters {
    pub v_avg: f64,
    pub i_avg: f64,
    pub voltage_unbalance_percent: f64,
    pub current_unbalance_percent: f64,
    /// Average current as percent of full-load amps.
    pub load_estimate_percent: f64,
    /// Average voltage as percent of rated, `0` when rated voltage is not positive.
    pub voltage_ratio_percent: f64,
    pub voltage_within_tolerance: bool,
}

impl ElectricalParameters {
    pub fn compute(m: &ElectricalMeasurement, limits: &ElectricalLimits) -> Self {
        let (v_avg, voltage_unbalance_percent) = unbalance(m.voltages);
        let (i_avg, current_unbalance_percent) = unbalance(m.currents);
        let voltage_ratio_percent = ratio_or_zero(v_avg * 100.0, m.rated_voltage);
        let voltage_within_tolerance = (limits.voltage_tolerance_low..=limits.voltage_tolerance_high)
            .contains(&voltage_ratio_percent);

        Self {
            v_avg,
            i_avg,
            voltage_unbalance_percent,
            current_unbalance_percent,
            load_estimate_percent: ratio_or_zero(i_avg, m.full_load_amps) * 100.0,
            voltage_ratio_percent,
            voltage_within_tolerance,
        }
    }
}

/// Average of three phase values and the NEMA unbalance: max deviation from
/// the average, as percent of the average.
pub fn unbalance(phases: [f64; 3]) -> (f64, f64) {
    let avg = phases.iter().sum::<f64>() / 3.0;
    let max_deviation = phases
        .iter()
        .map(|x| (x - avg).abs())
        .fold(0.0, f64::max);
    (avg, ratio_or_zero(max_deviation, avg) * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn measurement(voltages: [f64; 3], currents: [f64; 3]) -> ElectricalMeasurement {
        ElectricalMeasurement {
            voltages,
            currents,
            rated_voltage: 400.0,
            full_load_amps: 85.0,
        }
    }

    #[test]
    fn test_reference_supply() {
        let p = ElectricalParameters::compute(
            &measurement([400.0, 402.0, 398.0], [82.0, 84.0, 83.0]),
            &ElectricalLimits::default(),
        );
        assert_eq!(p.v_avg, 400.0);
        assert!((p.voltage_unbalance_percent - 0.5).abs() < 1e-9);
        assert!((p.current_unbalance_percent - 1.2048).abs() < 1e-3);
        assert!((p.load_estimate_percent - 97.647).abs() < 1e-3);
        assert!(p.voltage_within_tolerance);
    }

    #[test]
    fn test_unbalance_invariant_under_scaling() {
        let (_, base) = unbalance([400.0, 402.0, 398.0]);
        for k in [0.5, 2.0, 17.3] {
            let (_, scaled) = unbalance([400.0 * k, 402.0 * k, 398.0 * k]);
            assert!((scaled - base).abs() < 1e-9, "k = {k}");
        }
    }

    #[test]
    fn test_zero_phases_degrade_to_zero() {
        let p = ElectricalParameters::compute(&measurement([0.0; 3], [0.0; 3]), &ElectricalLimits::default());
        assert_eq!(p.voltage_unbalance_percent, 0.0);
        assert_eq!(p.current_unbalance_percent, 0.0);
        assert_eq!(p.load_estimate_percent, 0.0);
        assert!(!p.voltage_within_tolerance);
    }

    #[test]
    fn test_zero_rating_guards() {
        let mut m = measurement([400.0; 3], [80.0; 3]);
        m.rated_voltage = 0.0;
        m.full_load_amps = 0.0;
        let p = ElectricalParameters::compute(&m, &ElectricalLimits::default());
        assert_eq!(p.voltage_ratio_percent, 0.0);
        assert_eq!(p.load_estimate_percent, 0.0);
        assert!(!p.voltage_within_tolerance);
    }

    #[test]
    fn test_tolerance_bounds_inclusive() {
        let limits = ElectricalLimits::default();
        assert!(ElectricalParameters::compute(&measurement([360.0; 3], [80.0; 3]), &limits).voltage_within_tolerance);
        assert!(ElectricalParameters::compute(&measurement([440.0; 3], [80.0; 3]), &limits).voltage_within_tolerance);
        assert!(!ElectricalParameters::compute(&measurement([359.0; 3], [80.0; 3]), &limits).voltage_within_tolerance);
    }
}
