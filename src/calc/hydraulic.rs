//! Hydraulic operating point calculations.

use pumpdiag_types::{DesignParameters, HydraulicMeasurement};
use serde::Serialize;

use super::ratio_or_zero;

/// Metres of water column per bar.
const METRES_PER_BAR: f64 = 10.2;
const GRAVITY: f64 = 9.81;
const SECONDS_PER_HOUR: f64 = 3600.0;
/// Standard atmosphere, bar.
const ATMOSPHERE_BAR: f64 = 1.013;
/// Assumed motor efficiency when estimating shaft power.
const MOTOR_EFFICIENCY: f64 = 0.90;

/// Quantities derived from one hydraulic measurement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HydraulicParameters {
    pub delta_p_bar: f64,
    pub head_m: f64,
    pub hydraulic_power_kw: f64,
    pub efficiency_percent: f64,
    /// Available NPSH from suction pressure and vapor pressure, m.
    pub npsh_available_m: f64,
}

impl HydraulicParameters {
    pub fn compute(m: &HydraulicMeasurement) -> Self {
        let sg = m.fluid.specific_gravity;
        if sg <= 0.0 {
            tracing::warn!(sg, "non-positive specific gravity, head and NPSH degrade to zero");
        }

        let delta_p_bar = m.discharge_pressure_bar - m.suction_pressure_bar;
        let head_m = ratio_or_zero(delta_p_bar * METRES_PER_BAR, sg);
        let hydraulic_power_kw = hydraulic_power_kw(m.flow_m3h, head_m, sg);
        let efficiency_percent = ratio_or_zero(hydraulic_power_kw, m.motor_power_kw) * 100.0;
        let npsh_available_m =
            npsh_available(m.suction_pressure_bar, m.fluid.vapor_pressure_kpa, sg);

        Self {
            delta_p_bar,
            head_m,
            hydraulic_power_kw,
            efficiency_percent,
            npsh_available_m,
        }
    }
}

/// Hydraulic power, kW. Zero unless both flow and head are positive.
pub fn hydraulic_power_kw(flow_m3h: f64, head_m: f64, sg: f64) -> f64 {
    if flow_m3h > 0.0 && head_m > 0.0 {
        flow_m3h * head_m * sg * GRAVITY / SECONDS_PER_HOUR
    } else {
        0.0
    }
}

/// Net positive suction head available, m.
pub fn npsh_available(suction_bar: f64, vapor_pressure_kpa: f64, sg: f64) -> f64 {
    let suction_abs_kpa = (suction_bar + ATMOSPHERE_BAR) * 100.0;
    ratio_or_zero(suction_abs_kpa - vapor_pressure_kpa, sg * GRAVITY)
}

/// BEP efficiency estimated from the rated point and installed motor power, percent.
pub fn estimate_bep_efficiency(rated_flow_m3h: f64, rated_head_m: f64, motor_power_kw: f64, sg: f64) -> f64 {
    let design_hydraulic_kw = rated_flow_m3h * rated_head_m * sg * GRAVITY / SECONDS_PER_HOUR;
    let shaft_kw = motor_power_kw * MOTOR_EFFICIENCY;
    if shaft_kw > 0.0 && design_hydraulic_kw > 0.0 {
        (design_hydraulic_kw / shaft_kw * 100.0).clamp(50.0, 90.0)
    } else {
        75.0
    }
}

/// Conservative NPSH required by rated flow class, m.
pub fn estimate_npsh_required(rated_flow_m3h: f64) -> f64 {
    if rated_flow_m3h < 50.0 {
        3.0
    } else if rated_flow_m3h < 200.0 {
        4.0
    } else {
        5.5
    }
}

/// Fill in BEP efficiency and NPSH required when the data sheet left them out.
///
/// Returns the completed measurement and one note per estimated value.
pub fn resolve_design(mut m: HydraulicMeasurement) -> (HydraulicMeasurement, Vec<String>) {
    let mut notes = Vec::new();
    let DesignParameters {
        rated_flow_m3h,
        rated_head_m,
        ..
    } = m.design;

    if m.design.bep_efficiency_percent <= 0.0 {
        let estimate = estimate_bep_efficiency(
            rated_flow_m3h,
            rated_head_m,
            m.motor_power_kw,
            m.fluid.specific_gravity,
        );
        m.design.bep_efficiency_percent = estimate;
        notes.push(format!("BEP estimated: {estimate:.1}%"));
    }

    if m.design.npsh_required_m <= 0.0 {
        let estimate = estimate_npsh_required(rated_flow_m3h);
        m.design.npsh_required_m = estimate;
        notes.push(format!("NPSHr estimated: {estimate:.1} m"));
    }

    for note in &notes {
        tracing::info!("{note}");
    }
    (m, notes)
}
