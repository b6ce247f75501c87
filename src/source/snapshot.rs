//! Input snapshot format.
//!
//! One JSON object per run. Only `context` is required; each domain section
//! may be left out, in which case that domain is skipped.
//!
//! ```json
//! {
//!   "context": {"machine_id": "P-101", "rpm": 2950, "fluid": "diesel"},
//!   "temperatures": {"Pump_DE": 65, "Pump_NDE": 63, "Motor_DE": 68, "Motor_NDE": 66},
//!   "vibration": {"points": {"Pump DE Horizontal": {...}, ...}, "fft_peaks": [...]},
//!   "hydraulic": {"suction_pressure_bar": 0.44, ..., "design": {...}},
//!   "electrical": {"voltages": [...], "currents": [...], ...}
//! }
//! ```

use pumpdiag_types::{
    BearingTemperatures, DesignParameters, ElectricalMeasurement, FftPeak, FieldObservations,
    FluidKind, HydraulicMeasurement, SharedContext, VibrationSurvey,
};
use serde::{Deserialize, Serialize};

/// Timestamp format used when the snapshot does not carry one.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A complete measurement snapshot for one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementSnapshot {
    pub context: ContextSection,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperatures: Option<BearingTemperatures>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vibration: Option<VibrationSection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hydraulic: Option<HydraulicSection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub electrical: Option<ElectricalMeasurement>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextSection {
    pub machine_id: String,
    pub rpm: u32,
    #[serde(default)]
    pub fluid: FluidKind,
    /// Assessment time; local time is used when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

/// Twelve-point survey plus the spectral peaks of the champion point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VibrationSection {
    pub points: VibrationSurvey,
    #[serde(default)]
    pub fft_peaks: Vec<FftPeak>,
}

/// Hydraulic readings. Fluid properties follow the context's fluid, with an
/// optional field-measured specific gravity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HydraulicSection {
    pub suction_pressure_bar: f64,
    pub discharge_pressure_bar: f64,
    pub flow_m3h: f64,
    pub motor_power_kw: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specific_gravity: Option<f64>,
    pub design: DesignParameters,
    #[serde(default)]
    pub observations: FieldObservations,
}

impl HydraulicSection {
    /// Combine with the fluid reference table into a full measurement.
    pub fn measurement(&self, fluid: FluidKind) -> HydraulicMeasurement {
        let mut properties = fluid.properties();
        if let Some(sg) = self.specific_gravity {
            properties = properties.with_specific_gravity(sg);
        }
        HydraulicMeasurement {
            suction_pressure_bar: self.suction_pressure_bar,
            discharge_pressure_bar: self.discharge_pressure_bar,
            flow_m3h: self.flow_m3h,
            motor_power_kw: self.motor_power_kw,
            fluid: properties,
            design: self.design,
            observations: self.observations,
        }
    }
}

impl MeasurementSnapshot {
    /// Build the run context, stamping local time when no timestamp is given.
    pub fn shared_context(&self) -> SharedContext {
        let ctx = &self.context;
        let timestamp = match &ctx.timestamp {
            Some(ts) => ts.clone(),
            None => chrono::Local::now().format(TIMESTAMP_FORMAT).to_string(),
        };
        SharedContext::new(ctx.machine_id.clone(), ctx.rpm, ctx.fluid, timestamp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pumpdiag_types::{BearingLocation, NoiseType};

    #[test]
    fn test_deserialize_minimal_snapshot() {
        let json = r#"{"context": {"machine_id": "P-101", "rpm": 2950}}"#;
        let snapshot: MeasurementSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.context.fluid, FluidKind::Diesel);
        assert!(snapshot.temperatures.is_none());
        assert!(snapshot.hydraulic.is_none());
    }

    #[test]
    fn test_shared_context_keeps_given_timestamp() {
        let json = r#"{"context": {"machine_id": "P-101", "rpm": 2950, "fluid": "pertalite",
                       "timestamp": "2026-01-05 08:30:00"}}"#;
        let snapshot: MeasurementSnapshot = serde_json::from_str(json).unwrap();
        let ctx = snapshot.shared_context();
        assert_eq!(ctx.timestamp, "2026-01-05 08:30:00");
        assert_eq!(ctx.fluid, FluidKind::Pertalite);
    }

    #[test]
    fn test_shared_context_stamps_local_time() {
        let json = r#"{"context": {"machine_id": "P-101", "rpm": 2950}}"#;
        let snapshot: MeasurementSnapshot = serde_json::from_str(json).unwrap();
        let ts = snapshot.shared_context().timestamp;
        assert!(chrono::NaiveDateTime::parse_from_str(&ts, TIMESTAMP_FORMAT).is_ok(), "{ts}");
    }

    #[test]
    fn test_temperature_keys_are_checked() {
        let json = r#"{"context": {"machine_id": "P-101", "rpm": 2950},
                       "temperatures": {"Pump_DE": 65, "Pump_NDE": 0, "Motor_DE": 68, "Motor_NDE": 66}}"#;
        let snapshot: MeasurementSnapshot = serde_json::from_str(json).unwrap();
        let temps = snapshot.temperatures.unwrap();
        assert_eq!(temps.reading(BearingLocation::PumpNde), None);

        let missing = r#"{"context": {"machine_id": "P-101", "rpm": 2950},
                          "temperatures": {"Pump_DE": 65, "Motor_DE": 68, "Motor_NDE": 66}}"#;
        assert!(serde_json::from_str::<MeasurementSnapshot>(missing).is_err());

        let unknown = r#"{"context": {"machine_id": "P-101", "rpm": 2950},
                          "temperatures": {"Pump_DE": 65, "Pump_NDE": 63, "Motor_DE": 68,
                                           "Motor_NDE": 66, "Gearbox": 70}}"#;
        assert!(serde_json::from_str::<MeasurementSnapshot>(unknown).is_err());
    }

    #[test]
    fn test_hydraulic_section_sg_override() {
        let json = r#"{
            "suction_pressure_bar": 0.44, "discharge_pressure_bar": 3.73,
            "flow_m3h": 100, "motor_power_kw": 15, "specific_gravity": 0.86,
            "design": {"rated_flow_m3h": 100, "rated_head_m": 40},
            "observations": {"noise": "Crackling"}
        }"#;
        let section: HydraulicSection = serde_json::from_str(json).unwrap();
        let m = section.measurement(FluidKind::Diesel);
        assert_eq!(m.fluid.specific_gravity, 0.86);
        assert_eq!(m.fluid.vapor_pressure_kpa, 0.5);
        assert_eq!(m.design.bep_efficiency_percent, 0.0);
        assert_eq!(m.observations.noise, NoiseType::Crackling);
    }
}
