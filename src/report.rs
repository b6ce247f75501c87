//! Plain-text diagnostic report.
//!
//! The layout is a fixed-section export consumed by downstream tooling, so
//! every line is produced verbatim here. Rendering never fails: missing
//! optional values print as `N/A`.

use pumpdiag_types::{
    BearingLocation, BearingTemperatures, DetailKey, DiagnosisResult, ElectricalMeasurement,
    HydraulicMeasurement, IntegratedDiagnosisResult, SharedContext, VibrationSurvey,
};

use crate::calc::{ElectricalParameters, HydraulicParameters};
use crate::thresholds::ZoneBoundaries;

const NOT_AVAILABLE: &str = "N/A";

/// Mechanical section inputs.
#[derive(Debug, Clone, Copy)]
pub struct MechanicalSummary<'a> {
    pub survey: &'a VibrationSurvey,
    pub result: &'a DiagnosisResult,
}

/// Hydraulic section inputs.
#[derive(Debug, Clone, Copy)]
pub struct HydraulicSummary<'a> {
    pub measurement: &'a HydraulicMeasurement,
    pub parameters: &'a HydraulicParameters,
    pub result: &'a DiagnosisResult,
}

/// Electrical section inputs.
#[derive(Debug, Clone, Copy)]
pub struct ElectricalSummary<'a> {
    pub measurement: &'a ElectricalMeasurement,
    pub parameters: &'a ElectricalParameters,
    pub result: &'a DiagnosisResult,
}

/// Everything the report can show. Absent parts render as empty sections.
#[derive(Debug, Clone, Copy)]
pub struct ReportData<'a> {
    pub context: &'a SharedContext,
    pub temperatures: Option<&'a BearingTemperatures>,
    pub mechanical: Option<MechanicalSummary<'a>>,
    pub hydraulic: Option<HydraulicSummary<'a>>,
    pub electrical: Option<ElectricalSummary<'a>>,
    pub integrated: Option<&'a IntegratedDiagnosisResult>,
}

impl<'a> ReportData<'a> {
    /// A report with only the header filled in.
    pub fn new(context: &'a SharedContext) -> Self {
        Self {
            context,
            temperatures: None,
            mechanical: None,
            hydraulic: None,
            electrical: None,
            integrated: None,
        }
    }
}

fn temperature(temps: &BearingTemperatures, location: BearingLocation) -> String {
    match temps.reading(location) {
        Some(t) => format!("{}: {t:.1}°C", location.as_str()),
        None => format!("{}: {NOT_AVAILABLE}°C", location.as_str()),
    }
}

/// Render the report. Lines are joined by `\n` and every section ends with a
/// blank line.
pub fn render_report(data: &ReportData<'_>, zones: &ZoneBoundaries) -> String {
    let ctx = data.context;
    let mut lines: Vec<String> = vec![
        format!("MULTI-DOMAIN PUMP DIAGNOSTIC REPORT - {}", ctx.machine_id.to_uppercase()),
        format!("Generated: {}", ctx.timestamp),
        format!("RPM: {} | 1x RPM: {:.2} Hz", ctx.rpm, ctx.running_speed_hz()),
        "Standards: ISO 10816-3/7 (Mech) | API 610 (Hyd) | IEC 60034 (Elec)".to_string(),
        String::new(),
    ];

    if let Some(temps) = data.temperatures {
        lines.push("=== BEARING TEMPERATURE ===".to_string());
        lines.push(format!(
            "{} | {}",
            temperature(temps, BearingLocation::PumpDe),
            temperature(temps, BearingLocation::PumpNde)
        ));
        lines.push(format!(
            "{} | {}",
            temperature(temps, BearingLocation::MotorDe),
            temperature(temps, BearingLocation::MotorNde)
        ));
        if let Some(d) = temps.delta(BearingLocation::PumpDe, BearingLocation::PumpNde) {
            lines.push(format!("Pump ΔT (DE-NDE): {d:.1}°C"));
        }
        if let Some(d) = temps.delta(BearingLocation::MotorDe, BearingLocation::MotorNde) {
            lines.push(format!("Motor ΔT (DE-NDE): {d:.1}°C"));
        }
        lines.push(String::new());
    }

    lines.push("=== MECHANICAL VIBRATION ===".to_string());
    if let Some(mech) = data.mechanical {
        lines.push("POINT,Overall_Vel(mm/s),Band1(g),Band2(g),Band3(g),Status".to_string());
        for (point, r) in mech.survey.iter() {
            lines.push(format!(
                "{point},{:.2},{:.3},{:.3},{:.3},{}",
                r.velocity,
                r.band1,
                r.band2,
                r.band3,
                zones.label(r.velocity)
            ));
        }
        lines.push(format!("System Diagnosis: {}", mech.result.diagnosis));
        lines.push(format!("Champion Point: {}", mech.result.champion_label()));
    }
    lines.push(String::new());

    lines.push("=== HYDRAULIC PERFORMANCE ===".to_string());
    if let Some(hyd) = data.hydraulic {
        let m = hyd.measurement;
        let p = hyd.parameters;
        lines.push(format!(
            "Fluid: {} | SG: {}",
            m.fluid.kind.name(),
            m.fluid.specific_gravity
        ));
        lines.push(format!(
            "Suction: {:.2} bar | Discharge: {:.2} bar",
            m.suction_pressure_bar, m.discharge_pressure_bar
        ));
        lines.push(format!("Flow: {:.1} m³/h | Power: {:.1} kW", m.flow_m3h, m.motor_power_kw));
        lines.push(format!(
            "Calculated Head: {:.1} m | Efficiency: {:.1}%",
            p.head_m, p.efficiency_percent
        ));
        lines.push(format!("NPSH Margin: {:.2} m", hyd.result.detail(DetailKey::NpshMargin)));
        lines.push(result_line(hyd.result));
    }
    lines.push(String::new());

    lines.push("=== ELECTRICAL CONDITION ===".to_string());
    if let Some(elec) = data.electrical {
        let [v12, v23, v31] = elec.measurement.voltages;
        let [i1, i2, i3] = elec.measurement.currents;
        let p = elec.parameters;
        lines.push(format!("Voltage L1-L2: {v12:.1}V | L2-L3: {v23:.1}V | L3-L1: {v31:.1}V"));
        lines.push(format!("Current L1: {i1:.1}A | L2: {i2:.1}A | L3: {i3:.1}A"));
        lines.push(format!(
            "Voltage Unbalance: {:.2}% | Current Unbalance: {:.2}%",
            p.voltage_unbalance_percent, p.current_unbalance_percent
        ));
        lines.push(format!("Load Estimate: {:.1}%", p.load_estimate_percent));
        lines.push(result_line(elec.result));
    }
    lines.push(String::new());

    lines.push("=== INTEGRATED DIAGNOSIS ===".to_string());
    match data.integrated {
        Some(integrated) => {
            lines.push(format!("Overall Diagnosis: {}", integrated.diagnosis));
            lines.push(format!("Overall Confidence: {}%", integrated.confidence));
            lines.push(format!("Overall Severity: {}", integrated.severity));
            lines.push(format!("Correlation Notes: {}", integrated.correlation_notes.join("; ")));
            if !integrated.temperature_notes.is_empty() {
                lines.push(format!("Temperature Notes: {}", integrated.temperature_notes.join("; ")));
            }
        }
        None => {
            lines.push(format!("Overall Diagnosis: {NOT_AVAILABLE}"));
            lines.push(format!("Overall Confidence: {NOT_AVAILABLE}"));
            lines.push(format!("Overall Severity: {NOT_AVAILABLE}"));
            lines.push(format!("Correlation Notes: {NOT_AVAILABLE}"));
        }
    }
    lines.push(String::new());

    lines.join("\n")
}

fn result_line(result: &DiagnosisResult) -> String {
    format!(
        "Diagnosis: {} | Confidence: {}% | Severity: {}",
        result.diagnosis, result.confidence, result.severity
    )
}
