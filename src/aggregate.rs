//! Cross-domain correlation.
//!
//! The three domain results are checked against a fixed set of coupling
//! rules. Every rule that matches adds its confidence bonus and a note; the
//! top-level label is taken from the last rule that matched.
//!
//! ```text
//! mechanical ─┐
//! hydraulic ──┼──▶ correlation rules ──▶ bonus + label + notes
//! electrical ─┘            │
//! temperatures ──▶ temperature::adjust ──▶ bonus + temperature notes
//!                                          │
//!                  mean(domain confidence) + bonus ──▶ [0, 95]
//! ```

use pumpdiag_types::{
    BearingTemperatures, CorrelationLabel, DetailKey, DiagnosisResult, ElectricalCode, FaultType,
    IntegratedDiagnosisResult, MechanicalCode, Severity,
};

use crate::diagnose::temperature;
use crate::thresholds::ThresholdConfig;

/// Highest confidence the integrated assessment may report.
pub const MAX_CONFIDENCE: u8 = 95;

/// One cross-domain coupling rule.
struct CorrelationRule {
    label: CorrelationLabel,
    bonus: i32,
    note: &'static str,
    matches: fn(&DiagnosisResult, &DiagnosisResult, &DiagnosisResult) -> bool,
}

/// Rules in evaluation order. Arguments are mechanical, hydraulic, electrical.
const RULES: [CorrelationRule; 3] = [
    CorrelationRule {
        label: CorrelationLabel::CoupledFault,
        bonus: 15,
        note: "Voltage unbalance → torque pulsation → hydraulic instability",
        matches: |mech, hyd, elec| {
            elec.fault_type == FaultType::Voltage
                && (mech.diagnosis == MechanicalCode::Misalignment.into()
                    || mech.diagnosis == MechanicalCode::Looseness.into())
                && hyd.detail(DetailKey::HeadDeviation) < -5.0
        },
    },
    CorrelationRule {
        label: CorrelationLabel::CavitationCascade,
        bonus: 20,
        note: "Cavitation → impeller erosion → unbalance → current fluctuation",
        matches: |mech, hyd, elec| {
            hyd.fault_type == FaultType::Cavitation
                && mech.fault_type == FaultType::Wear
                && elec.detail(DetailKey::CurrentUnbalance) > 5.0
        },
    },
    CorrelationRule {
        label: CorrelationLabel::InternalLoss,
        bonus: 10,
        note: "High electrical input + low hydraulic output → internal mechanical/hydraulic loss",
        matches: |_, hyd, elec| {
            elec.diagnosis == ElectricalCode::OverLoad.into() && hyd.fault_type == FaultType::Efficiency
        },
    },
];

/// Fuse the three domain results, with optional bearing temperatures, into
/// one assessment.
pub fn aggregate(
    mechanical: &DiagnosisResult,
    hydraulic: &DiagnosisResult,
    electrical: &DiagnosisResult,
    temps: Option<&BearingTemperatures>,
    config: &ThresholdConfig,
) -> IntegratedDiagnosisResult {
    let mut label = CorrelationLabel::NoCorrelation;
    let mut bonus = 0;
    let mut correlation_notes = Vec::new();
    let mut temperature_notes = Vec::new();

    for rule in &RULES {
        if (rule.matches)(mechanical, hydraulic, electrical) {
            tracing::debug!(label = %rule.label, bonus = rule.bonus, "correlation rule matched");
            bonus += rule.bonus;
            correlation_notes.push(rule.note.to_string());
            label = rule.label;
        }
    }

    let limits = &config.temperature;
    if let Some(temps) = temps {
        let adjustment = temperature::adjust(temps, !mechanical.is_normal(), limits);
        bonus += adjustment.delta;
        temperature_notes = adjustment.notes;

        if temperature::pump_gradient(temps, limits).is_some() {
            correlation_notes.push(format!(
                "Pump DE-NDE ΔT >{:.0}°C → Localized fault on DE bearing",
                limits.delta
            ));
        }
        if temperature::motor_hotter_than_pump(temps, limits) {
            correlation_notes.push("Motor DE > Pump DE → Possible electrical origin".to_string());
        }
    }

    let mut severity = [mechanical.severity, hydraulic.severity, electrical.severity]
        .into_iter()
        .max()
        .unwrap_or(Severity::Low);
    if temps.is_some_and(|t| temperature::any_critical(t, limits)) {
        tracing::warn!("critical bearing temperature, forcing High severity");
        severity = Severity::High;
        correlation_notes.push("Critical bearing temperature detected".to_string());
    }

    let confidences: Vec<f64> = [mechanical, hydraulic, electrical]
        .iter()
        .map(|r| f64::from(r.confidence))
        .filter(|c| *c > 0.0)
        .collect();
    let base = if confidences.is_empty() {
        0.0
    } else {
        confidences.iter().sum::<f64>() / confidences.len() as f64
    };
    let confidence = (base + f64::from(bonus))
        .round()
        .clamp(0.0, f64::from(MAX_CONFIDENCE)) as u8;

    if correlation_notes.is_empty() {
        correlation_notes.push(CorrelationLabel::NoCorrelation.as_str().to_string());
    }

    tracing::info!(
        label = %label,
        confidence,
        severity = %severity,
        bonus,
        "integrated diagnosis"
    );

    IntegratedDiagnosisResult {
        diagnosis: label,
        confidence,
        severity,
        mechanical: mechanical.clone(),
        hydraulic: hydraulic.clone(),
        electrical: electrical.clone(),
        correlation_notes,
        temperature_notes,
    }
}
