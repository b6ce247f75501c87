//! Supply quality and motor load diagnosis.

use pumpdiag_types::{DetailKey, DiagnosisResult, ElectricalCode, FaultType, Severity};

use super::score;
use crate::calc::ElectricalParameters;
use crate::thresholds::ThresholdConfig;

/// Diagnose the electrical domain. First matching rule wins:
/// supply voltage, voltage unbalance, current unbalance, load.
pub fn diagnose(p: &ElectricalParameters, config: &ThresholdConfig) -> DiagnosisResult {
    let limits = &config.electrical;
    let load = p.load_estimate_percent;
    let v_unb = p.voltage_unbalance_percent;
    let i_unb = p.current_unbalance_percent;

    let result = if !p.voltage_within_tolerance {
        if p.voltage_ratio_percent < limits.voltage_tolerance_low {
            let severity = if load > limits.under_voltage_load_high {
                Severity::High
            } else {
                Severity::Medium
            };
            DiagnosisResult::new(ElectricalCode::UnderVoltage, 70, severity, FaultType::Voltage)
        } else if p.voltage_ratio_percent > limits.voltage_tolerance_high {
            DiagnosisResult::new(ElectricalCode::OverVoltage, 70, Severity::Medium, FaultType::Voltage)
        } else {
            tracing::warn!(ratio = p.voltage_ratio_percent, "voltage ratio is not comparable");
            DiagnosisResult::new(ElectricalCode::Undiagnosed, 40, Severity::Medium, FaultType::Unknown)
        }
    } else if v_unb > limits.voltage_unbalance_warning {
        DiagnosisResult::new(
            ElectricalCode::VoltageUnbalance,
            score(60, (v_unb - limits.voltage_unbalance_warning) * 15.0, 95),
            if v_unb > limits.voltage_unbalance_critical {
                Severity::High
            } else {
                Severity::Medium
            },
            FaultType::Voltage,
        )
    } else if i_unb > limits.current_unbalance_warning {
        DiagnosisResult::new(
            ElectricalCode::CurrentUnbalance,
            score(60, (i_unb - limits.current_unbalance_warning) * 5.0, 95),
            if i_unb > limits.current_unbalance_critical {
                Severity::High
            } else {
                Severity::Medium
            },
            FaultType::Current,
        )
    } else if load > limits.overload {
        DiagnosisResult::new(
            ElectricalCode::OverLoad,
            score(55, load - limits.overload, 95),
            Severity::Medium,
            FaultType::Load,
        )
    } else if load < limits.underload {
        DiagnosisResult::new(ElectricalCode::UnderLoad, 50, Severity::Low, FaultType::Load)
    } else {
        DiagnosisResult::new(ElectricalCode::NormalElectrical, 95, Severity::Low, FaultType::Normal)
    };

    let result = result
        .with_detail(DetailKey::VoltageUnbalance, v_unb)
        .with_detail(DetailKey::CurrentUnbalance, i_unb)
        .with_detail(DetailKey::LoadEstimate, load);

    tracing::info!(
        diagnosis = %result.diagnosis,
        severity = %result.severity,
        confidence = result.confidence,
        load,
        "electrical diagnosis"
    );
    result
}
