//! Single-point hydraulic performance diagnosis.

use pumpdiag_types::{
    DetailKey, DiagnosisResult, FaultType, HydraulicCode, HydraulicMeasurement, NoiseType,
    Severity,
};
use serde::Serialize;

use super::score;
use crate::calc::{deviation_percent, HydraulicParameters};
use crate::thresholds::{HydraulicLimits, ThresholdConfig};

/// Percent deviations of the operating point from design.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Deviations {
    pub head: f64,
    pub efficiency: f64,
    pub flow: f64,
}

impl Deviations {
    pub fn compute(m: &HydraulicMeasurement, p: &HydraulicParameters) -> Self {
        Self {
            head: deviation_percent(p.head_m, m.design.rated_head_m),
            efficiency: deviation_percent(p.efficiency_percent, m.design.bep_efficiency_percent),
            flow: deviation_percent(m.flow_m3h, m.design.rated_flow_m3h),
        }
    }
}

/// Shape of the deviation from design.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PerformancePattern {
    /// Head and efficiency both low.
    UnderPerformance,
    /// Head high while flow is low.
    OverResistance,
    /// Efficiency low with head on design.
    EfficiencyDrop,
    Normal,
    MixedDeviation,
}

impl PerformancePattern {
    pub fn classify(dev: &Deviations, limits: &HydraulicLimits) -> Self {
        let band = limits.deviation_band;
        if dev.head < -band && dev.efficiency < -band {
            PerformancePattern::UnderPerformance
        } else if dev.head > band && dev.flow < -band {
            PerformancePattern::OverResistance
        } else if dev.efficiency < -limits.efficiency_drop && dev.head.abs() <= band {
            PerformancePattern::EfficiencyDrop
        } else if dev.head.abs() <= band && dev.efficiency.abs() <= band && dev.flow.abs() <= band {
            PerformancePattern::Normal
        } else {
            PerformancePattern::MixedDeviation
        }
    }
}

fn high_if(condition: bool) -> Severity {
    if condition {
        Severity::High
    } else {
        Severity::Medium
    }
}

/// Diagnose the hydraulic domain from a measurement with resolved design data.
pub fn diagnose(
    m: &HydraulicMeasurement,
    p: &HydraulicParameters,
    config: &ThresholdConfig,
) -> DiagnosisResult {
    let limits = &config.hydraulic;
    let dev = Deviations::compute(m, p);
    let pattern = PerformancePattern::classify(&dev, limits);
    let npsh_margin = p.npsh_available_m - m.design.npsh_required_m;
    let noise = m.observations.noise;
    tracing::debug!(?dev, ?pattern, npsh_margin, ?noise, "hydraulic pattern");

    let result = if noise == NoiseType::Crackling && npsh_margin < limits.npsh_margin_min {
        DiagnosisResult::new(
            HydraulicCode::Cavitation,
            score(70, (limits.npsh_margin_min - npsh_margin) * 20.0, 90),
            high_if(npsh_margin < limits.npsh_margin_critical),
            FaultType::Cavitation,
        )
    } else {
        match pattern {
            PerformancePattern::UnderPerformance if noise == NoiseType::Normal => DiagnosisResult::new(
                HydraulicCode::ImpellerWear,
                score(60, dev.head.abs() * 2.0, 85),
                high_if(dev.head < -limits.impeller_wear_critical),
                FaultType::Wear,
            ),
            PerformancePattern::OverResistance => DiagnosisResult::new(
                HydraulicCode::SystemResistanceHigh,
                score(70, dev.head.abs(), 90),
                high_if(dev.flow < -limits.flow_restriction_critical),
                FaultType::System,
            ),
            PerformancePattern::EfficiencyDrop => DiagnosisResult::new(
                HydraulicCode::EfficiencyDrop,
                score(65, dev.efficiency.abs(), 80),
                high_if(dev.efficiency < -limits.efficiency_drop_critical),
                FaultType::Efficiency,
            ),
            PerformancePattern::Normal => DiagnosisResult::new(
                HydraulicCode::NormalOperation,
                95,
                Severity::Low,
                FaultType::Normal,
            ),
            _ => DiagnosisResult::new(HydraulicCode::Undiagnosed, 40, Severity::Medium, FaultType::Unknown),
        }
    };

    let result = result
        .with_detail(DetailKey::HeadDeviation, dev.head)
        .with_detail(DetailKey::EfficiencyDeviation, dev.efficiency)
        .with_detail(DetailKey::FlowDeviation, dev.flow)
        .with_detail(DetailKey::NpshAvailable, p.npsh_available_m)
        .with_detail(DetailKey::NpshMargin, npsh_margin)
        .with_detail(DetailKey::HeadM, p.head_m)
        .with_detail(DetailKey::EfficiencyPercent, p.efficiency_percent);

    tracing::info!(
        fluid = %m.fluid.kind,
        diagnosis = %result.diagnosis,
        severity = %result.severity,
        confidence = result.confidence,
        "hydraulic diagnosis"
    );
    result
}
