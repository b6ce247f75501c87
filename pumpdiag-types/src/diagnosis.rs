//! Diagnosis codes and result records.
//!
//! Every domain has a closed set of diagnosis codes. Classifiers pick exactly
//! one code per run; the `Undiagnosed` variant is the catch-all branch when
//! no rule matches.

use core::fmt;
use std::collections::BTreeMap;

use crate::MeasurementPoint;

/// Text shown in place of a champion point when the mechanical result is normal.
pub const CHAMPION_NONE: &str = "none";

/// Severity of a finding. Ordered `Low < Medium < High`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Severity {
    #[default]
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Low => "Low",
            Severity::Medium => "Medium",
            Severity::High => "High",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The physical domain a result belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Domain {
    Mechanical,
    Hydraulic,
    Electrical,
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Domain::Mechanical => "mechanical",
            Domain::Hydraulic => "hydraulic",
            Domain::Electrical => "electrical",
        })
    }
}

/// Coarse fault family, used by the cross-domain correlation rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FaultType {
    Normal,
    #[cfg_attr(feature = "serde", serde(rename = "low_freq"))]
    LowFrequency,
    #[cfg_attr(feature = "serde", serde(rename = "high_freq"))]
    HighFrequency,
    Cavitation,
    Wear,
    System,
    Efficiency,
    Unknown,
    Voltage,
    Current,
    Load,
}

impl FaultType {
    pub fn as_str(self) -> &'static str {
        match self {
            FaultType::Normal => "normal",
            FaultType::LowFrequency => "low_freq",
            FaultType::HighFrequency => "high_freq",
            FaultType::Cavitation => "cavitation",
            FaultType::Wear => "wear",
            FaultType::System => "system",
            FaultType::Efficiency => "efficiency",
            FaultType::Unknown => "unknown",
            FaultType::Voltage => "voltage",
            FaultType::Current => "current",
            FaultType::Load => "load",
        }
    }
}

impl fmt::Display for FaultType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Diagnosis codes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum MechanicalCode {
    #[cfg_attr(feature = "serde", serde(rename = "Normal"))]
    Normal,
    Unbalance,
    Misalignment,
    Looseness,
    BearingEarly,
    BearingDeveloped,
    BearingSevere,
    Undiagnosed,
}

impl MechanicalCode {
    pub fn as_str(self) -> &'static str {
        match self {
            MechanicalCode::Normal => "Normal",
            MechanicalCode::Unbalance => "UNBALANCE",
            MechanicalCode::Misalignment => "MISALIGNMENT",
            MechanicalCode::Looseness => "LOOSENESS",
            MechanicalCode::BearingEarly => "BEARING_EARLY",
            MechanicalCode::BearingDeveloped => "BEARING_DEVELOPED",
            MechanicalCode::BearingSevere => "BEARING_SEVERE",
            MechanicalCode::Undiagnosed => "UNDIAGNOSED",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum HydraulicCode {
    NormalOperation,
    Cavitation,
    ImpellerWear,
    SystemResistanceHigh,
    EfficiencyDrop,
    Undiagnosed,
}

impl HydraulicCode {
    pub fn as_str(self) -> &'static str {
        match self {
            HydraulicCode::NormalOperation => "NORMAL_OPERATION",
            HydraulicCode::Cavitation => "CAVITATION",
            HydraulicCode::ImpellerWear => "IMPELLER_WEAR",
            HydraulicCode::SystemResistanceHigh => "SYSTEM_RESISTANCE_HIGH",
            HydraulicCode::EfficiencyDrop => "EFFICIENCY_DROP",
            HydraulicCode::Undiagnosed => "UNDIAGNOSED",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum ElectricalCode {
    NormalElectrical,
    UnderVoltage,
    OverVoltage,
    VoltageUnbalance,
    CurrentUnbalance,
    OverLoad,
    UnderLoad,
    Undiagnosed,
}

impl ElectricalCode {
    pub fn as_str(self) -> &'static str {
        match self {
            ElectricalCode::NormalElectrical => "NORMAL_ELECTRICAL",
            ElectricalCode::UnderVoltage => "UNDER_VOLTAGE",
            ElectricalCode::OverVoltage => "OVER_VOLTAGE",
            ElectricalCode::VoltageUnbalance => "VOLTAGE_UNBALANCE",
            ElectricalCode::CurrentUnbalance => "CURRENT_UNBALANCE",
            ElectricalCode::OverLoad => "OVER_LOAD",
            ElectricalCode::UnderLoad => "UNDER_LOAD",
            ElectricalCode::Undiagnosed => "UNDIAGNOSED",
        }
    }
}

/// A diagnosis code from any domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum DiagnosisCode {
    Mechanical(MechanicalCode),
    Hydraulic(HydraulicCode),
    Electrical(ElectricalCode),
}

impl DiagnosisCode {
    pub fn domain(self) -> Domain {
        match self {
            DiagnosisCode::Mechanical(_) => Domain::Mechanical,
            DiagnosisCode::Hydraulic(_) => Domain::Hydraulic,
            DiagnosisCode::Electrical(_) => Domain::Electrical,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DiagnosisCode::Mechanical(c) => c.as_str(),
            DiagnosisCode::Hydraulic(c) => c.as_str(),
            DiagnosisCode::Electrical(c) => c.as_str(),
        }
    }
}

impl fmt::Display for DiagnosisCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<MechanicalCode> for DiagnosisCode {
    fn from(code: MechanicalCode) -> Self {
        DiagnosisCode::Mechanical(code)
    }
}

impl From<HydraulicCode> for DiagnosisCode {
    fn from(code: HydraulicCode) -> Self {
        DiagnosisCode::Hydraulic(code)
    }
}

impl From<ElectricalCode> for DiagnosisCode {
    fn from(code: ElectricalCode) -> Self {
        DiagnosisCode::Electrical(code)
    }
}

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// Named numeric facts attached to a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DetailKey {
    HeadDeviation,
    EfficiencyDeviation,
    FlowDeviation,
    NpshAvailable,
    NpshMargin,
    HeadM,
    EfficiencyPercent,
    VoltageUnbalance,
    CurrentUnbalance,
    LoadEstimate,
    ChampionVelocity,
    OneXAmplitude,
    TwoXAmplitude,
}

/// Outcome of one domain classifier.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DiagnosisResult {
    pub diagnosis: DiagnosisCode,
    /// Confidence in percent, 0-100.
    pub confidence: u8,
    pub severity: Severity,
    pub fault_type: FaultType,
    pub domain: Domain,
    pub details: BTreeMap<DetailKey, f64>,
    /// Point with the highest overall velocity (mechanical only).
    ///
    /// `None` when the mechanical result is normal.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub champion_point: Option<MeasurementPoint>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Vec::is_empty"))]
    pub temperature_notes: Vec<String>,
}

impl DiagnosisResult {
    /// Create a result; the domain follows from the code.
    pub fn new(
        diagnosis: impl Into<DiagnosisCode>,
        confidence: u8,
        severity: Severity,
        fault_type: FaultType,
    ) -> Self {
        let diagnosis = diagnosis.into();
        Self {
            diagnosis,
            confidence: confidence.min(100),
            severity,
            fault_type,
            domain: diagnosis.domain(),
            details: BTreeMap::new(),
            champion_point: None,
            temperature_notes: Vec::new(),
        }
    }

    pub fn with_detail(mut self, key: DetailKey, value: f64) -> Self {
        self.details.insert(key, value);
        self
    }

    /// A detail value, `0` when absent.
    pub fn detail(&self, key: DetailKey) -> f64 {
        self.details.get(&key).copied().unwrap_or(0.0)
    }

    /// Champion point text, or [`CHAMPION_NONE`].
    pub fn champion_label(&self) -> String {
        self.champion_point
            .map(|p| p.to_string())
            .unwrap_or_else(|| CHAMPION_NONE.to_string())
    }

    pub fn is_normal(&self) -> bool {
        self.fault_type == FaultType::Normal
    }
}

/// Top-level label of the integrated assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum CorrelationLabel {
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "No correlation detected across domains"))]
    NoCorrelation,
    #[cfg_attr(feature = "serde", serde(rename = "Electrical-Mechanical-Hydraulic Coupled Fault"))]
    CoupledFault,
    #[cfg_attr(feature = "serde", serde(rename = "Cascading Failure: Cavitation Origin"))]
    CavitationCascade,
    #[cfg_attr(feature = "serde", serde(rename = "Internal Loss Investigation Required"))]
    InternalLoss,
}

impl CorrelationLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            CorrelationLabel::NoCorrelation => "No correlation detected across domains",
            CorrelationLabel::CoupledFault => "Electrical-Mechanical-Hydraulic Coupled Fault",
            CorrelationLabel::CavitationCascade => "Cascading Failure: Cavitation Origin",
            CorrelationLabel::InternalLoss => "Internal Loss Investigation Required",
        }
    }
}

impl fmt::Display for CorrelationLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cross-domain assessment built from the three domain results.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct IntegratedDiagnosisResult {
    pub diagnosis: CorrelationLabel,
    /// Confidence in percent, 0-95.
    pub confidence: u8,
    pub severity: Severity,
    pub mechanical: DiagnosisResult,
    pub hydraulic: DiagnosisResult,
    pub electrical: DiagnosisResult,
    pub correlation_notes: Vec<String>,
    pub temperature_notes: Vec<String>,
}
