//! Pumped fluid reference table.

use core::fmt;

/// Fire/handling risk classification of a fluid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RiskLevel {
    Moderate,
    High,
}

/// Fuels handled by the pump fleet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FluidKind {
    Pertalite,
    Pertamax,
    #[default]
    Diesel,
}

impl FluidKind {
    /// Display name used in reports and recommendations.
    pub fn name(self) -> &'static str {
        match self {
            FluidKind::Pertalite => "Pertalite (RON 90)",
            FluidKind::Pertamax => "Pertamax (RON 92)",
            FluidKind::Diesel => "Diesel / Solar",
        }
    }

    /// Reference properties for this fluid.
    ///
    /// Vapor pressure is taken at 38 °C, viscosity at 40 °C.
    pub fn properties(self) -> FluidProperties {
        match self {
            FluidKind::Pertalite => FluidProperties {
                kind: self,
                specific_gravity: 0.73,
                vapor_pressure_kpa: 52.0,
                viscosity_cst: 0.6,
                flash_point_c: -43.0,
                risk_level: RiskLevel::High,
            },
            FluidKind::Pertamax => FluidProperties {
                kind: self,
                specific_gravity: 0.74,
                vapor_pressure_kpa: 42.0,
                viscosity_cst: 0.6,
                flash_point_c: -43.0,
                risk_level: RiskLevel::High,
            },
            FluidKind::Diesel => FluidProperties {
                kind: self,
                specific_gravity: 0.84,
                vapor_pressure_kpa: 0.5,
                viscosity_cst: 3.0,
                flash_point_c: 52.0,
                risk_level: RiskLevel::Moderate,
            },
        }
    }
}

impl fmt::Display for FluidKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Physical properties of the pumped fluid.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FluidProperties {
    pub kind: FluidKind,
    pub specific_gravity: f64,
    pub vapor_pressure_kpa: f64,
    pub viscosity_cst: f64,
    pub flash_point_c: f64,
    pub risk_level: RiskLevel,
}

impl FluidProperties {
    /// Replace the reference specific gravity with a field-measured value.
    pub fn with_specific_gravity(mut self, sg: f64) -> Self {
        self.specific_gravity = sg;
        self
    }
}
