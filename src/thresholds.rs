//! Reference limits used by the classifiers and the report.
//!
//! Every group defaults to the published reference values (ISO 10816-3/7 for
//! vibration, IEC 60034-1 for electrical, API 610 practice for hydraulic and
//! bearing temperature). A deployment can override individual values through
//! a config file and `PUMPDIAG_*` environment variables:
//!
//! ```toml
//! [electrical]
//! voltage_unbalance_warning = 1.5
//!
//! [temperature]
//! critical = 95.0
//! ```
//!
//! ```bash
//! PUMPDIAG_ELECTRICAL__VOLTAGE_UNBALANCE_WARNING=1.5 pumpdiag --file snapshot.json
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

/// Environment variable prefix for threshold overrides.
pub const ENV_PREFIX: &str = "PUMPDIAG";

/// All threshold groups.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdConfig {
    pub vibration: VibrationLimits,
    pub zones: ZoneBoundaries,
    pub baseline: AccelerationBaseline,
    pub temperature: TemperatureLimits,
    pub hydraulic: HydraulicLimits,
    pub electrical: ElectricalLimits,
}

impl ThresholdConfig {
    /// Load thresholds from an optional file, then environment overrides.
    ///
    /// Values not named by any source keep their defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }
        let config = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("failed to read threshold configuration")?;

        let thresholds: Self = config
            .try_deserialize()
            .context("invalid threshold configuration")?;
        tracing::debug!(?thresholds, "loaded thresholds");
        Ok(thresholds)
    }
}

/// Overall velocity limits used by the low-frequency diagnosis, mm/s RMS.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VibrationLimits {
    /// Above this the champion point is considered abnormal (Medium).
    pub warning: f64,
    /// Above this a low-frequency finding is High severity.
    pub danger: f64,
    /// Relative window for matching 1×/2× RPM peaks.
    pub peak_tolerance: f64,
}

impl Default for VibrationLimits {
    fn default() -> Self {
        Self {
            warning: 4.5,
            danger: 7.1,
            peak_tolerance: 0.05,
        }
    }
}

/// ISO 10816 zone boundaries used for the report status column, mm/s RMS.
///
/// Kept apart from [`VibrationLimits`] so that report zoning can be tuned
/// without moving the diagnostic trigger points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoneBoundaries {
    /// Upper bound of zone A (good).
    pub zone_a: f64,
    /// Upper bound of zone B (acceptable).
    pub zone_b: f64,
    /// Upper bound of zone C (unacceptable). Anything above is zone D.
    pub zone_c: f64,
}

impl Default for ZoneBoundaries {
    fn default() -> Self {
        Self {
            zone_a: 2.8,
            zone_b: 4.5,
            zone_c: 7.1,
        }
    }
}

impl ZoneBoundaries {
    /// Report status label for an overall velocity.
    pub fn label(&self, velocity: f64) -> &'static str {
        if velocity > self.zone_c {
            "Zone_D"
        } else if velocity > self.zone_b {
            "Zone_C"
        } else if velocity > self.zone_a {
            "Zone_B"
        } else {
            "Zone_A"
        }
    }
}

/// Healthy-bearing acceleration baselines, g.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccelerationBaseline {
    /// 0.5-1.5 kHz
    pub band1: f64,
    /// 1.5-5 kHz
    pub band2: f64,
    /// 5-16 kHz
    pub band3: f64,
}

impl Default for AccelerationBaseline {
    fn default() -> Self {
        Self {
            band1: 0.3,
            band2: 0.2,
            band3: 0.15,
        }
    }
}

/// Bearing housing temperature bands, °C.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemperatureLimits {
    /// Lower bound of the Elevated band.
    pub elevated: f64,
    /// Lower bound of the Warning band.
    pub warning: f64,
    /// Lower bound of the Critical band; also forces integrated severity High.
    pub critical: f64,
    /// DE/NDE difference that indicates a localized fault.
    pub delta: f64,
    /// Motor DE running this much hotter than pump DE hints at an electrical origin.
    pub motor_over_pump: f64,
}

impl Default for TemperatureLimits {
    fn default() -> Self {
        Self {
            elevated: 70.0,
            warning: 80.0,
            critical: 90.0,
            delta: 15.0,
            motor_over_pump: 10.0,
        }
    }
}

/// Hydraulic performance limits; deviations are in percent of design.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HydraulicLimits {
    /// Deviation band considered on-design.
    pub deviation_band: f64,
    /// Efficiency loss (with head on-design) that flags an efficiency drop.
    pub efficiency_drop: f64,
    /// NPSH margin below which crackling noise means cavitation, m.
    pub npsh_margin_min: f64,
    /// NPSH margin below which cavitation is High severity, m.
    pub npsh_margin_critical: f64,
    /// Head loss beyond which impeller wear is High severity.
    pub impeller_wear_critical: f64,
    /// Flow loss beyond which system resistance is High severity.
    pub flow_restriction_critical: f64,
    /// Efficiency loss beyond which an efficiency drop is High severity.
    pub efficiency_drop_critical: f64,
}

impl Default for HydraulicLimits {
    fn default() -> Self {
        Self {
            deviation_band: 5.0,
            efficiency_drop: 10.0,
            npsh_margin_min: 0.5,
            npsh_margin_critical: 0.3,
            impeller_wear_critical: 15.0,
            flow_restriction_critical: 30.0,
            efficiency_drop_critical: 20.0,
        }
    }
}

/// Supply and load limits, percent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElectricalLimits {
    pub voltage_unbalance_warning: f64,
    pub voltage_unbalance_critical: f64,
    pub current_unbalance_warning: f64,
    pub current_unbalance_critical: f64,
    /// Lowest acceptable average voltage, percent of rated.
    pub voltage_tolerance_low: f64,
    /// Highest acceptable average voltage, percent of rated.
    pub voltage_tolerance_high: f64,
    /// Load above which an under-voltage condition is High severity.
    pub under_voltage_load_high: f64,
    /// Load above which the motor is overloaded, percent of FLA.
    pub overload: f64,
    /// Load below which the motor is underloaded, percent of FLA.
    pub underload: f64,
}

impl Default for ElectricalLimits {
    fn default() -> Self {
        Self {
            voltage_unbalance_warning: 1.0,
            voltage_unbalance_critical: 2.0,
            current_unbalance_warning: 5.0,
            current_unbalance_critical: 8.0,
            voltage_tolerance_low: 90.0,
            voltage_tolerance_high: 110.0,
            under_voltage_load_high: 80.0,
            overload: 100.0,
            underload: 50.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    #[test]
    fn test_defaults_match_reference_values() {
        let t = ThresholdConfig::default();
        assert_eq!(t.vibration.warning, 4.5);
        assert_eq!(t.vibration.danger, 7.1);
        assert_eq!(t.zones.zone_a, 2.8);
        assert_eq!(t.zones.zone_c, 7.1);
        assert_eq!(t.baseline.band2, 0.2);
        assert_eq!(t.temperature.critical, 90.0);
        assert_eq!(t.electrical.current_unbalance_critical, 8.0);
    }

    #[test]
    fn test_zone_labels() {
        let zones = ZoneBoundaries::default();
        assert_eq!(zones.label(1.0), "Zone_A");
        assert_eq!(zones.label(2.8), "Zone_A");
        assert_eq!(zones.label(2.81), "Zone_B");
        assert_eq!(zones.label(4.6), "Zone_C");
        assert_eq!(zones.label(7.1), "Zone_C");
        assert_eq!(zones.label(12.0), "Zone_D");
    }

    #[test]
    fn test_load_without_file_uses_defaults() {
        let t = ThresholdConfig::load(None).unwrap();
        assert_eq!(t.hydraulic, HydraulicLimits::default());
    }

    #[test]
    fn test_load_partial_file_override() {
        let mut file = Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[electrical]\nvoltage_unbalance_warning = 1.5\n\n[temperature]\ncritical = 95.0").unwrap();

        let t = ThresholdConfig::load(Some(file.path())).unwrap();
        assert_eq!(t.electrical.voltage_unbalance_warning, 1.5);
        assert_eq!(t.electrical.voltage_unbalance_critical, 2.0);
        assert_eq!(t.temperature.critical, 95.0);
        assert_eq!(t.temperature.warning, 80.0);
        assert_eq!(t.vibration, VibrationLimits::default());
    }

    #[test]
    fn test_zone_c_bound_sets_zone_d_start() {
        let mut file = Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[zones]\nzone_c = 11.0").unwrap();

        let zones = ThresholdConfig::load(Some(file.path())).unwrap().zones;
        assert_eq!(zones.zone_b, 4.5);
        assert_eq!(zones.label(9.0), "Zone_C");
        assert_eq!(zones.label(11.5), "Zone_D");
    }

    #[test]
    fn test_load_missing_file_is_error() {
        let result = ThresholdConfig::load(Some(Path::new("/nonexistent/thresholds.toml")));
        assert!(result.is_err());
    }
}
