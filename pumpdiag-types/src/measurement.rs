//! Raw measurement records for the three diagnostic domains.

use std::collections::BTreeMap;

use crate::{BearingLocation, FluidProperties, InvalidInputError, MeasurementPoint};

// ---------------------------------------------------------------------------
// Mechanical
// ---------------------------------------------------------------------------

/// Readings at one vibration measurement point.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PointReading {
    /// Overall velocity, mm/s RMS.
    pub velocity: f64,
    /// Band 1 acceleration (0.5-1.5 kHz), g.
    pub band1: f64,
    /// Band 2 acceleration (1.5-5 kHz), g.
    pub band2: f64,
    /// Band 3 acceleration (5-16 kHz), g.
    pub band3: f64,
}

impl PointReading {
    pub fn new(velocity: f64, band1: f64, band2: f64, band3: f64) -> Self {
        Self {
            velocity,
            band1,
            band2,
            band3,
        }
    }
}

/// A pre-extracted spectral peak at the champion point.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FftPeak {
    pub frequency_hz: f64,
    /// Peak amplitude, mm/s.
    pub amplitude: f64,
}

impl FftPeak {
    pub fn new(frequency_hz: f64, amplitude: f64) -> Self {
        Self {
            frequency_hz,
            amplitude,
        }
    }
}

/// A complete twelve-point vibration survey.
///
/// Construction checks the fixed schema: every point must be present, so
/// lookups by [`MeasurementPoint`] are infallible afterwards.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(
        try_from = "BTreeMap<String, PointReading>",
        into = "BTreeMap<String, PointReading>"
    )
)]
pub struct VibrationSurvey {
    readings: [PointReading; MeasurementPoint::COUNT],
}

impl VibrationSurvey {
    /// Build a survey from a point map, failing on the first missing point.
    pub fn from_map(map: &BTreeMap<MeasurementPoint, PointReading>) -> Result<Self, InvalidInputError> {
        let mut readings = [PointReading::default(); MeasurementPoint::COUNT];
        for point in MeasurementPoint::ALL {
            readings[point.index()] = *map
                .get(&point)
                .ok_or(InvalidInputError::MissingPoint(point))?;
        }
        Ok(Self { readings })
    }

    /// Build a survey where every point carries the same reading.
    pub fn uniform(reading: PointReading) -> Self {
        Self {
            readings: [reading; MeasurementPoint::COUNT],
        }
    }

    pub fn get(&self, point: MeasurementPoint) -> &PointReading {
        &self.readings[point.index()]
    }

    pub fn velocity(&self, point: MeasurementPoint) -> f64 {
        self.get(point).velocity
    }

    /// Replace one point's reading.
    pub fn set(&mut self, point: MeasurementPoint, reading: PointReading) {
        self.readings[point.index()] = reading;
    }

    /// Iterate over all points in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (MeasurementPoint, &PointReading)> {
        MeasurementPoint::ALL.into_iter().zip(self.readings.iter())
    }
}

impl TryFrom<BTreeMap<String, PointReading>> for VibrationSurvey {
    type Error = InvalidInputError;

    fn try_from(raw: BTreeMap<String, PointReading>) -> Result<Self, Self::Error> {
        let map = raw
            .into_iter()
            .map(|(key, reading)| Ok((key.parse::<MeasurementPoint>()?, reading)))
            .collect::<Result<BTreeMap<_, _>, InvalidInputError>>()?;
        Self::from_map(&map)
    }
}

impl From<VibrationSurvey> for BTreeMap<String, PointReading> {
    fn from(survey: VibrationSurvey) -> Self {
        survey
            .iter()
            .map(|(point, reading)| (point.to_string(), *reading))
            .collect()
    }
}

/// Bearing housing temperatures at the four fixed locations, °C.
///
/// A reading of exactly `0` means "not measured".
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "BTreeMap<String, f64>", into = "BTreeMap<String, f64>")
)]
pub struct BearingTemperatures {
    celsius: [f64; 4],
}

impl BearingTemperatures {
    pub fn new(pump_de: f64, pump_nde: f64, motor_de: f64, motor_nde: f64) -> Self {
        Self {
            celsius: [pump_de, pump_nde, motor_de, motor_nde],
        }
    }

    /// Build from a location map, failing on the first missing location.
    pub fn from_map(map: &BTreeMap<BearingLocation, f64>) -> Result<Self, InvalidInputError> {
        let mut celsius = [0.0; 4];
        for location in BearingLocation::ALL {
            celsius[location.index()] = *map
                .get(&location)
                .ok_or(InvalidInputError::MissingTemperature(location))?;
        }
        Ok(Self { celsius })
    }

    /// Raw value at a location, `0` when not measured.
    pub fn raw(&self, location: BearingLocation) -> f64 {
        self.celsius[location.index()]
    }

    /// The reading at a location, or `None` when not measured.
    pub fn reading(&self, location: BearingLocation) -> Option<f64> {
        let t = self.raw(location);
        (t != 0.0).then_some(t)
    }

    /// Measured readings in evaluation order.
    pub fn present(&self) -> impl Iterator<Item = (BearingLocation, f64)> + '_ {
        BearingLocation::ALL
            .into_iter()
            .filter_map(|loc| self.reading(loc).map(|t| (loc, t)))
    }

    /// Absolute DE/NDE difference when both ends are measured.
    pub fn delta(&self, de: BearingLocation, nde: BearingLocation) -> Option<f64> {
        Some((self.reading(de)? - self.reading(nde)?).abs())
    }
}

impl TryFrom<BTreeMap<String, f64>> for BearingTemperatures {
    type Error = InvalidInputError;

    fn try_from(raw: BTreeMap<String, f64>) -> Result<Self, Self::Error> {
        let map = raw
            .into_iter()
            .map(|(key, t)| Ok((key.parse::<BearingLocation>()?, t)))
            .collect::<Result<BTreeMap<_, _>, InvalidInputError>>()?;
        Self::from_map(&map)
    }
}

impl From<BearingTemperatures> for BTreeMap<String, f64> {
    fn from(temps: BearingTemperatures) -> Self {
        BearingLocation::ALL
            .into_iter()
            .map(|loc| (loc.as_str().to_string(), temps.raw(loc)))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Hydraulic
// ---------------------------------------------------------------------------

/// Audible noise reported by the field technician.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NoiseType {
    #[default]
    Normal,
    Whining,
    Grinding,
    Crackling,
}

/// Visual clarity of a fluid sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FluidClarity {
    #[default]
    Clear,
    SlightlyTurbid,
    Turbid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FieldObservations {
    pub noise: NoiseType,
    pub clarity: FluidClarity,
}

/// Nameplate design point of the pump.
///
/// `bep_efficiency_percent` and `npsh_required_m` may be left at `0` when
/// the OEM data sheet is unavailable.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DesignParameters {
    pub rated_flow_m3h: f64,
    pub rated_head_m: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub bep_efficiency_percent: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub npsh_required_m: f64,
}

/// One hydraulic operating-point measurement.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HydraulicMeasurement {
    pub suction_pressure_bar: f64,
    pub discharge_pressure_bar: f64,
    pub flow_m3h: f64,
    pub motor_power_kw: f64,
    pub fluid: FluidProperties,
    pub design: DesignParameters,
    pub observations: FieldObservations,
}

// ---------------------------------------------------------------------------
// Electrical
// ---------------------------------------------------------------------------

/// Three-phase supply measurement plus motor nameplate.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ElectricalMeasurement {
    /// Line-to-line voltages L1-L2, L2-L3, L3-L1.
    pub voltages: [f64; 3],
    /// Phase currents L1, L2, L3.
    pub currents: [f64; 3],
    pub rated_voltage: f64,
    pub full_load_amps: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Direction, End, Machine};

    fn full_map() -> BTreeMap<MeasurementPoint, PointReading> {
        MeasurementPoint::ALL
            .into_iter()
            .enumerate()
            .map(|(i, p)| (p, PointReading::new(i as f64, 0.2, 0.15, 0.1)))
            .collect()
    }

    #[test]
    fn test_survey_from_complete_map() {
        let survey = VibrationSurvey::from_map(&full_map()).unwrap();
        let motor_nde_axial = MeasurementPoint::new(Machine::Motor, End::Nde, Direction::Axial);
        assert_eq!(survey.velocity(motor_nde_axial), 11.0);
        assert_eq!(survey.iter().count(), 12);
    }

    #[test]
    fn test_survey_missing_point() {
        let mut map = full_map();
        let missing = MeasurementPoint::new(Machine::Pump, End::Nde, Direction::Vertical);
        map.remove(&missing);
        assert_eq!(
            VibrationSurvey::from_map(&map),
            Err(InvalidInputError::MissingPoint(missing))
        );
    }

    #[test]
    fn test_survey_iter_is_canonical() {
        let survey = VibrationSurvey::from_map(&full_map()).unwrap();
        let points: Vec<_> = survey.iter().map(|(p, _)| p).collect();
        assert_eq!(points, MeasurementPoint::ALL.to_vec());
    }

    #[test]
    fn test_temperatures_zero_is_not_measured() {
        let temps = BearingTemperatures::new(65.0, 0.0, 68.0, 66.0);
        assert_eq!(temps.reading(BearingLocation::PumpNde), None);
        assert_eq!(temps.raw(BearingLocation::PumpNde), 0.0);
        assert_eq!(temps.present().count(), 3);
        assert_eq!(temps.delta(BearingLocation::PumpDe, BearingLocation::PumpNde), None);
        assert_eq!(
            temps.delta(BearingLocation::MotorDe, BearingLocation::MotorNde),
            Some(2.0)
        );
    }

    #[test]
    fn test_temperatures_missing_location() {
        let map: BTreeMap<_, _> = [
            (BearingLocation::PumpDe, 65.0),
            (BearingLocation::PumpNde, 63.0),
            (BearingLocation::MotorDe, 68.0),
        ]
        .into_iter()
        .collect();
        assert_eq!(
            BearingTemperatures::from_map(&map),
            Err(InvalidInputError::MissingTemperature(BearingLocation::MotorNde))
        );
    }

    #[test]
    fn test_temperatures_unknown_key() {
        let raw: BTreeMap<String, f64> = [("Pump_Middle".to_string(), 60.0)].into_iter().collect();
        assert_eq!(
            BearingTemperatures::try_from(raw),
            Err(InvalidInputError::UnknownLocation("Pump_Middle".to_string()))
        );
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn test_deserialize_survey_rejects_missing_point() {
        let json = r#"{ "Pump DE Horizontal": {"velocity": 1.0, "band1": 0.2, "band2": 0.15, "band3": 0.1} }"#;
        let err = serde_json::from_str::<VibrationSurvey>(json).unwrap_err();
        assert!(err.to_string().contains("missing measurement point: Pump DE Vertical"));
    }

    #[test]
    fn test_deserialize_temperatures() {
        let json = r#"{"Pump_DE": 65, "Pump_NDE": 63, "Motor_DE": 68, "Motor_NDE": 0}"#;
        let temps: BearingTemperatures = serde_json::from_str(json).unwrap();
        assert_eq!(temps.reading(BearingLocation::MotorDe), Some(68.0));
        assert_eq!(temps.reading(BearingLocation::MotorNde), None);
    }

    #[test]
    fn test_deserialize_temperatures_missing_key() {
        let json = r#"{"Pump_DE": 65, "Pump_NDE": 63, "Motor_DE": 68}"#;
        let err = serde_json::from_str::<BearingTemperatures>(json).unwrap_err();
        assert!(err.to_string().contains("missing bearing temperature: Motor_NDE"));
    }

    #[test]
    fn test_observations_default_when_absent() {
        let obs: FieldObservations = serde_json::from_str("{}").unwrap();
        assert_eq!(obs.noise, NoiseType::Normal);
        assert_eq!(obs.clarity, FluidClarity::Clear);
    }
}
