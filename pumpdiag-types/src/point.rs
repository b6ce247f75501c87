//! Measurement point and bearing location keys.

use core::fmt;
use core::str::FromStr;

use crate::InvalidInputError;

/// Which machine of the pump-motor train a reading belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Machine {
    Pump,
    Motor,
}

impl Machine {
    /// The other machine on the shaft line.
    pub fn opposite(self) -> Self {
        match self {
            Machine::Pump => Machine::Motor,
            Machine::Motor => Machine::Pump,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Machine::Pump => "Pump",
            Machine::Motor => "Motor",
        }
    }
}

/// Drive end or non-drive end of a machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum End {
    De,
    Nde,
}

impl End {
    pub fn opposite(self) -> Self {
        match self {
            End::De => End::Nde,
            End::Nde => End::De,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            End::De => "DE",
            End::Nde => "NDE",
        }
    }
}

/// Sensor orientation at a bearing housing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    Horizontal,
    Vertical,
    Axial,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Horizontal => "Horizontal",
            Direction::Vertical => "Vertical",
            Direction::Axial => "Axial",
        }
    }
}

/// One of the twelve fixed vibration measurement points.
///
/// The text form is `"<Machine> <End> <Direction>"`, e.g. `"Pump DE Horizontal"`.
/// [`MeasurementPoint::ALL`] fixes the canonical enumeration order used for
/// tie-breaking and report rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub struct MeasurementPoint {
    pub machine: Machine,
    pub end: End,
    pub direction: Direction,
}

impl MeasurementPoint {
    /// Number of points in a complete survey.
    pub const COUNT: usize = 12;

    /// All points in canonical order: machine, then end, then direction.
    pub const ALL: [MeasurementPoint; Self::COUNT] = [
        Self::new(Machine::Pump, End::De, Direction::Horizontal),
        Self::new(Machine::Pump, End::De, Direction::Vertical),
        Self::new(Machine::Pump, End::De, Direction::Axial),
        Self::new(Machine::Pump, End::Nde, Direction::Horizontal),
        Self::new(Machine::Pump, End::Nde, Direction::Vertical),
        Self::new(Machine::Pump, End::Nde, Direction::Axial),
        Self::new(Machine::Motor, End::De, Direction::Horizontal),
        Self::new(Machine::Motor, End::De, Direction::Vertical),
        Self::new(Machine::Motor, End::De, Direction::Axial),
        Self::new(Machine::Motor, End::Nde, Direction::Horizontal),
        Self::new(Machine::Motor, End::Nde, Direction::Vertical),
        Self::new(Machine::Motor, End::Nde, Direction::Axial),
    ];

    pub const fn new(machine: Machine, end: End, direction: Direction) -> Self {
        Self {
            machine,
            end,
            direction,
        }
    }

    /// Position of this point in [`MeasurementPoint::ALL`].
    pub fn index(&self) -> usize {
        let machine = match self.machine {
            Machine::Pump => 0,
            Machine::Motor => 6,
        };
        let end = match self.end {
            End::De => 0,
            End::Nde => 3,
        };
        let direction = match self.direction {
            Direction::Horizontal => 0,
            Direction::Vertical => 1,
            Direction::Axial => 2,
        };
        machine + end + direction
    }

    /// Same end and direction on the other machine (Pump ↔ Motor).
    pub fn mirrored_machine(&self) -> Self {
        Self::new(self.machine.opposite(), self.end, self.direction)
    }

    /// Same machine and direction at the other end (DE ↔ NDE).
    pub fn mirrored_end(&self) -> Self {
        Self::new(self.machine, self.end.opposite(), self.direction)
    }
}

impl fmt::Display for MeasurementPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.machine.as_str(),
            self.end.as_str(),
            self.direction.as_str()
        )
    }
}

impl PartialOrd for MeasurementPoint {
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for MeasurementPoint {
    fn cmp(&self, other: &Self) -> core::cmp::Ordering {
        self.index().cmp(&other.index())
    }
}

impl FromStr for MeasurementPoint {
    type Err = InvalidInputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || InvalidInputError::UnknownPoint(s.to_string());
        let mut parts = s.split_whitespace();

        let machine = match parts.next() {
            Some("Pump") => Machine::Pump,
            Some("Motor") => Machine::Motor,
            _ => return Err(unknown()),
        };
        let end = match parts.next() {
            Some("DE") => End::De,
            Some("NDE") => End::Nde,
            _ => return Err(unknown()),
        };
        let direction = match parts.next() {
            Some("Horizontal") => Direction::Horizontal,
            Some("Vertical") => Direction::Vertical,
            Some("Axial") => Direction::Axial,
            _ => return Err(unknown()),
        };
        if parts.next().is_some() {
            return Err(unknown());
        }

        Ok(Self::new(machine, end, direction))
    }
}

impl TryFrom<String> for MeasurementPoint {
    type Error = InvalidInputError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<MeasurementPoint> for String {
    fn from(point: MeasurementPoint) -> Self {
        point.to_string()
    }
}

/// One of the four bearing temperature locations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BearingLocation {
    #[cfg_attr(feature = "serde", serde(rename = "Pump_DE"))]
    PumpDe,
    #[cfg_attr(feature = "serde", serde(rename = "Pump_NDE"))]
    PumpNde,
    #[cfg_attr(feature = "serde", serde(rename = "Motor_DE"))]
    MotorDe,
    #[cfg_attr(feature = "serde", serde(rename = "Motor_NDE"))]
    MotorNde,
}

impl BearingLocation {
    /// All locations in evaluation order.
    pub const ALL: [BearingLocation; 4] = [
        BearingLocation::PumpDe,
        BearingLocation::PumpNde,
        BearingLocation::MotorDe,
        BearingLocation::MotorNde,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            BearingLocation::PumpDe => "Pump_DE",
            BearingLocation::PumpNde => "Pump_NDE",
            BearingLocation::MotorDe => "Motor_DE",
            BearingLocation::MotorNde => "Motor_NDE",
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            BearingLocation::PumpDe => 0,
            BearingLocation::PumpNde => 1,
            BearingLocation::MotorDe => 2,
            BearingLocation::MotorNde => 3,
        }
    }
}

impl fmt::Display for BearingLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BearingLocation {
    type Err = InvalidInputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BearingLocation::ALL
            .into_iter()
            .find(|loc| loc.as_str() == s)
            .ok_or_else(|| InvalidInputError::UnknownLocation(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_order_matches_index() {
        for (i, point) in MeasurementPoint::ALL.iter().enumerate() {
            assert_eq!(point.index(), i, "{point}");
        }
    }

    #[test]
    fn test_point_text_round_trip() {
        let point: MeasurementPoint = "Motor NDE Axial".parse().unwrap();
        assert_eq!(point, MeasurementPoint::new(Machine::Motor, End::Nde, Direction::Axial));
        assert_eq!(point.to_string(), "Motor NDE Axial");
    }

    #[test]
    fn test_unknown_point_rejected() {
        assert_eq!(
            "Pump DE Radial".parse::<MeasurementPoint>(),
            Err(InvalidInputError::UnknownPoint("Pump DE Radial".to_string()))
        );
        assert!("Pump DE Axial extra".parse::<MeasurementPoint>().is_err());
        assert!("".parse::<MeasurementPoint>().is_err());
    }

    #[test]
    fn test_mirrors() {
        let point = MeasurementPoint::new(Machine::Pump, End::De, Direction::Axial);
        assert_eq!(point.mirrored_machine().to_string(), "Motor DE Axial");
        assert_eq!(point.mirrored_end().to_string(), "Pump NDE Axial");
    }

    #[test]
    fn test_bearing_location_parse() {
        assert_eq!("Motor_DE".parse::<BearingLocation>(), Ok(BearingLocation::MotorDe));
        assert!("Motor DE".parse::<BearingLocation>().is_err());
    }
}
