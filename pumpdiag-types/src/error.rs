//! Input contract errors.

use thiserror::Error;

use crate::{BearingLocation, MeasurementPoint};

/// The caller handed over a measurement set that does not match the fixed schema.
///
/// This is the only hard failure in the diagnostic pipeline. Numeric edge
/// cases (zero flow, zero rated values) never produce an error; they degrade
/// to zero. A temperature of `0` is a valid "not measured" reading, a missing
/// location key is not.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidInputError {
    /// One of the twelve survey points has no reading.
    #[error("missing measurement point: {0}")]
    MissingPoint(MeasurementPoint),

    /// A survey key does not name one of the twelve points.
    #[error("unknown measurement point: '{0}'")]
    UnknownPoint(String),

    /// One of the four bearing locations has no temperature entry.
    #[error("missing bearing temperature: {0}")]
    MissingTemperature(BearingLocation),

    /// A temperature key does not name one of the four bearing locations.
    #[error("unknown bearing location: '{0}'")]
    UnknownLocation(String),
}
