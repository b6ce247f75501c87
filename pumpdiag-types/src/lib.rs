//! # pumpdiag-types
//!
//! Data model for multi-domain condition assessment of a centrifugal
//! pump-motor unit. This crate defines the measurement records handed to the
//! diagnostic engine and the result records it produces.
//!
//! ## Design Goals
//!
//! - **Fixed schemas**: the twelve vibration points and four bearing
//!   locations are closed enums, so a complete survey is checked once at
//!   construction
//! - **Closed diagnosis codes**: one enum per domain, no free-form strings
//! - **Optional serialization**: enable the `serde` feature for JSON
//!
//! ## Example
//!
//! ```rust
//! use pumpdiag_types::{BearingLocation, BearingTemperatures, MeasurementPoint};
//!
//! let point: MeasurementPoint = "Pump DE Horizontal".parse().unwrap();
//! assert_eq!(point.index(), 0);
//! assert_eq!(point.mirrored_machine().to_string(), "Motor DE Horizontal");
//!
//! let temps = BearingTemperatures::new(65.0, 0.0, 68.0, 66.0);
//! assert_eq!(temps.reading(BearingLocation::PumpNde), None);
//! ```

mod context;
mod diagnosis;
mod error;
mod fluid;
mod measurement;
mod point;

pub use context::*;
pub use diagnosis::*;
pub use error::*;
pub use fluid::*;
pub use measurement::*;
pub use point::*;
