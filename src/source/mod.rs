//! Snapshot source abstraction.
//!
//! A run consumes exactly one [`MeasurementSnapshot`]. Sources decide where
//! it comes from: a JSON file on disk or any reader such as stdin.

mod file;
mod reader;
mod snapshot;

pub use file::FileSource;
pub use reader::ReaderSource;
pub use snapshot::{ContextSection, HydraulicSection, MeasurementSnapshot, VibrationSection};

use std::fmt::Debug;

/// Trait for obtaining a measurement snapshot.
///
/// # Example
///
/// ```no_run
/// use pumpdiag::{FileSource, SnapshotSource};
///
/// let mut source = FileSource::new("snapshot.json");
/// let snapshot = source.load()?;
/// println!("Machine {}", snapshot.context.machine_id);
/// # Ok::<(), anyhow::Error>(())
/// ```
pub trait SnapshotSource: Debug {
    /// Read and parse one snapshot.
    ///
    /// Fails when the input cannot be read, is not valid JSON, or breaks the
    /// fixed point/location schema.
    fn load(&mut self) -> anyhow::Result<MeasurementSnapshot>;

    /// Returns a human-readable description of the source.
    fn description(&self) -> &str;
}
