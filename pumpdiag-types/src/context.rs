//! Run-wide context shared by every stage.

use crate::FluidKind;

/// Identity of the machine and run, passed explicitly to each stage.
///
/// Built once per snapshot and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SharedContext {
    /// Machine tag, e.g. `P-101`.
    pub machine_id: String,
    /// Operating speed, rev/min.
    pub rpm: u32,
    pub fluid: FluidKind,
    /// Assessment timestamp as printed in the report.
    pub timestamp: String,
}

impl SharedContext {
    pub fn new(machine_id: impl Into<String>, rpm: u32, fluid: FluidKind, timestamp: impl Into<String>) -> Self {
        Self {
            machine_id: machine_id.into(),
            rpm,
            fluid,
            timestamp: timestamp.into(),
        }
    }

    /// Shaft running frequency (1×RPM), Hz.
    pub fn running_speed_hz(&self) -> f64 {
        f64::from(self.rpm) / 60.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_running_speed() {
        let ctx = SharedContext::new("P-101", 2950, FluidKind::Diesel, "2026-01-05 08:30:00");
        assert!((ctx.running_speed_hz() - 49.1667).abs() < 1e-3);
    }
}
