//! # pumpdiag
//!
//! Rule-based fault diagnosis for centrifugal pump-motor units.
//!
//! One measurement snapshot is diagnosed in three independent domains
//! (mechanical vibration, hydraulic performance, electrical supply) and the
//! three results are fused into one cross-domain assessment, with bearing
//! temperatures as corroborating evidence.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │  source ──▶ MeasurementSnapshot                                  │
//! │                 │                                                │
//! │                 ▼                                                │
//! │  ┌──────┐   ┌──────────┐   ┌───────────┐   ┌────────┐            │
//! │  │ calc │──▶│ diagnose │──▶│ aggregate │──▶│ report │──▶ text    │
//! │  └──────┘   └──────────┘   └───────────┘   └────────┘            │
//! │                 │                                                │
//! │                 └──▶ recommend ──▶ remediation text              │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`source`]**: snapshot input ([`SnapshotSource`] trait) from a file or stdin
//! - **[`calc`]**: derived hydraulic and electrical quantities
//! - **[`diagnose`]**: the per-domain classifiers and the temperature adjuster
//! - **[`aggregate`]**: cross-domain correlation into an [`IntegratedDiagnosisResult`]
//! - **[`recommend`]**: remediation text per diagnosis code
//! - **[`report`]**: the fixed-layout plain-text export
//! - **[`thresholds`]**: reference limits, overridable by file and environment
//! - **[`run`]**: [`DiagnosticRun`] ties the stages together for one snapshot
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! pumpdiag --file snapshot.json
//! cat snapshot.json | pumpdiag --file - --recommendations
//! pumpdiag --file snapshot.json --config thresholds.toml --json results.json
//! ```
//!
//! ### As a library
//!
//! ```no_run
//! use pumpdiag::{DiagnosticRun, FileSource, SnapshotSource, ThresholdConfig};
//!
//! let config = ThresholdConfig::load(None)?;
//! let snapshot = FileSource::new("snapshot.json").load()?;
//! let run = DiagnosticRun::from_snapshot(&snapshot, &config);
//! println!("{}", run.report(&config));
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod aggregate;
pub mod calc;
pub mod diagnose;
pub mod recommend;
pub mod report;
pub mod run;
pub mod source;
pub mod thresholds;

pub use aggregate::aggregate;
pub use pumpdiag_types::IntegratedDiagnosisResult;
pub use recommend::recommend;
pub use report::{render_report, ReportData};
pub use run::DiagnosticRun;
pub use source::{FileSource, MeasurementSnapshot, ReaderSource, SnapshotSource};
pub use thresholds::ThresholdConfig;
