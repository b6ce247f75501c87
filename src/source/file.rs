//! File-based snapshot source.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;

use super::{MeasurementSnapshot, SnapshotSource};

/// Reads a measurement snapshot from a JSON file.
#[derive(Debug)]
pub struct FileSource {
    path: PathBuf,
    description: String,
}

impl FileSource {
    /// Create a new file source for the given path.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let description = format!("file: {}", path.display());
        Self { path, description }
    }

    /// Returns the path being read.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotSource for FileSource {
    fn load(&mut self) -> anyhow::Result<MeasurementSnapshot> {
        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Read error: {}", self.path.display()))?;
        let snapshot = serde_json::from_str(&content)
            .with_context(|| format!("Parse error: {}", self.path.display()))?;
        tracing::debug!(source = %self.description, "snapshot loaded");
        Ok(snapshot)
    }

    fn description(&self) -> &str {
        &self.description
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn sample_json() -> &'static str {
        r#"{
            "context": { "machine_id": "P-101", "rpm": 2950, "fluid": "diesel" },
            "electrical": {
                "voltages": [400.0, 402.0, 398.0],
                "currents": [82.0, 84.0, 83.0],
                "rated_voltage": 400.0,
                "full_load_amps": 85.0
            }
        }"#
    }

    #[test]
    fn test_file_source_new() {
        let source = FileSource::new("/tmp/snapshot.json");
        assert_eq!(source.path(), Path::new("/tmp/snapshot.json"));
        assert_eq!(source.description(), "file: /tmp/snapshot.json");
    }

    #[test]
    fn test_file_source_reads_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{}", sample_json()).unwrap();

        let mut source = FileSource::new(file.path());
        let snapshot = source.load().unwrap();
        assert_eq!(snapshot.context.machine_id, "P-101");
        assert!(snapshot.electrical.is_some());
        assert!(snapshot.vibration.is_none());
    }

    #[test]
    fn test_file_source_missing_file() {
        let mut source = FileSource::new("/nonexistent/path/snapshot.json");
        let err = source.load().unwrap_err();
        assert!(err.to_string().contains("Read error"));
    }

    #[test]
    fn test_file_source_invalid_json() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "not valid json").unwrap();

        let mut source = FileSource::new(file.path());
        let err = source.load().unwrap_err();
        assert!(err.to_string().contains("Parse error"));
    }

    #[test]
    fn test_file_source_rejects_incomplete_survey() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"{{
                "context": {{ "machine_id": "P-101", "rpm": 2950 }},
                "vibration": {{
                    "points": {{
                        "Pump DE Horizontal": {{ "velocity": 1.0, "band1": 0.3, "band2": 0.2, "band3": 0.15 }}
                    }}
                }}
            }}"#
        )
        .unwrap();

        let mut source = FileSource::new(file.path());
        let err = source.load().unwrap_err();
        assert!(format!("{err:#}").contains("Pump DE Vertical"), "{err:#}");
    }
}
