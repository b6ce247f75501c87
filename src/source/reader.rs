//! Reader-based snapshot source, used for stdin.

use std::fmt::Debug;
use std::io::{self, Read, Stdin};

use anyhow::Context;

use super::{MeasurementSnapshot, SnapshotSource};

/// Reads a measurement snapshot from any byte stream.
#[derive(Debug)]
pub struct ReaderSource<R> {
    reader: R,
    description: String,
}

impl<R: Read + Debug> ReaderSource<R> {
    pub fn new(reader: R, description: impl Into<String>) -> Self {
        Self {
            reader,
            description: description.into(),
        }
    }
}

impl ReaderSource<Stdin> {
    /// Source reading the whole of standard input.
    pub fn stdin() -> Self {
        Self::new(io::stdin(), "stdin")
    }
}

impl<R: Read + Debug> SnapshotSource for ReaderSource<R> {
    fn load(&mut self) -> anyhow::Result<MeasurementSnapshot> {
        let mut content = String::new();
        self.reader
            .read_to_string(&mut content)
            .with_context(|| format!("Read error: {}", self.description))?;
        let snapshot = serde_json::from_str(&content)
            .with_context(|| format!("Parse error: {}", self.description))?;
        tracing::debug!(source = %self.description, bytes = content.len(), "snapshot loaded");
        Ok(snapshot)
    }

    fn description(&self) -> &str {
        &self.description
    }
}
