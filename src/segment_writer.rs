use anyhow::{Result, Context};
use std::path::Path;
use log::debug;

use crate::file_utils::FileManager;
use crate::segmentation::Segment;

// @module: Segment sink writing the key/value interchange format

/// Writes one JSON array of segments per document
#[derive(Debug, Clone)]
pub struct SegmentWriter {
    // @field: Pretty-print JSON output
    pretty: bool,
}

impl SegmentWriter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    /// Serialize segments to a JSON string
    pub fn to_json(&self, segments: &[Segment]) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(segments)
        } else {
            serde_json::to_string(segments)
        };
        json.context("Failed to serialize segments")
    }

    /// Write segments to `path`, creating parent directories as needed
    pub fn write<P: AsRef<Path>>(&self, path: P, segments: &[Segment]) -> Result<()> {
        let path = path.as_ref();
        let json = self.to_json(segments)?;
        FileManager::write_to_file(path, &json)?;
        debug!("Wrote {} segments to {:?}", segments.len(), path);
        Ok(())
    }

    /// Read back previously written segments
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Vec<Segment>> {
        let path = path.as_ref();
        let content = FileManager::read_to_string(path)?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse segment file: {:?}", path))
    }
}

impl Default for SegmentWriter {
    fn default() -> Self {
        Self::new(true)
    }
}
