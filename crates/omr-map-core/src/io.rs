//! JSON input helpers for per-page detection dumps.

use std::{fs, path::Path};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::types::Detection;

#[derive(thiserror::Error, Debug)]
pub enum OmrIoError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Raw per-page payload as written by the detector collaborator: one list
/// per detector run on the same image.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PageDetections {
    /// Option-glyph detector output.
    #[serde(default)]
    pub glyphs: Vec<serde_json::Value>,
    /// Structure detector output.
    #[serde(default)]
    pub structures: Vec<serde_json::Value>,
}

impl PageDetections {
    /// Load a page payload from disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, OmrIoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write a page payload to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), OmrIoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Decode the glyph-detector records, dropping malformed ones.
    pub fn glyph_detections(&self) -> Vec<Detection> {
        decode_detections(&self.glyphs, "glyph")
    }

    /// Decode the structure-detector records, dropping malformed ones.
    pub fn structure_detections(&self) -> Vec<Detection> {
        decode_detections(&self.structures, "structure")
    }
}

/// Decode records one by one so a single malformed entry (missing field,
/// wrong type) costs only itself, never the page.
fn decode_detections(raw: &[serde_json::Value], detector: &str) -> Vec<Detection> {
    let mut out = Vec::with_capacity(raw.len());
    let mut dropped = 0usize;
    for value in raw {
        match serde_json::from_value::<Detection>(value.clone()) {
            Ok(det) => out.push(det),
            Err(err) => {
                dropped += 1;
                debug!("dropping malformed {detector} record: {err}");
            }
        }
    }
    if dropped > 0 {
        debug!("{detector} detector: dropped {dropped} of {} records", raw.len());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_well_formed_records() {
        let page = PageDetections {
            glyphs: vec![json!({
                "bbox": {"x1": 0.0, "y1": 0.0, "x2": 10.0, "y2": 10.0},
                "class_id": 2,
                "confidence": 0.8
            })],
            structures: Vec::new(),
        };
        let dets = page.glyph_detections();
        assert_eq!(dets.len(), 1);
        assert_eq!(dets[0].class_id, 2);
    }

    #[test]
    fn malformed_records_are_dropped_not_fatal() {
        let page = PageDetections {
            glyphs: Vec::new(),
            structures: vec![
                json!({"bbox": {"x1": 0.0, "y1": 0.0, "x2": 5.0, "y2": 5.0},
                       "class_id": 0, "confidence": 0.5}),
                json!({"class_id": 0}),
                json!("not even an object"),
            ],
        };
        let dets = page.structure_detections();
        assert_eq!(dets.len(), 1);
    }

    #[test]
    fn round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page.json");
        let page = PageDetections {
            glyphs: vec![json!({
                "bbox": {"x1": 1.0, "y1": 2.0, "x2": 3.0, "y2": 4.0},
                "class_id": 0,
                "confidence": 0.9
            })],
            structures: Vec::new(),
        };
        page.write_json(&path).unwrap();
        let loaded = PageDetections::load_json(&path).unwrap();
        assert_eq!(loaded.glyph_detections(), page.glyph_detections());
    }

    #[test]
    fn missing_sections_default_to_empty() {
        let page: PageDetections = serde_json::from_str("{}").unwrap();
        assert!(page.glyphs.is_empty());
        assert!(page.structures.is_empty());
    }
}
