use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// A single audio file with its display metadata.
///
/// Tracks are value snapshots: once produced by the scanner (or received from
/// the engine) they are replaced wholesale, never patched field-by-field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// Opaque library identity, when one has been assigned.
    pub id: Option<u64>,
    pub title: String,
    /// Artist names in tag order; empty only for untagged files.
    #[serde(default)]
    pub artists: Vec<String>,
    pub album: Option<String>,
    pub file_path: PathBuf,
    /// Total duration in milliseconds; `None` means unknown, distinct from 0.
    pub duration_ms: Option<u64>,
    /// References to embedded cover-art slots.
    #[serde(default)]
    pub cover_art: Vec<String>,
    #[serde(default)]
    pub lyrics: String,
    /// Display string built from the configured fields at scan time.
    pub display: String,
}
