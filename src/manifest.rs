//! Human-readable `manifest.json` sidecar.
//!
//! Written next to the chunk files at close time so the produced directory
//! can be inspected (and randomly accessed) without opening any Arrow file:
//!
//! ```json
//! {
//!   "format_version": "1.0.0",
//!   "run_id": "7cbb3a0e-...",
//!   "created": "2026-08-08T12:00:00Z",
//!   "total_rows": 3,
//!   "chunks": [
//!     {"file_name": "chunk0.arrow", "rows": 2},
//!     {"file_name": "chunk1.arrow", "rows": 1}
//!   ]
//! }
//! ```

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::schema::ROWSINK_FORMAT_VERSION;

/// File name of the manifest sidecar inside the output directory.
pub const MANIFEST_FILE_NAME: &str = "manifest.json";

/// Errors reading or writing a manifest
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    /// I/O error on the manifest file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed or unserializable manifest content
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// One chunk file in the output sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkEntry {
    /// Chunk file name, relative to the output directory.
    pub file_name: String,
    /// Rows stored in that chunk.
    pub rows: usize,
}

/// Description of one completed write run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    /// Manifest format version.
    pub format_version: String,
    /// Unique identifier of the producing run.
    pub run_id: Uuid,
    /// When the manifest was written.
    pub created: DateTime<Utc>,
    /// Sum of rows across all chunks.
    pub total_rows: usize,
    /// Chunk files in write order.
    pub chunks: Vec<ChunkEntry>,
}

impl Manifest {
    /// Build a manifest for `chunks`, stamping version, run id, and time.
    pub fn new(chunks: Vec<ChunkEntry>) -> Self {
        Self {
            format_version: ROWSINK_FORMAT_VERSION.to_string(),
            run_id: Uuid::new_v4(),
            created: Utc::now(),
            total_rows: chunks.iter().map(|c| c.rows).sum(),
            chunks,
        }
    }

    /// Write the manifest as pretty-printed JSON.
    pub fn write(&self, path: impl AsRef<Path>) -> Result<(), ManifestError> {
        let file = File::create(path)?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)?;
        Ok(())
    }

    /// Read a manifest back from disk.
    pub fn read(path: impl AsRef<Path>) -> Result<Self, ManifestError> {
        let file = File::open(path)?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }
}
