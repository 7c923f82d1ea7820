//! # rowsink - Streaming Row-to-Columnar Chunk Writer
//!
//! `rowsink` accepts schema-described records one at a time, accumulates
//! them into fixed-size columnar batches in memory, and flushes each full
//! batch to a new file in the Apache Arrow IPC format - one schema and one
//! record batch per file, independently readable by any Arrow
//! implementation.
//!
//! ## Key Features
//!
//! - **Bounded Memory**: rows stream through an in-memory batch that is
//!   sealed and written out whenever the configured flush policy (row count,
//!   byte estimate, or both) triggers.
//!
//! - **Typed Columnar Encoding**: per-field encoders are resolved once at
//!   construction from the schema - fixed-width scalars, UTF-8/bytes, and
//!   list-of-scalar columns - so the per-row path does no repeated type
//!   inspection.
//!
//! - **Deterministic Output**: chunk files are named `<prefix><N>.arrow`
//!   with N counting up from 0; the same input and configuration always
//!   produce the same file sequence and per-file row counts.
//!
//! - **Self-Describing Directories**: a `manifest.json` sidecar records the
//!   chunk sequence and per-chunk row counts for downstream random access.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use rowsink::record::Record;
//! use rowsink::schema::{FieldSpec, StoredType};
//! use rowsink::writer::{ChunkWriter, WriterConfig};
//!
//! let fields = vec![
//!     FieldSpec::single("id", StoredType::Int64),
//!     FieldSpec::single("name", StoredType::Utf8),
//!     FieldSpec::list("tags", StoredType::Utf8),
//! ];
//!
//! let mut writer = ChunkWriter::new("out", fields, WriterConfig::rows_per_chunk(65_536))?;
//!
//! writer.append(
//!     &Record::new()
//!         .set("id", 1i64)
//!         .set("name", "anvil")
//!         .set("tags", vec!["heavy", "iron"]),
//! )?;
//!
//! let stats = writer.close()?;
//! println!("{stats}");
//! # Ok::<(), rowsink::writer::WriterError>(())
//! ```
//!
//! This produces:
//!
//! ```text
//! out/
//! ├── chunk0.arrow     # Arrow IPC file: schema + one record batch
//! ├── chunk1.arrow
//! └── manifest.json    # chunk names + per-chunk row counts
//! ```
//!
//! ## Reading the Output
//!
//! Chunk files are plain Arrow IPC files and can be read with any Arrow
//! implementation:
//!
//! ```python
//! # Python
//! import pyarrow.ipc as ipc
//! table = ipc.open_file("out/chunk0.arrow").read_all()
//! ```
//!
//! ## Architecture
//!
//! - [`schema`]: field specs and the derived Arrow schema
//! - [`record`]: the dynamic value and record model
//! - [`encoder`]: per-field columnar encoders over Arrow builders
//! - [`batch`]: the in-flight columnar batch
//! - [`writer`]: the chunked writer orchestrator and its configuration
//! - [`manifest`]: the `manifest.json` sidecar

#![warn(missing_docs)]

pub mod batch;
pub mod encoder;
pub mod manifest;
pub mod record;
pub mod schema;
pub mod writer;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::manifest::{ChunkEntry, Manifest, ManifestError, MANIFEST_FILE_NAME};
    pub use crate::record::{Record, Value};
    pub use crate::schema::{
        ColumnarSchema, FieldSpec, Multiplicity, SchemaError, StoredType,
        CHUNK_FILE_EXTENSION, ROWSINK_FORMAT_VERSION,
    };
    pub use crate::writer::{ChunkWriter, FlushPolicy, WriterConfig, WriterError, WriterStats};
}
