use crate::schema::CHUNK_FILE_EXTENSION;

/// When to seal the in-memory batch and flush it to a chunk file.
///
/// One policy governs a writer for its whole lifetime; it is evaluated after
/// every append. Byte limits compare against an estimate of accumulated
/// value payload, not the exact on-disk size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlushPolicy {
    /// Flush once the batch holds this many rows.
    Rows(usize),
    /// Flush once the batch's estimated payload reaches this many bytes.
    Bytes(usize),
    /// Flush when either limit is reached, whichever comes first.
    RowsOrBytes(usize, usize),
}

impl FlushPolicy {
    pub(crate) fn should_flush(&self, rows: usize, approx_bytes: usize) -> bool {
        match *self {
            FlushPolicy::Rows(limit) => rows >= limit,
            FlushPolicy::Bytes(limit) => approx_bytes >= limit,
            FlushPolicy::RowsOrBytes(row_limit, byte_limit) => {
                rows >= row_limit || approx_bytes >= byte_limit
            }
        }
    }
}

impl Default for FlushPolicy {
    fn default() -> Self {
        // 64k rows is a good batch for downstream scans; the byte cap keeps
        // wide or blob-heavy schemas from holding hundreds of MB in memory.
        Self::RowsOrBytes(65_536, 512 * 1024 * 1024)
    }
}

/// Configuration for a [`ChunkWriter`](super::ChunkWriter).
///
/// All tunables live here: flush policy, file naming, and builder
/// pre-allocation. A writer takes its configuration once at construction.
#[derive(Debug, Clone)]
pub struct WriterConfig {
    /// When to seal and flush the in-memory batch.
    pub flush_policy: FlushPolicy,

    /// Chunk file name prefix; files are named `<prefix><N><extension>`
    /// with N starting at 0.
    pub file_prefix: String,

    /// Chunk file extension, including the leading dot.
    pub file_extension: String,

    /// Rows to pre-size column builders for.
    pub initial_row_capacity: usize,

    /// Whether `close()` writes the `manifest.json` sidecar.
    pub write_manifest: bool,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            flush_policy: FlushPolicy::default(),
            file_prefix: "chunk".to_string(),
            file_extension: CHUNK_FILE_EXTENSION.to_string(),
            // 1k rows of headroom before the first builder growth
            initial_row_capacity: 1024,
            write_manifest: true,
        }
    }
}

impl WriterConfig {
    /// Configuration flushing every `rows` rows.
    pub fn rows_per_chunk(rows: usize) -> Self {
        Self {
            flush_policy: FlushPolicy::Rows(rows),
            initial_row_capacity: rows.clamp(1, 65_536),
            ..Self::default()
        }
    }

    /// Configuration flushing once the batch's payload estimate reaches
    /// `bytes`.
    pub fn max_chunk_bytes(bytes: usize) -> Self {
        Self {
            flush_policy: FlushPolicy::Bytes(bytes),
            ..Self::default()
        }
    }

    /// Override the chunk file prefix, fluent style.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.file_prefix = prefix.into();
        self
    }
}
