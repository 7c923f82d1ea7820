use std::path::PathBuf;

/// Statistics from a completed write run
#[derive(Debug, Clone)]
pub struct WriterStats {
    /// Total rows written across all chunks
    pub total_rows: usize,
    /// Number of chunk files produced
    pub chunks_written: usize,
    /// Rows in each chunk, in file order
    pub chunk_row_counts: Vec<usize>,
    /// Path of the manifest sidecar, if one was written
    pub manifest_path: Option<PathBuf>,
}

impl std::fmt::Display for WriterStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Wrote {} rows across {} chunk file(s)",
            self.total_rows, self.chunks_written
        )
    }
}
