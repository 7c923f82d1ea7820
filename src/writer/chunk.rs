use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use arrow::array::{ArrayRef, RecordBatchOptions};
use arrow::datatypes::Schema;
use arrow::ipc::writer::FileWriter;
use arrow::record_batch::RecordBatch;
use log::{debug, info};

use crate::batch::BatchBuffer;
use crate::manifest::{ChunkEntry, Manifest, MANIFEST_FILE_NAME};
use crate::record::Record;
use crate::schema::{ColumnarSchema, FieldSpec};

use super::config::WriterConfig;
use super::error::WriterError;
use super::stats::WriterStats;

/// Streaming writer that accumulates records into columnar batches and
/// flushes each full batch to a new Arrow IPC file.
///
/// Chunk files are named `<prefix><N><extension>` with N monotonically
/// increasing from 0, so the same input with the same configuration always
/// produces the same file sequence. A single producer drives the writer;
/// there is no internal locking and every flush happens synchronously inside
/// the `append` (or `close`) call that triggered it.
///
/// Failure semantics: a flush that fails leaves an unusable output file and
/// drops the rows of the batch being flushed. The writer poisons itself and
/// every later operation reports [`WriterError::Closed`] - recovery is the
/// caller's decision, not something the writer pretends to offer.
///
/// # Example
///
/// ```no_run
/// use rowsink::record::Record;
/// use rowsink::schema::{FieldSpec, StoredType};
/// use rowsink::writer::{ChunkWriter, WriterConfig};
///
/// let fields = vec![
///     FieldSpec::single("id", StoredType::Int64),
///     FieldSpec::list("tags", StoredType::Utf8),
/// ];
/// let mut writer = ChunkWriter::new("out", fields, WriterConfig::rows_per_chunk(1024))?;
/// writer.append(&Record::new().set("id", 1i64).set("tags", vec!["a", "b"]))?;
/// let stats = writer.close()?;
/// println!("{stats}");
/// # Ok::<(), rowsink::writer::WriterError>(())
/// ```
pub struct ChunkWriter {
    out_dir: PathBuf,
    schema: ColumnarSchema,
    buffer: BatchBuffer,
    config: WriterConfig,
    chunk_row_counts: Vec<usize>,
    total_rows: usize,
    next_chunk_index: usize,
    poisoned: bool,
}

impl ChunkWriter {
    /// Create a writer for `fields`, producing chunk files under `out_dir`
    /// (created if missing).
    pub fn new(
        out_dir: impl AsRef<Path>,
        fields: Vec<FieldSpec>,
        config: WriterConfig,
    ) -> Result<Self, WriterError> {
        let schema = ColumnarSchema::from_fields(fields)?;
        let out_dir = out_dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&out_dir)?;
        let buffer = BatchBuffer::new(&schema, config.initial_row_capacity)?;
        Ok(Self {
            out_dir,
            schema,
            buffer,
            config,
            chunk_row_counts: Vec::new(),
            total_rows: 0,
            next_chunk_index: 0,
            poisoned: false,
        })
    }

    /// Append one record.
    ///
    /// The record's fields are encoded in schema order (absent entries as
    /// null); if the flush policy triggers, the batch is written out before
    /// this call returns. A rejected record (type mismatch) changes nothing
    /// and the writer stays usable; an I/O failure during a triggered flush
    /// poisons the writer.
    pub fn append(&mut self, record: &Record) -> Result<(), WriterError> {
        if self.poisoned {
            return Err(WriterError::Closed);
        }
        self.buffer.append_row(record, &self.schema)?;
        self.total_rows += 1;
        if self
            .config
            .flush_policy
            .should_flush(self.buffer.row_count(), self.buffer.approx_bytes())
        {
            self.flush()?;
        }
        Ok(())
    }

    /// Flush any partial batch, write the manifest, and return final
    /// statistics. Consuming `self` makes append-after-close
    /// unrepresentable.
    pub fn close(mut self) -> Result<WriterStats, WriterError> {
        if self.poisoned {
            return Err(WriterError::Closed);
        }
        self.flush()?;

        let manifest_path = if self.config.write_manifest {
            let entries = self
                .chunk_row_counts
                .iter()
                .enumerate()
                .map(|(index, &rows)| ChunkEntry {
                    file_name: self.chunk_file_name(index),
                    rows,
                })
                .collect();
            let path = self.out_dir.join(MANIFEST_FILE_NAME);
            Manifest::new(entries).write(&path)?;
            Some(path)
        } else {
            None
        };

        info!(
            "closed writer: {} rows across {} chunk(s) under '{}'",
            self.total_rows,
            self.chunk_row_counts.len(),
            self.out_dir.display()
        );
        Ok(WriterStats {
            total_rows: self.total_rows,
            chunks_written: self.chunk_row_counts.len(),
            chunk_row_counts: self.chunk_row_counts,
            manifest_path,
        })
    }

    /// Total rows appended so far (flushed or not).
    pub fn total_rows(&self) -> usize {
        self.total_rows
    }

    /// Rows per completed chunk, in file order. Downstream readers use this
    /// to map a global row index to a file and offset.
    pub fn chunk_row_counts(&self) -> &[usize] {
        &self.chunk_row_counts
    }

    /// Rows sitting in the current unflushed batch.
    pub fn pending_rows(&self) -> usize {
        self.buffer.row_count()
    }

    /// Chunk files completed so far.
    pub fn chunks_written(&self) -> usize {
        self.chunk_row_counts.len()
    }

    /// The derived Arrow schema, for downstream compatibility checks.
    pub fn schema(&self) -> Arc<Schema> {
        self.schema.arrow_schema()
    }

    /// The validated field specs, in schema order.
    pub fn fields(&self) -> &[FieldSpec] {
        self.schema.fields()
    }

    /// Current statistics; manifest path is unknown until close.
    pub fn stats(&self) -> WriterStats {
        WriterStats {
            total_rows: self.total_rows,
            chunks_written: self.chunk_row_counts.len(),
            chunk_row_counts: self.chunk_row_counts.clone(),
            manifest_path: None,
        }
    }

    fn chunk_file_name(&self, index: usize) -> String {
        format!(
            "{}{}{}",
            self.config.file_prefix, index, self.config.file_extension
        )
    }

    /// Seal the current batch and write it to the next chunk file.
    /// No-op on an empty batch.
    fn flush(&mut self) -> Result<(), WriterError> {
        let rows = self.buffer.row_count();
        if rows == 0 {
            return Ok(());
        }

        let columns = self.buffer.finish_columns();
        self.buffer.mark_drained();

        let file_name = self.chunk_file_name(self.next_chunk_index);
        let path = self.out_dir.join(&file_name);
        match write_chunk(&path, &self.schema, columns, rows) {
            Ok(()) => {
                self.next_chunk_index += 1;
                self.chunk_row_counts.push(rows);
                debug!("wrote chunk '{}' ({} rows)", path.display(), rows);
                Ok(())
            }
            Err(err) => {
                // The batch was already drained out of the builders; those
                // rows are gone and the half-written file cannot be trusted.
                self.poisoned = true;
                Err(err)
            }
        }
    }
}

/// Serialize one sealed batch as a complete Arrow IPC file: schema plus a
/// single record batch. The file handle lives only for this call.
fn write_chunk(
    path: &Path,
    schema: &ColumnarSchema,
    columns: Vec<ArrayRef>,
    rows: usize,
) -> Result<(), WriterError> {
    // Explicit row count keeps zero-column schemas well-formed.
    let options = RecordBatchOptions::new().with_row_count(Some(rows));
    let batch = RecordBatch::try_new_with_options(schema.arrow_schema(), columns, &options)?;

    let file = File::create(path)?;
    let mut writer = FileWriter::try_new(BufWriter::new(file), schema.arrow_schema().as_ref())?;
    writer.write(&batch)?;
    writer.finish()?;
    // Surface buffered-write failures here instead of losing them on drop.
    writer.into_inner()?.flush()?;
    Ok(())
}
