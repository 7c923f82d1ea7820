//! # Chunked writer
//!
//! This module provides the orchestrator that turns a stream of records into
//! a sequence of Arrow IPC chunk files.
//!
//! ## Design Principles
//!
//! 1. **Streaming Architecture**: Rows accumulate into an in-memory columnar
//!    batch; once the flush policy triggers, the batch is sealed and written
//!    to a new file, so memory stays bounded regardless of input length.
//!
//! 2. **One Batch Per File**: Every chunk file is a complete, independently
//!    readable Arrow IPC file holding the schema and exactly one record
//!    batch.
//!
//! 3. **Single Flush Policy**: One policy (row count, byte estimate, or
//!    both) is chosen at construction and applied consistently after every
//!    append.
//!
//! 4. **Synchronous**: `append` returns only after any triggered flush has
//!    completed; there is no background thread and no cancellation.

mod chunk;
mod config;
mod error;
mod stats;

pub use chunk::ChunkWriter;
pub use config::{FlushPolicy, WriterConfig};
pub use error::WriterError;
pub use stats::WriterStats;
