/// Errors that can occur during writing
#[derive(Debug, thiserror::Error)]
pub enum WriterError {
    /// I/O error creating or writing a chunk file; fatal to the writer, a
    /// partially written columnar file is not resumable
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error from the Arrow library during batch assembly or IPC writing
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    /// Error deriving the columnar schema
    #[error("Schema error: {0}")]
    Schema(#[from] crate::schema::SchemaError),

    /// Error writing the manifest sidecar
    #[error("Manifest error: {0}")]
    Manifest(#[from] crate::manifest::ManifestError),

    /// A record value does not match its field's declared stored type
    #[error("field '{field}': expected {expected}, got {actual}")]
    TypeMismatch {
        /// Name of the mismatched field
        field: String,
        /// Value kind the schema declares
        expected: &'static str,
        /// Value kind the record supplied
        actual: &'static str,
    },

    /// A required field was absent or null (raised by
    /// [`Record::require_fields`](crate::record::Record::require_fields))
    #[error("record is missing required field '{0}'")]
    MissingField(String),

    /// Operation attempted on a writer that is closed or has failed a flush
    #[error("writer is closed")]
    Closed,
}
