//! TOML configuration file support for power users.
//!
//! Instead of passing many CLI flags, users can specify settings in a
//! config file:
//!
//! ```toml
//! # rowsink.toml
//! [writer]
//! rows_per_chunk = 65536
//! max_chunk_bytes = 268435456
//! prefix = "part"
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Root configuration structure for rowsink.toml files.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Writer settings.
    #[serde(default)]
    pub writer: WriterSection,
}

/// Writer settings section.
#[derive(Debug, Default, Deserialize)]
pub struct WriterSection {
    /// Rows per chunk file.
    pub rows_per_chunk: Option<usize>,

    /// Flush once the batch payload estimate reaches this many bytes.
    pub max_chunk_bytes: Option<usize>,

    /// Chunk file name prefix.
    pub prefix: Option<String>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }
}
