//! Manifest inspection.

use std::path::Path;

use anyhow::{Context, Result};

use rowsink::manifest::{Manifest, MANIFEST_FILE_NAME};

/// Print the manifest of a produced output directory.
pub fn run(dir: &Path) -> Result<()> {
    let path = dir.join(MANIFEST_FILE_NAME);
    let manifest = Manifest::read(&path)
        .with_context(|| format!("Failed to read manifest: {}", path.display()))?;

    println!("Format version: {}", manifest.format_version);
    println!("Run id:         {}", manifest.run_id);
    println!("Created:        {}", manifest.created);
    println!("Total rows:     {}", manifest.total_rows);
    println!("Chunks:         {}", manifest.chunks.len());
    for chunk in &manifest.chunks {
        println!("  {:<28} {:>12} rows", chunk.file_name, chunk.rows);
    }
    Ok(())
}
