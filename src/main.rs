//! # rowsink Converter
//!
//! Command-line front end for the rowsink chunk writer.
//!
//! ## Usage
//!
//! ```bash
//! # Convert JSON Lines records to chunked Arrow files
//! rowsink convert schema.json records.jsonl out/
//!
//! # Generate synthetic data for smoke testing
//! rowsink demo out/
//!
//! # Inspect a produced directory
//! rowsink info out/
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli.run()
}
