use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod config;
mod convert;
mod demo;
mod info;

/// rowsink - Streaming Row-to-Columnar Chunk Writer
#[derive(Parser)]
#[command(name = "rowsink")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert JSON Lines records to chunked Arrow files
    Convert {
        /// Schema file: a JSON array of field specs
        #[arg(value_name = "SCHEMA")]
        schema: PathBuf,

        /// Input JSON Lines file, one record object per line
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output directory for chunk files and manifest
        #[arg(value_name = "OUTDIR")]
        out_dir: PathBuf,

        /// Rows per chunk file
        #[arg(short = 'r', long)]
        rows_per_chunk: Option<usize>,

        /// Flush once the batch payload estimate reaches this many bytes
        #[arg(short = 'b', long)]
        max_chunk_bytes: Option<usize>,

        /// Chunk file name prefix (default: "chunk")
        #[arg(short = 'p', long)]
        prefix: Option<String>,

        /// TOML config file; command-line flags win over file settings
        #[arg(short = 'c', long)]
        config: Option<PathBuf>,
    },

    /// Generate synthetic records and write them, for smoke testing
    Demo {
        /// Output directory
        #[arg(value_name = "OUTDIR", default_value = "demo_rowsink")]
        out_dir: PathBuf,

        /// Number of records to generate
        #[arg(short = 'n', long, default_value = "1000")]
        rows: usize,

        /// Rows per chunk file
        #[arg(short = 'r', long, default_value = "256")]
        rows_per_chunk: usize,
    },

    /// Display the manifest of a produced output directory
    Info {
        /// Output directory holding a manifest.json
        #[arg(value_name = "DIR")]
        dir: PathBuf,
    },
}

impl Cli {
    /// Initialize logging and dispatch the selected subcommand.
    pub fn run(self) -> Result<()> {
        let level = match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        };
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

        match self.command {
            Commands::Convert {
                schema,
                input,
                out_dir,
                rows_per_chunk,
                max_chunk_bytes,
                prefix,
                config,
            } => convert::run(convert::ConvertArgs {
                schema,
                input,
                out_dir,
                rows_per_chunk,
                max_chunk_bytes,
                prefix,
                config,
            }),
            Commands::Demo {
                out_dir,
                rows,
                rows_per_chunk,
            } => demo::run(&out_dir, rows, rows_per_chunk),
            Commands::Info { dir } => info::run(&dir),
        }
    }
}
