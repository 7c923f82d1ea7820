//! JSON Lines to chunked Arrow conversion.
//!
//! Records are mapped onto the declared schema: JSON numbers become the
//! field's stored integer/float kind, strings become UTF-8, arrays become
//! list values (or byte payloads for BYTES fields), and `null` or absent
//! members become nulls.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use log::info;

use rowsink::record::{Record, Value};
use rowsink::schema::{FieldSpec, Multiplicity, StoredType};
use rowsink::writer::{ChunkWriter, FlushPolicy, WriterConfig};

use super::config::Config;

/// Arguments for the convert subcommand.
pub struct ConvertArgs {
    /// Schema file path.
    pub schema: PathBuf,
    /// Input JSON Lines path.
    pub input: PathBuf,
    /// Output directory.
    pub out_dir: PathBuf,
    /// Rows-per-chunk flag.
    pub rows_per_chunk: Option<usize>,
    /// Byte-limit flag.
    pub max_chunk_bytes: Option<usize>,
    /// File prefix flag.
    pub prefix: Option<String>,
    /// Optional TOML config file.
    pub config: Option<PathBuf>,
}

/// Run the conversion.
pub fn run(args: ConvertArgs) -> Result<()> {
    let file_config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };

    // Flags win over config-file settings.
    let rows = args.rows_per_chunk.or(file_config.writer.rows_per_chunk);
    let bytes = args.max_chunk_bytes.or(file_config.writer.max_chunk_bytes);
    let prefix = args.prefix.or(file_config.writer.prefix);

    let flush_policy = match (rows, bytes) {
        (Some(rows), Some(bytes)) => FlushPolicy::RowsOrBytes(rows, bytes),
        (Some(rows), None) => FlushPolicy::Rows(rows),
        (None, Some(bytes)) => FlushPolicy::Bytes(bytes),
        (None, None) => FlushPolicy::default(),
    };
    let mut config = WriterConfig {
        flush_policy,
        ..WriterConfig::default()
    };
    if let Some(prefix) = prefix {
        config.file_prefix = prefix;
    }

    let fields = load_schema(&args.schema)?;
    info!(
        "converting '{}' with {} field(s) into '{}'",
        args.input.display(),
        fields.len(),
        args.out_dir.display()
    );

    let mut writer = ChunkWriter::new(&args.out_dir, fields.clone(), config)
        .context("Failed to create chunk writer")?;

    let input = File::open(&args.input)
        .with_context(|| format!("Failed to open input file: {}", args.input.display()))?;
    let mut line_number = 0usize;
    for line in BufReader::new(input).lines() {
        line_number += 1;
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let json: serde_json::Value = serde_json::from_str(&line)
            .with_context(|| format!("line {line_number}: invalid JSON"))?;
        let record = record_from_json(&fields, &json)
            .with_context(|| format!("line {line_number}"))?;
        writer
            .append(&record)
            .with_context(|| format!("line {line_number}"))?;
    }

    let stats = writer.close()?;
    println!("{stats}");
    Ok(())
}

/// Load and validate the schema file (validation proper happens in the
/// writer; this is the deserialization step).
fn load_schema(path: &Path) -> Result<Vec<FieldSpec>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read schema file: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse schema file: {}", path.display()))
}

/// Map one JSON object onto the schema's fields.
fn record_from_json(fields: &[FieldSpec], json: &serde_json::Value) -> Result<Record> {
    let object = match json.as_object() {
        Some(object) => object,
        None => bail!("record must be a JSON object"),
    };

    let mut record = Record::with_capacity(fields.len());
    for spec in fields {
        if let Some(member) = object.get(&spec.name) {
            record.insert(spec.name.clone(), value_from_json(spec, member)?);
        }
    }
    Ok(record)
}

fn value_from_json(spec: &FieldSpec, json: &serde_json::Value) -> Result<Value> {
    if json.is_null() {
        return Ok(Value::Null);
    }
    match spec.multiplicity {
        Multiplicity::Single => scalar_from_json(spec, json),
        Multiplicity::List => match json.as_array() {
            Some(items) => Ok(Value::List(
                items
                    .iter()
                    .map(|item| {
                        if item.is_null() {
                            Ok(Value::Null)
                        } else {
                            scalar_from_json(spec, item)
                        }
                    })
                    .collect::<Result<Vec<_>>>()?,
            )),
            None => bail!("field '{}': expected a JSON array", spec.name),
        },
    }
}

fn scalar_from_json(spec: &FieldSpec, json: &serde_json::Value) -> Result<Value> {
    let value = match spec.stored_type {
        StoredType::Int32 => json
            .as_i64()
            .and_then(|v| i32::try_from(v).ok())
            .map(Value::Int32),
        StoredType::Int64 => json.as_i64().map(Value::Int64),
        StoredType::Float32 => json.as_f64().map(|v| Value::Float32(v as f32)),
        StoredType::Float64 => json.as_f64().map(Value::Float64),
        StoredType::Utf8 => json.as_str().map(|s| Value::Utf8(s.to_string())),
        StoredType::Bytes => bytes_from_json(json),
    };
    match value {
        Some(value) => Ok(value),
        None => bail!(
            "field '{}': cannot represent {} as {}",
            spec.name,
            json,
            spec.stored_type
        ),
    }
}

/// BYTES fields are supplied as a JSON array of integers in 0..=255.
fn bytes_from_json(json: &serde_json::Value) -> Option<Value> {
    let items = json.as_array()?;
    let mut bytes = Vec::with_capacity(items.len());
    for item in items {
        bytes.push(u8::try_from(item.as_u64()?).ok()?);
    }
    Some(Value::Bytes(bytes))
}
