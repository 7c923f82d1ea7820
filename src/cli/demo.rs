//! Synthetic data generation for smoke testing.

use std::path::Path;

use anyhow::Result;
use log::info;

use rowsink::record::{Record, Value};
use rowsink::schema::{FieldSpec, StoredType};
use rowsink::writer::{ChunkWriter, WriterConfig};

/// Generate `rows` synthetic records and write them under `out_dir`.
pub fn run(out_dir: &Path, rows: usize, rows_per_chunk: usize) -> Result<()> {
    let fields = vec![
        FieldSpec::single("id", StoredType::Int64),
        FieldSpec::single("name", StoredType::Utf8),
        FieldSpec::single("score", StoredType::Float64),
        FieldSpec::list("tags", StoredType::Utf8),
        FieldSpec::single("payload", StoredType::Bytes),
    ];

    let mut writer = ChunkWriter::new(
        out_dir,
        fields,
        WriterConfig::rows_per_chunk(rows_per_chunk),
    )?;

    for i in 0..rows {
        let tags = match i % 4 {
            // Exercise the null-list and empty-list paths too.
            0 => Value::Null,
            1 => Value::List(vec![]),
            _ => Value::from(vec![format!("tag-{}", i % 7), "demo".to_string()]),
        };
        let record = Record::new()
            .set("id", i as i64)
            .set("name", format!("record-{i}"))
            .set("score", (i % 100) as f64 / 100.0)
            .set("tags", tags)
            .set("payload", vec![(i % 256) as u8; 16]);
        writer.append(&record)?;
    }

    let stats = writer.close()?;
    info!("demo data written to '{}'", out_dir.display());
    println!("{stats}");
    Ok(())
}
