//! Columnar schema definition and the mapping onto Apache Arrow.
//!
//! A [`ColumnarSchema`] is built once from an ordered list of [`FieldSpec`]s
//! and stays immutable for the lifetime of a writer. Field order is
//! significant: the writer's column buffers are index-aligned with the
//! schema, so the derived Arrow schema preserves input order exactly.
//!
//! ## Type mapping
//!
//! | Stored type | Single | List |
//! |-------------|--------|------|
//! | Int32 | `Int32` | `List<Int32>` |
//! | Int64 | `Int64` | `List<Int64>` |
//! | Float32 | `Float32` | `List<Float32>` |
//! | Float64 | `Float64` | `List<Float64>` |
//! | Utf8 | `Utf8` | `List<Utf8>` |
//! | Bytes | `Binary` | unsupported |
//!
//! All fields are nullable. The BYTES × LIST combination has no columnar
//! encoding and is rejected at construction.

use std::sync::Arc;

use arrow::datatypes::{DataType, Field, Schema};
use serde::{Deserialize, Serialize};

#[cfg(test)]
mod tests;

/// Format version recorded in the output manifest - follows semantic versioning.
pub const ROWSINK_FORMAT_VERSION: &str = "1.0.0";

/// Default extension for chunk files.
pub const CHUNK_FILE_EXTENSION: &str = ".arrow";

/// Errors raised while deriving a columnar schema.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// The (stored type, multiplicity) pair has no columnar encoding.
    #[error("field '{field}': no columnar encoding for {stored_type} lists")]
    UnsupportedType {
        /// Name of the offending field.
        field: String,
        /// The stored type that cannot be list-encoded.
        stored_type: StoredType,
    },

    /// Two fields share a name; positional lookup would be ambiguous.
    #[error("duplicate field name '{0}'")]
    DuplicateField(String),
}

/// Physical scalar type a field is persisted as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoredType {
    /// 32-bit signed integer.
    Int32,
    /// 64-bit signed integer.
    Int64,
    /// 32-bit float.
    Float32,
    /// 64-bit float.
    Float64,
    /// UTF-8 string.
    Utf8,
    /// Raw bytes.
    Bytes,
}

impl StoredType {
    /// The Arrow data type for a single value of this kind.
    pub fn arrow_type(&self) -> DataType {
        match self {
            StoredType::Int32 => DataType::Int32,
            StoredType::Int64 => DataType::Int64,
            StoredType::Float32 => DataType::Float32,
            StoredType::Float64 => DataType::Float64,
            StoredType::Utf8 => DataType::Utf8,
            StoredType::Bytes => DataType::Binary,
        }
    }
}

impl std::fmt::Display for StoredType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            StoredType::Int32 => "int32",
            StoredType::Int64 => "int64",
            StoredType::Float32 => "float32",
            StoredType::Float64 => "float64",
            StoredType::Utf8 => "utf8",
            StoredType::Bytes => "bytes",
        };
        f.write_str(name)
    }
}

/// Whether a field holds one value or an ordered list of values per row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Multiplicity {
    /// One value per row.
    #[default]
    Single,
    /// An ordered list of values per row.
    List,
}

/// Immutable description of one field: name, stored type, multiplicity.
///
/// Doubles as the on-disk schema-file format for the CLI:
///
/// ```json
/// [
///   {"name": "id", "type": "int64"},
///   {"name": "tags", "type": "utf8", "multiplicity": "list"}
/// ]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Field name, unique within the schema.
    pub name: String,
    /// Physical scalar type.
    #[serde(rename = "type")]
    pub stored_type: StoredType,
    /// Single value or list per row; defaults to single.
    #[serde(default)]
    pub multiplicity: Multiplicity,
}

impl FieldSpec {
    /// A single-valued field.
    pub fn single(name: impl Into<String>, stored_type: StoredType) -> Self {
        Self {
            name: name.into(),
            stored_type,
            multiplicity: Multiplicity::Single,
        }
    }

    /// A list-valued field.
    pub fn list(name: impl Into<String>, stored_type: StoredType) -> Self {
        Self {
            name: name.into(),
            stored_type,
            multiplicity: Multiplicity::List,
        }
    }

    /// Derive the Arrow field. Fails for the BYTES × LIST pair.
    fn to_arrow_field(&self) -> Result<Field, SchemaError> {
        match self.multiplicity {
            Multiplicity::Single => {
                Ok(Field::new(&self.name, self.stored_type.arrow_type(), true))
            }
            Multiplicity::List => {
                if self.stored_type == StoredType::Bytes {
                    return Err(SchemaError::UnsupportedType {
                        field: self.name.clone(),
                        stored_type: self.stored_type,
                    });
                }
                let item = Field::new("item", self.stored_type.arrow_type(), true);
                Ok(Field::new(&self.name, DataType::List(Arc::new(item)), true))
            }
        }
    }
}

/// Ordered, validated field list plus the derived Arrow schema.
///
/// Construction is pure and deterministic; the output field order exactly
/// matches the input order.
#[derive(Debug, Clone)]
pub struct ColumnarSchema {
    fields: Vec<FieldSpec>,
    arrow: Arc<Schema>,
}

impl ColumnarSchema {
    /// Validate `fields` and derive the Arrow schema.
    pub fn from_fields(fields: Vec<FieldSpec>) -> Result<Self, SchemaError> {
        let mut seen = std::collections::HashSet::with_capacity(fields.len());
        let mut arrow_fields = Vec::with_capacity(fields.len());
        for spec in &fields {
            if !seen.insert(spec.name.as_str()) {
                return Err(SchemaError::DuplicateField(spec.name.clone()));
            }
            arrow_fields.push(spec.to_arrow_field()?);
        }
        Ok(Self {
            fields,
            arrow: Arc::new(Schema::new(arrow_fields)),
        })
    }

    /// The field specs, in schema order.
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// The derived Arrow schema.
    pub fn arrow_schema(&self) -> Arc<Schema> {
        self.arrow.clone()
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the schema holds no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
