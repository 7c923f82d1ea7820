//! Dynamic record model: the value enum and the name → value mapping that
//! producers hand to the writer.
//!
//! `Value` is a closed enum over the six stored scalar kinds plus `Null` and
//! `List`. String and byte content is owned, so once a value has been
//! appended the caller cannot mutate what the column buffers hold.

use std::collections::HashMap;

/// A single field value inside a [`Record`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Absent value; marks the row null in that column.
    Null,
    /// 32-bit signed integer.
    Int32(i32),
    /// 64-bit signed integer.
    Int64(i64),
    /// 32-bit float.
    Float32(f32),
    /// 64-bit float.
    Float64(f64),
    /// UTF-8 string.
    Utf8(String),
    /// Raw byte payload.
    Bytes(Vec<u8>),
    /// Ordered list of same-typed elements (for LIST-multiplicity fields).
    List(Vec<Value>),
}

impl Value {
    /// Short name of the runtime variant, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Int32(_) => "int32",
            Value::Int64(_) => "int64",
            Value::Float32(_) => "float32",
            Value::Float64(_) => "float64",
            Value::Utf8(_) => "utf8",
            Value::Bytes(_) => "bytes",
            Value::List(_) => "list",
        }
    }

    /// Whether this is [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Rough encoded size in bytes, used by the byte-based flush policy.
    ///
    /// Fixed-width kinds count their width, variable-length kinds count the
    /// payload plus offset overhead. This is an estimate of buffer growth,
    /// not of on-disk size.
    pub fn approx_encoded_len(&self) -> usize {
        match self {
            Value::Null => 1,
            Value::Int32(_) | Value::Float32(_) => 4,
            Value::Int64(_) | Value::Float64(_) => 8,
            Value::Utf8(s) => s.len() + 4,
            Value::Bytes(b) => b.len() + 4,
            Value::List(values) => {
                4 + values.iter().map(Value::approx_encoded_len).sum::<usize>()
            }
        }
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int32(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int64(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float32(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float64(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Utf8(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Utf8(v)
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Bytes(v)
    }
}

// List conversions are spelled out per element type: Vec<u8> means a byte
// payload, not a list, so a blanket impl over Vec<T> cannot coexist with it.
macro_rules! impl_list_from_vec {
    ($($elem:ty),+ $(,)?) => {
        $(
            impl From<Vec<$elem>> for Value {
                fn from(values: Vec<$elem>) -> Self {
                    Value::List(values.into_iter().map(Into::into).collect())
                }
            }
        )+
    };
}

impl_list_from_vec!(i32, i64, f32, f64, String, Value);

impl<'a> From<Vec<&'a str>> for Value {
    fn from(values: Vec<&'a str>) -> Self {
        Value::List(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(v) => v.into(),
            None => Value::Null,
        }
    }
}

/// One input row: a mapping from field name to [`Value`].
///
/// A field absent from the record is treated as null by the writer; every
/// field is nullable-capable. Callers that want stricter semantics can call
/// [`Record::require_fields`] before appending.
///
/// # Example
///
/// ```
/// use rowsink::record::Record;
///
/// let record = Record::new()
///     .set("id", 42i64)
///     .set("name", "anvil")
///     .set("tags", vec!["heavy", "iron"]);
/// assert_eq!(record.len(), 3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Record {
    values: HashMap<String, Value>,
}

impl Record {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty record sized for `fields` entries.
    pub fn with_capacity(fields: usize) -> Self {
        Self {
            values: HashMap::with_capacity(fields),
        }
    }

    /// Set a field value, fluent style.
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(field.into(), value.into());
        self
    }

    /// Set a field value in place.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(field.into(), value.into());
    }

    /// Look up a field value by name.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.values.get(field)
    }

    /// Number of fields present in the record.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the record holds no fields.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Names of fields from `required` that are absent or null.
    ///
    /// The writer itself treats absent fields as null; this helper lets
    /// callers enforce required fields up front.
    pub fn missing_fields<'a>(&self, required: &'a [&'a str]) -> Vec<&'a str> {
        required
            .iter()
            .filter(|name| self.get(name).map_or(true, Value::is_null))
            .copied()
            .collect()
    }

    /// Check that every field in `required` is present and non-null.
    pub fn require_fields(&self, required: &[&str]) -> Result<(), crate::writer::WriterError> {
        match self.missing_fields(required).first() {
            Some(name) => Err(crate::writer::WriterError::MissingField(name.to_string())),
            None => Ok(()),
        }
    }
}
