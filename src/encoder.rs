//! Per-field column encoders.
//!
//! [`ColumnEncoder`] is a closed enum over (stored type × multiplicity):
//! six scalar variants and five list variants (BYTES has no list encoding).
//! The variant is resolved once per field when the writer is built, so the
//! per-row hot path is a single enum match instead of repeated runtime type
//! tests.
//!
//! Each variant wraps the matching Arrow builder. Builders own growable
//! backing storage: string and byte payloads are copied in at append time,
//! and `finish()` drains a builder into an immutable array while leaving it
//! empty and reusable for the next batch.

use std::sync::Arc;

use arrow::array::{
    ArrayRef, BinaryBuilder, Float32Builder, Float64Builder, Int32Builder, Int64Builder,
    ListBuilder, StringBuilder,
};

use crate::record::Value;
use crate::schema::{FieldSpec, Multiplicity, SchemaError, StoredType};
use crate::writer::WriterError;

/// Per-row bytes reserved for variable-length payloads when sizing builders.
const VARLEN_BYTES_PER_ROW: usize = 16;

/// Column encoder for one field of the active batch.
///
/// A null scalar marks the row invalid in the column's validity map. A null
/// supplied for a list field is recorded as a zero-length list, never as a
/// null list entry; a null *inside* a list is kept as a null element.
#[derive(Debug)]
pub enum ColumnEncoder {
    /// Single INT32 column.
    Int32(Int32Builder),
    /// Single INT64 column.
    Int64(Int64Builder),
    /// Single FLOAT32 column.
    Float32(Float32Builder),
    /// Single FLOAT64 column.
    Float64(Float64Builder),
    /// Single UTF8 column.
    Utf8(StringBuilder),
    /// Single BYTES column.
    Bytes(BinaryBuilder),
    /// List-of-INT32 column.
    Int32List(ListBuilder<Int32Builder>),
    /// List-of-INT64 column.
    Int64List(ListBuilder<Int64Builder>),
    /// List-of-FLOAT32 column.
    Float32List(ListBuilder<Float32Builder>),
    /// List-of-FLOAT64 column.
    Float64List(ListBuilder<Float64Builder>),
    /// List-of-UTF8 column.
    Utf8List(ListBuilder<StringBuilder>),
}

impl ColumnEncoder {
    /// Resolve the encoder variant for `spec`, pre-sizing builders for
    /// `capacity` rows.
    pub fn for_field(spec: &FieldSpec, capacity: usize) -> Result<Self, SchemaError> {
        let data_capacity = capacity * VARLEN_BYTES_PER_ROW;
        let encoder = match (spec.stored_type, spec.multiplicity) {
            (StoredType::Int32, Multiplicity::Single) => {
                ColumnEncoder::Int32(Int32Builder::with_capacity(capacity))
            }
            (StoredType::Int64, Multiplicity::Single) => {
                ColumnEncoder::Int64(Int64Builder::with_capacity(capacity))
            }
            (StoredType::Float32, Multiplicity::Single) => {
                ColumnEncoder::Float32(Float32Builder::with_capacity(capacity))
            }
            (StoredType::Float64, Multiplicity::Single) => {
                ColumnEncoder::Float64(Float64Builder::with_capacity(capacity))
            }
            (StoredType::Utf8, Multiplicity::Single) => {
                ColumnEncoder::Utf8(StringBuilder::with_capacity(capacity, data_capacity))
            }
            (StoredType::Bytes, Multiplicity::Single) => {
                ColumnEncoder::Bytes(BinaryBuilder::with_capacity(capacity, data_capacity))
            }
            (StoredType::Int32, Multiplicity::List) => {
                ColumnEncoder::Int32List(ListBuilder::with_capacity(Int32Builder::new(), capacity))
            }
            (StoredType::Int64, Multiplicity::List) => {
                ColumnEncoder::Int64List(ListBuilder::with_capacity(Int64Builder::new(), capacity))
            }
            (StoredType::Float32, Multiplicity::List) => ColumnEncoder::Float32List(
                ListBuilder::with_capacity(Float32Builder::new(), capacity),
            ),
            (StoredType::Float64, Multiplicity::List) => ColumnEncoder::Float64List(
                ListBuilder::with_capacity(Float64Builder::new(), capacity),
            ),
            (StoredType::Utf8, Multiplicity::List) => {
                ColumnEncoder::Utf8List(ListBuilder::with_capacity(StringBuilder::new(), capacity))
            }
            (StoredType::Bytes, Multiplicity::List) => {
                return Err(SchemaError::UnsupportedType {
                    field: spec.name.clone(),
                    stored_type: spec.stored_type,
                })
            }
        };
        Ok(encoder)
    }

    /// Name of the value kind this encoder accepts, for error messages.
    pub fn expected(&self) -> &'static str {
        match self {
            ColumnEncoder::Int32(_) => "int32",
            ColumnEncoder::Int64(_) => "int64",
            ColumnEncoder::Float32(_) => "float32",
            ColumnEncoder::Float64(_) => "float64",
            ColumnEncoder::Utf8(_) => "utf8",
            ColumnEncoder::Bytes(_) => "bytes",
            ColumnEncoder::Int32List(_) => "list<int32>",
            ColumnEncoder::Int64List(_) => "list<int64>",
            ColumnEncoder::Float32List(_) => "list<float32>",
            ColumnEncoder::Float64List(_) => "list<float64>",
            ColumnEncoder::Utf8List(_) => "list<utf8>",
        }
    }

    /// Check that `value` matches this encoder without mutating anything.
    ///
    /// Used for the validation pass before any column in a row is touched.
    pub fn check(&self, field: &str, value: &Value) -> Result<(), WriterError> {
        if value.is_null() {
            return Ok(());
        }
        match (self, value) {
            (ColumnEncoder::Int32(_), Value::Int32(_))
            | (ColumnEncoder::Int64(_), Value::Int64(_))
            | (ColumnEncoder::Float32(_), Value::Float32(_))
            | (ColumnEncoder::Float64(_), Value::Float64(_))
            | (ColumnEncoder::Utf8(_), Value::Utf8(_))
            | (ColumnEncoder::Bytes(_), Value::Bytes(_)) => Ok(()),
            (ColumnEncoder::Int32List(_), Value::List(values)) => {
                check_elements(field, "list<int32>", values, |v| {
                    matches!(v, Value::Int32(_))
                })
            }
            (ColumnEncoder::Int64List(_), Value::List(values)) => {
                check_elements(field, "list<int64>", values, |v| {
                    matches!(v, Value::Int64(_))
                })
            }
            (ColumnEncoder::Float32List(_), Value::List(values)) => {
                check_elements(field, "list<float32>", values, |v| {
                    matches!(v, Value::Float32(_))
                })
            }
            (ColumnEncoder::Float64List(_), Value::List(values)) => {
                check_elements(field, "list<float64>", values, |v| {
                    matches!(v, Value::Float64(_))
                })
            }
            (ColumnEncoder::Utf8List(_), Value::List(values)) => {
                check_elements(field, "list<utf8>", values, |v| matches!(v, Value::Utf8(_)))
            }
            (encoder, other) => Err(mismatch(field, encoder.expected(), other)),
        }
    }

    /// Append one value (scalar, list, or null) for the current row.
    ///
    /// An append either succeeds completely or leaves the column unchanged:
    /// list elements are validated before the first element is written.
    pub fn append(&mut self, field: &str, value: &Value) -> Result<(), WriterError> {
        match (self, value) {
            (ColumnEncoder::Int32(b), Value::Int32(v)) => b.append_value(*v),
            (ColumnEncoder::Int32(b), Value::Null) => b.append_null(),
            (ColumnEncoder::Int64(b), Value::Int64(v)) => b.append_value(*v),
            (ColumnEncoder::Int64(b), Value::Null) => b.append_null(),
            (ColumnEncoder::Float32(b), Value::Float32(v)) => b.append_value(*v),
            (ColumnEncoder::Float32(b), Value::Null) => b.append_null(),
            (ColumnEncoder::Float64(b), Value::Float64(v)) => b.append_value(*v),
            (ColumnEncoder::Float64(b), Value::Null) => b.append_null(),
            (ColumnEncoder::Utf8(b), Value::Utf8(v)) => b.append_value(v),
            (ColumnEncoder::Utf8(b), Value::Null) => b.append_null(),
            (ColumnEncoder::Bytes(b), Value::Bytes(v)) => b.append_value(v),
            (ColumnEncoder::Bytes(b), Value::Null) => b.append_null(),

            (ColumnEncoder::Int32List(b), Value::List(values)) => {
                check_elements(field, "list<int32>", values, |v| {
                    matches!(v, Value::Int32(_))
                })?;
                for v in values {
                    match v {
                        Value::Int32(x) => b.values().append_value(*x),
                        _ => b.values().append_null(),
                    }
                }
                b.append(true);
            }
            // Null list recorded as a zero-length list.
            (ColumnEncoder::Int32List(b), Value::Null) => b.append(true),

            (ColumnEncoder::Int64List(b), Value::List(values)) => {
                check_elements(field, "list<int64>", values, |v| {
                    matches!(v, Value::Int64(_))
                })?;
                for v in values {
                    match v {
                        Value::Int64(x) => b.values().append_value(*x),
                        _ => b.values().append_null(),
                    }
                }
                b.append(true);
            }
            (ColumnEncoder::Int64List(b), Value::Null) => b.append(true),

            (ColumnEncoder::Float32List(b), Value::List(values)) => {
                check_elements(field, "list<float32>", values, |v| {
                    matches!(v, Value::Float32(_))
                })?;
                for v in values {
                    match v {
                        Value::Float32(x) => b.values().append_value(*x),
                        _ => b.values().append_null(),
                    }
                }
                b.append(true);
            }
            (ColumnEncoder::Float32List(b), Value::Null) => b.append(true),

            (ColumnEncoder::Float64List(b), Value::List(values)) => {
                check_elements(field, "list<float64>", values, |v| {
                    matches!(v, Value::Float64(_))
                })?;
                for v in values {
                    match v {
                        Value::Float64(x) => b.values().append_value(*x),
                        _ => b.values().append_null(),
                    }
                }
                b.append(true);
            }
            (ColumnEncoder::Float64List(b), Value::Null) => b.append(true),

            (ColumnEncoder::Utf8List(b), Value::List(values)) => {
                check_elements(field, "list<utf8>", values, |v| matches!(v, Value::Utf8(_)))?;
                for v in values {
                    match v {
                        Value::Utf8(s) => b.values().append_value(s),
                        _ => b.values().append_null(),
                    }
                }
                b.append(true);
            }
            (ColumnEncoder::Utf8List(b), Value::Null) => b.append(true),

            (encoder, other) => return Err(mismatch(field, encoder.expected(), other)),
        }
        Ok(())
    }

    /// Seal the column into an array and reset the builder for the next
    /// batch. Backing allocations are reused where the builder supports it.
    pub fn finish(&mut self) -> ArrayRef {
        match self {
            ColumnEncoder::Int32(b) => Arc::new(b.finish()),
            ColumnEncoder::Int64(b) => Arc::new(b.finish()),
            ColumnEncoder::Float32(b) => Arc::new(b.finish()),
            ColumnEncoder::Float64(b) => Arc::new(b.finish()),
            ColumnEncoder::Utf8(b) => Arc::new(b.finish()),
            ColumnEncoder::Bytes(b) => Arc::new(b.finish()),
            ColumnEncoder::Int32List(b) => Arc::new(b.finish()),
            ColumnEncoder::Int64List(b) => Arc::new(b.finish()),
            ColumnEncoder::Float32List(b) => Arc::new(b.finish()),
            ColumnEncoder::Float64List(b) => Arc::new(b.finish()),
            ColumnEncoder::Utf8List(b) => Arc::new(b.finish()),
        }
    }
}

fn check_elements(
    field: &str,
    expected: &'static str,
    values: &[Value],
    accepts: impl Fn(&Value) -> bool,
) -> Result<(), WriterError> {
    match values.iter().find(|v| !v.is_null() && !accepts(v)) {
        Some(bad) => Err(mismatch(field, expected, bad)),
        None => Ok(()),
    }
}

fn mismatch(field: &str, expected: &'static str, actual: &Value) -> WriterError {
    WriterError::TypeMismatch {
        field: field.to_string(),
        expected,
        actual: actual.kind(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::{Array, Int32Array, ListArray, StringArray};

    fn int32_encoder() -> ColumnEncoder {
        ColumnEncoder::for_field(&FieldSpec::single("x", StoredType::Int32), 16).unwrap()
    }

    #[test]
    fn appends_scalars_and_nulls() {
        let mut encoder = int32_encoder();
        encoder.append("x", &Value::Int32(1)).unwrap();
        encoder.append("x", &Value::Null).unwrap();
        encoder.append("x", &Value::Int32(3)).unwrap();

        let array = encoder.finish();
        let array = array.as_any().downcast_ref::<Int32Array>().unwrap();
        assert_eq!(array.len(), 3);
        assert_eq!(array.value(0), 1);
        assert!(array.is_null(1));
        assert_eq!(array.value(2), 3);
    }

    #[test]
    fn rejects_mismatched_scalar() {
        let mut encoder = int32_encoder();
        let err = encoder.append("x", &Value::Utf8("nope".into())).unwrap_err();
        assert!(matches!(
            err,
            WriterError::TypeMismatch { ref field, expected: "int32", actual: "utf8" } if field == "x"
        ));
        // The failed append left nothing behind.
        assert_eq!(encoder.finish().len(), 0);
    }

    #[test]
    fn string_content_is_copied() {
        let mut encoder =
            ColumnEncoder::for_field(&FieldSpec::single("s", StoredType::Utf8), 4).unwrap();
        let mut owned = String::from("before");
        encoder.append("s", &Value::Utf8(owned.clone())).unwrap();
        owned.push_str("-mutated");

        let array = encoder.finish();
        let array = array.as_any().downcast_ref::<StringArray>().unwrap();
        assert_eq!(array.value(0), "before");
    }

    #[test]
    fn list_append_and_empty_list() {
        let mut encoder =
            ColumnEncoder::for_field(&FieldSpec::list("tags", StoredType::Utf8), 4).unwrap();
        encoder.append("tags", &Value::List(vec![])).unwrap();
        encoder
            .append("tags", &Value::from(vec!["a", "b"]))
            .unwrap();

        let array = encoder.finish();
        let list = array.as_any().downcast_ref::<ListArray>().unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list.value(0).len(), 0);
        assert!(!list.is_null(0));
        let second = list.value(1);
        let second = second.as_any().downcast_ref::<StringArray>().unwrap();
        assert_eq!(second.value(0), "a");
        assert_eq!(second.value(1), "b");
    }

    #[test]
    fn null_list_becomes_empty_list() {
        let mut encoder =
            ColumnEncoder::for_field(&FieldSpec::list("vals", StoredType::Int32), 4).unwrap();
        encoder.append("vals", &Value::Null).unwrap();

        let array = encoder.finish();
        let list = array.as_any().downcast_ref::<ListArray>().unwrap();
        assert_eq!(list.len(), 1);
        assert!(!list.is_null(0));
        assert_eq!(list.value(0).len(), 0);
    }

    #[test]
    fn null_element_inside_list_is_kept() {
        let mut encoder =
            ColumnEncoder::for_field(&FieldSpec::list("vals", StoredType::Int32), 4).unwrap();
        encoder
            .append("vals", &Value::List(vec![Value::Int32(1), Value::Null]))
            .unwrap();

        let array = encoder.finish();
        let list = array.as_any().downcast_ref::<ListArray>().unwrap();
        let inner = list.value(0);
        let inner = inner.as_any().downcast_ref::<Int32Array>().unwrap();
        assert_eq!(inner.len(), 2);
        assert_eq!(inner.value(0), 1);
        assert!(inner.is_null(1));
    }

    #[test]
    fn mismatched_list_element_leaves_column_unchanged() {
        let mut encoder =
            ColumnEncoder::for_field(&FieldSpec::list("vals", StoredType::Int32), 4).unwrap();
        let err = encoder
            .append(
                "vals",
                &Value::List(vec![Value::Int32(1), Value::Utf8("bad".into())]),
            )
            .unwrap_err();
        assert!(matches!(err, WriterError::TypeMismatch { .. }));
        assert_eq!(encoder.finish().len(), 0);
    }

    #[test]
    fn builder_is_reusable_after_finish() {
        let mut encoder = int32_encoder();
        encoder.append("x", &Value::Int32(1)).unwrap();
        assert_eq!(encoder.finish().len(), 1);

        encoder.append("x", &Value::Int32(2)).unwrap();
        let array = encoder.finish();
        let array = array.as_any().downcast_ref::<Int32Array>().unwrap();
        assert_eq!(array.len(), 1);
        assert_eq!(array.value(0), 2);
    }

    #[test]
    fn bytes_list_is_rejected_at_construction() {
        let err = ColumnEncoder::for_field(&FieldSpec::list("blob", StoredType::Bytes), 4)
            .unwrap_err();
        assert!(matches!(err, SchemaError::UnsupportedType { .. }));
    }
}
