//! In-memory batch accumulation.
//!
//! [`BatchBuffer`] owns one [`ColumnEncoder`] per schema field, index-aligned
//! with the schema, plus the current row count and a running byte estimate.
//! Every column holds exactly `row_count` entries at all times: a row is
//! validated against the whole schema before any encoder is touched, so a
//! failed append leaves no ragged columns behind.

use arrow::array::ArrayRef;

use crate::encoder::ColumnEncoder;
use crate::record::{Record, Value};
use crate::schema::{ColumnarSchema, SchemaError};
use crate::writer::WriterError;

/// Column buffers for one in-flight batch.
#[derive(Debug)]
pub struct BatchBuffer {
    encoders: Vec<ColumnEncoder>,
    row_count: usize,
    approx_bytes: usize,
}

impl BatchBuffer {
    /// Allocate one encoder per field of `schema`, pre-sized for `capacity`
    /// rows.
    pub fn new(schema: &ColumnarSchema, capacity: usize) -> Result<Self, SchemaError> {
        let encoders = schema
            .fields()
            .iter()
            .map(|spec| ColumnEncoder::for_field(spec, capacity))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            encoders,
            row_count: 0,
            approx_bytes: 0,
        })
    }

    /// Append one record as a row across all columns.
    ///
    /// Fields are taken in schema order; an entry absent from the record is
    /// appended as null. The row count is incremented only after every field
    /// succeeded, and the validation pass up front means a rejected row
    /// changes nothing.
    pub fn append_row(&mut self, record: &Record, schema: &ColumnarSchema) -> Result<(), WriterError> {
        // Validate the whole row first so a mid-row type error cannot leave
        // columns at different lengths.
        for (spec, encoder) in schema.fields().iter().zip(&self.encoders) {
            let value = record.get(&spec.name).unwrap_or(&Value::Null);
            encoder.check(&spec.name, value)?;
        }

        let mut row_bytes = 0;
        for (spec, encoder) in schema.fields().iter().zip(&mut self.encoders) {
            let value = record.get(&spec.name).unwrap_or(&Value::Null);
            encoder.append(&spec.name, value)?;
            row_bytes += value.approx_encoded_len();
        }

        self.row_count += 1;
        self.approx_bytes += row_bytes;
        Ok(())
    }

    /// Seal every column into an array, draining the builders.
    ///
    /// Callers must pair this with [`BatchBuffer::reset`] to zero the row
    /// accounting.
    pub fn finish_columns(&mut self) -> Vec<ArrayRef> {
        self.encoders.iter_mut().map(ColumnEncoder::finish).collect()
    }

    /// Clear row accounting, and drain any content still sitting in the
    /// builders so the buffer is empty regardless of how the caller got here.
    pub fn reset(&mut self) {
        if self.row_count > 0 {
            for encoder in &mut self.encoders {
                // finish() drains; the arrays are dropped immediately.
                let _ = encoder.finish();
            }
        }
        self.row_count = 0;
        self.approx_bytes = 0;
    }

    /// Rows accumulated in the current batch.
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Estimated payload bytes accumulated in the current batch.
    pub fn approx_bytes(&self) -> usize {
        self.approx_bytes
    }

    /// Mark the batch content as already drained (after [`finish_columns`]).
    ///
    /// [`finish_columns`]: BatchBuffer::finish_columns
    pub fn mark_drained(&mut self) {
        self.row_count = 0;
        self.approx_bytes = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FieldSpec, StoredType};
    use arrow::array::{Array, Int32Array, StringArray};

    fn test_schema() -> ColumnarSchema {
        ColumnarSchema::from_fields(vec![
            FieldSpec::single("id", StoredType::Int32),
            FieldSpec::single("name", StoredType::Utf8),
        ])
        .unwrap()
    }

    #[test]
    fn appends_rows_in_schema_order() {
        let schema = test_schema();
        let mut buffer = BatchBuffer::new(&schema, 8).unwrap();

        buffer
            .append_row(&Record::new().set("id", 1i32).set("name", "a"), &schema)
            .unwrap();
        buffer
            .append_row(&Record::new().set("name", "b").set("id", 2i32), &schema)
            .unwrap();
        assert_eq!(buffer.row_count(), 2);

        let columns = buffer.finish_columns();
        buffer.mark_drained();
        let ids = columns[0].as_any().downcast_ref::<Int32Array>().unwrap();
        let names = columns[1].as_any().downcast_ref::<StringArray>().unwrap();
        assert_eq!(ids.value(0), 1);
        assert_eq!(ids.value(1), 2);
        assert_eq!(names.value(0), "a");
        assert_eq!(names.value(1), "b");
    }

    #[test]
    fn absent_field_becomes_null() {
        let schema = test_schema();
        let mut buffer = BatchBuffer::new(&schema, 8).unwrap();

        buffer
            .append_row(&Record::new().set("id", 1i32), &schema)
            .unwrap();

        let columns = buffer.finish_columns();
        buffer.mark_drained();
        assert!(columns[1].is_null(0));
    }

    #[test]
    fn failed_row_leaves_no_partial_state() {
        let schema = test_schema();
        let mut buffer = BatchBuffer::new(&schema, 8).unwrap();

        buffer
            .append_row(&Record::new().set("id", 1i32).set("name", "ok"), &schema)
            .unwrap();

        // "name" carries the wrong type; "id" comes first in schema order and
        // would have been appended without the validation pass.
        let err = buffer
            .append_row(&Record::new().set("id", 2i32).set("name", 3i64), &schema)
            .unwrap_err();
        assert!(matches!(err, WriterError::TypeMismatch { .. }));
        assert_eq!(buffer.row_count(), 1);

        // The writer stays usable and columns stay aligned.
        buffer
            .append_row(&Record::new().set("id", 3i32).set("name", "c"), &schema)
            .unwrap();
        let columns = buffer.finish_columns();
        assert_eq!(columns[0].len(), 2);
        assert_eq!(columns[1].len(), 2);
    }

    #[test]
    fn reset_clears_rows_and_bytes() {
        let schema = test_schema();
        let mut buffer = BatchBuffer::new(&schema, 8).unwrap();
        buffer
            .append_row(&Record::new().set("id", 1i32).set("name", "abc"), &schema)
            .unwrap();
        assert!(buffer.approx_bytes() > 0);

        buffer.reset();
        assert_eq!(buffer.row_count(), 0);
        assert_eq!(buffer.approx_bytes(), 0);
        assert_eq!(buffer.finish_columns()[0].len(), 0);
    }
}
