use super::*;

#[test]
fn maps_scalar_types_in_order() {
    let schema = ColumnarSchema::from_fields(vec![
        FieldSpec::single("a", StoredType::Int32),
        FieldSpec::single("b", StoredType::Int64),
        FieldSpec::single("c", StoredType::Float32),
        FieldSpec::single("d", StoredType::Float64),
        FieldSpec::single("e", StoredType::Utf8),
        FieldSpec::single("f", StoredType::Bytes),
    ])
    .unwrap();

    let arrow = schema.arrow_schema();
    let names: Vec<_> = arrow.fields().iter().map(|f| f.name().as_str()).collect();
    assert_eq!(names, ["a", "b", "c", "d", "e", "f"]);
    assert_eq!(arrow.field(0).data_type(), &DataType::Int32);
    assert_eq!(arrow.field(1).data_type(), &DataType::Int64);
    assert_eq!(arrow.field(2).data_type(), &DataType::Float32);
    assert_eq!(arrow.field(3).data_type(), &DataType::Float64);
    assert_eq!(arrow.field(4).data_type(), &DataType::Utf8);
    assert_eq!(arrow.field(5).data_type(), &DataType::Binary);
    assert!(arrow.fields().iter().all(|f| f.is_nullable()));
}

#[test]
fn maps_list_types() {
    let schema = ColumnarSchema::from_fields(vec![
        FieldSpec::list("ints", StoredType::Int32),
        FieldSpec::list("names", StoredType::Utf8),
    ])
    .unwrap();

    let arrow = schema.arrow_schema();
    match arrow.field(0).data_type() {
        DataType::List(item) => assert_eq!(item.data_type(), &DataType::Int32),
        other => panic!("expected list, got {other:?}"),
    }
    match arrow.field(1).data_type() {
        DataType::List(item) => assert_eq!(item.data_type(), &DataType::Utf8),
        other => panic!("expected list, got {other:?}"),
    }
}

#[test]
fn rejects_bytes_list() {
    let err = ColumnarSchema::from_fields(vec![FieldSpec::list("blob", StoredType::Bytes)])
        .unwrap_err();
    assert!(matches!(err, SchemaError::UnsupportedType { ref field, .. } if field == "blob"));
}

#[test]
fn rejects_duplicate_field_names() {
    let err = ColumnarSchema::from_fields(vec![
        FieldSpec::single("x", StoredType::Int32),
        FieldSpec::single("x", StoredType::Int64),
    ])
    .unwrap_err();
    assert!(matches!(err, SchemaError::DuplicateField(ref name) if name == "x"));
}

#[test]
fn empty_schema_is_valid() {
    let schema = ColumnarSchema::from_fields(vec![]).unwrap();
    assert!(schema.is_empty());
    assert_eq!(schema.arrow_schema().fields().len(), 0);
}

#[test]
fn field_spec_deserializes_from_schema_file_format() {
    let json = r#"[
        {"name": "id", "type": "int64"},
        {"name": "tags", "type": "utf8", "multiplicity": "list"}
    ]"#;
    let fields: Vec<FieldSpec> = serde_json::from_str(json).unwrap();
    assert_eq!(fields[0], FieldSpec::single("id", StoredType::Int64));
    assert_eq!(fields[1], FieldSpec::list("tags", StoredType::Utf8));
}
