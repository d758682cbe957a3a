use crate::{DEFAULT_SCHEMA, ObjectId, ObjectKind, SchemaError, parse_schema};

const SAMPLE_JSON: &str = r#"{
    "tables": [
        {
            "name": "orders",
            "columns": { "id": "integer", "customer_id": "integer", "total": "numeric(10,2)" },
            "references": ["public.customers"]
        },
        {
            "schema": "sales",
            "name": "customers",
            "columns": { "id": "integer", "name": "text" }
        }
    ]
}"#;

#[test]
fn parse_schema_applies_defaults() {
    let raw = parse_schema(SAMPLE_JSON).unwrap();

    assert_eq!(raw.tables.len(), 2);
    assert_eq!(raw.tables[0].schema, DEFAULT_SCHEMA);
    assert_eq!(raw.tables[1].schema, "sales");
    assert!(raw.tables[1].references.is_empty());
}

#[test]
fn parse_schema_preserves_column_order() {
    let raw = parse_schema(SAMPLE_JSON).unwrap();
    let names: Vec<_> = raw.tables[0].columns.keys().map(String::as_str).collect();

    assert_eq!(names, ["id", "customer_id", "total"]);
    assert_eq!(raw.tables[0].columns["total"], "numeric(10,2)");
}

#[test]
fn parse_schema_rejects_malformed_json() {
    let err = parse_schema("{ \"tables\": 3 }").unwrap_err();
    assert!(matches!(err, SchemaError::Json(_)));
}

#[test]
fn object_id_display_and_raw() {
    let id = ObjectId::from_raw(7);
    assert_eq!(id.as_u32(), 7);
    assert_eq!(id.to_string(), "#7");
}

#[test]
fn object_kind_names() {
    assert_eq!(ObjectKind::Table.to_string(), "table");
    assert_eq!(ObjectKind::Column.as_str(), "column");
}
