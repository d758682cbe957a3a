use crate::{ObjectKind, Schema, SchemaError, SchemaGraph};

fn shop() -> Schema {
    Schema::from_json(
        r#"{
            "tables": [
                { "name": "orders", "columns": { "id": "integer", "customer_id": "integer" },
                  "references": ["customers"] },
                { "name": "customers", "columns": { "id": "integer" },
                  "references": ["public.orders"] }
            ]
        }"#,
    )
    .unwrap()
}

#[test]
fn tables_resolve_by_qualified_and_bare_name() {
    let schema = shop();

    let qualified = schema.find_table("public.orders").unwrap();
    let bare = schema.find_table("orders").unwrap();

    assert_eq!(qualified, bare);
    assert_eq!(schema.kind(bare), Some(ObjectKind::Table));
    assert_eq!(schema.qualified_name(bare).as_deref(), Some("public.orders"));
    assert_eq!(schema.sql_name(bare).as_deref(), Some("public.orders"));
    assert!(schema.find_table("sales.orders").is_none());
}

#[test]
fn columns_know_their_table_and_type() {
    let schema = shop();
    let orders = schema.find_table("orders").unwrap();
    let column = schema.find_column(orders, "customer_id").unwrap();

    assert_eq!(schema.parent(column), Some(orders));
    assert_eq!(schema.column_type(column), Some("integer"));
    assert_eq!(schema.column_type(orders), None);
    assert_eq!(schema.dependencies(column), &[orders]);
    assert_eq!(schema.columns(orders).len(), 2);
}

#[test]
fn mutual_foreign_keys_form_a_cycle() {
    let schema = shop();
    let orders = schema.find_table("orders").unwrap();
    let customers = schema.find_table("customers").unwrap();

    assert!(schema.dependencies(orders).contains(&customers));
    assert!(schema.dependencies(customers).contains(&orders));
}

#[test]
fn unknown_foreign_key_target_is_rejected() {
    let err = Schema::from_json(r#"{ "tables": [ { "name": "a", "references": ["b"] } ] }"#)
        .unwrap_err();
    assert!(matches!(err, SchemaError::UnknownTable(name) if name == "b"));
}

#[test]
fn duplicate_table_is_rejected() {
    let mut schema = Schema::new();
    let public = schema.add_schema("public");
    schema.add_table(public, "t").unwrap();

    let err = schema.add_table(public, "t").unwrap_err();
    assert!(matches!(err, SchemaError::DuplicateTable(key) if key == "public.t"));
}

#[test]
fn add_schema_is_idempotent() {
    let mut schema = Schema::new();
    let a = schema.add_schema("public");
    let b = schema.add_schema("public");
    assert_eq!(a, b);
    assert_eq!(schema.len(), 1);
}

#[test]
fn column_requires_table() {
    let mut schema = Schema::new();
    let public = schema.add_schema("public");

    let err = schema.add_column(public, "x", "int").unwrap_err();
    assert!(matches!(
        err,
        SchemaError::UnexpectedObject { expected: ObjectKind::Table, .. }
    ));
}

#[test]
fn remove_leaves_stale_handles_unresolvable() {
    let mut schema = shop();
    let orders = schema.find_table("orders").unwrap();
    let column = schema.find_column(orders, "id").unwrap();
    let customers = schema.find_table("customers").unwrap();

    schema.remove(orders);

    assert!(!schema.contains(orders));
    assert!(!schema.contains(column));
    assert_eq!(schema.name(orders), None);
    assert!(schema.dependencies(orders).is_empty());
    assert!(schema.find_table("orders").is_none());
    // The edge from customers survives as a stale entry.
    assert!(schema.dependencies(customers).contains(&orders));
}

#[test]
fn handles_are_not_reused_after_removal() {
    let mut schema = Schema::new();
    let public = schema.add_schema("public");
    let old = schema.add_table(public, "t").unwrap();
    schema.remove(old);

    let new = schema.add_table(public, "t").unwrap();
    assert_ne!(old, new);
    assert!(!schema.contains(old));
}

#[test]
fn sql_name_quotes_when_needed() {
    let mut schema = Schema::new();
    let ns = schema.add_schema("Sales");
    let table = schema.add_table(ns, "order").unwrap();

    assert_eq!(schema.qualified_name(table).as_deref(), Some("Sales.order"));
    assert_eq!(schema.sql_name(table).as_deref(), Some("\"Sales\".\"order\""));
}
