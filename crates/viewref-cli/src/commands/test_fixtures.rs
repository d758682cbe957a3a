use viewref_core::Schema;

pub const SCHEMA: &str = r#"{
    "tables": [
        {
            "name": "orders",
            "columns": { "id": "integer", "customer_id": "integer" },
            "references": ["customers"]
        },
        {
            "name": "customers",
            "columns": { "id": "integer", "name": "text" },
            "references": ["orders"]
        },
        {
            "schema": "sales",
            "name": "Region Totals",
            "columns": { "region": "text", "total": "numeric" }
        }
    ]
}"#;

pub fn schema() -> Schema {
    Schema::from_json(SCHEMA).unwrap()
}
