//! Shared schema fixtures.

use viewref_core::{ObjectId, Schema, SchemaGraph};

/// Two tables holding foreign keys to each other, plus an unrelated one.
pub struct Shop {
    pub schema: Schema,
    pub public: ObjectId,
    pub orders: ObjectId,
    pub order_id: ObjectId,
    pub customer_id: ObjectId,
    pub customers: ObjectId,
    pub customer_name: ObjectId,
    pub products: ObjectId,
}

pub fn shop() -> Shop {
    let schema = Schema::from_json(
        r#"{
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
                    "name": "products",
                    "columns": { "sku": "varchar(32)", "Price": "numeric" }
                }
            ]
        }"#,
    )
    .unwrap();

    let orders = schema.find_table("orders").unwrap();
    let customers = schema.find_table("customers").unwrap();
    Shop {
        public: schema.parent(orders).unwrap(),
        order_id: schema.find_column(orders, "id").unwrap(),
        customer_id: schema.find_column(orders, "customer_id").unwrap(),
        customer_name: schema.find_column(customers, "name").unwrap(),
        products: schema.find_table("products").unwrap(),
        orders,
        customers,
        schema,
    }
}
