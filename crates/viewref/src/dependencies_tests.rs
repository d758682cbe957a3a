use indexmap::IndexSet;
use viewref_core::ObjectId;

use crate::Reference;
use crate::dependencies::expand_transitive;
use crate::test_utils::shop;

#[test]
fn column_reference_depends_on_table_and_column() {
    let shop = shop();
    let r = Reference::new_column(shop.orders, Some(shop.customer_id), "o", "");

    let deps = r.dependencies(&shop.schema, false);
    assert_eq!(deps.len(), 2);
    assert!(deps.contains(&shop.orders));
    assert!(deps.contains(&shop.customer_id));
}

#[test]
fn whole_table_reference_depends_on_table_only() {
    let shop = shop();
    let r = Reference::new_column(shop.products, None, "p", "");

    let deps = r.dependencies(&shop.schema, false);
    assert_eq!(deps.into_iter().collect::<Vec<_>>(), vec![shop.products]);
}

#[test]
fn expression_reference_depends_on_referenced_tables() {
    let shop = shop();
    let mut r = Reference::definition("SELECT * FROM orders JOIN products ON true");
    r.add_referenced_table(shop.orders).unwrap();
    r.add_referenced_table(shop.products).unwrap();

    let deps = r.dependencies(&shop.schema, false);
    assert_eq!(deps.len(), 2);
    assert!(deps.contains(&shop.orders));
    assert!(deps.contains(&shop.products));
}

#[test]
fn expression_without_hints_has_no_dependencies() {
    let shop = shop();
    let r = Reference::new_expression("now()", "ts");

    assert!(r.dependencies(&shop.schema, true).is_empty());
}

#[test]
fn removed_referenced_table_is_skipped() {
    let mut shop = shop();
    let mut r = Reference::definition("SELECT * FROM products, orders");
    r.add_referenced_table(shop.products).unwrap();
    r.add_referenced_table(shop.orders).unwrap();

    shop.schema.remove(shop.products);

    let deps = r.dependencies(&shop.schema, true);
    assert!(!deps.contains(&shop.products));
    assert!(deps.contains(&shop.orders));
    // The stale hint is still recorded; it is only ignored.
    assert_eq!(r.referenced_tables().len(), 2);
}

#[test]
fn removed_column_is_skipped() {
    let mut shop = shop();
    let r = Reference::new_column(shop.customers, Some(shop.customer_name), "c", "");

    shop.schema.remove(shop.customer_name);

    let deps = r.dependencies(&shop.schema, false);
    assert_eq!(deps.into_iter().collect::<Vec<_>>(), vec![shop.customers]);
}

#[test]
fn indirect_walk_terminates_on_foreign_key_cycle() {
    let shop = shop();
    let r = Reference::new_column(shop.orders, Some(shop.order_id), "o", "");

    let deps = r.dependencies(&shop.schema, true);

    // orders -> customers -> orders is a cycle; both show up once.
    assert!(deps.contains(&shop.orders));
    assert!(deps.contains(&shop.customers));
    assert!(deps.contains(&shop.public));
    assert!(deps.contains(&shop.order_id));
    assert!(!deps.contains(&shop.products));
    assert_eq!(deps.len(), 4);
}

#[test]
fn direct_dependencies_are_subset_of_indirect() {
    let shop = shop();
    let mut expr = Reference::definition("SELECT 1 FROM customers");
    expr.add_referenced_table(shop.customers).unwrap();
    let refs = [
        Reference::new_column(shop.orders, Some(shop.customer_id), "", ""),
        Reference::new_column(shop.products, None, "p", ""),
        Reference::new_expression("1 + 1", "two"),
        expr,
    ];

    for r in &refs {
        let direct = r.dependencies(&shop.schema, false);
        let all = r.dependencies(&shop.schema, true);
        assert!(direct.is_subset(&all), "{r:?}");
    }
}

#[test]
fn expand_transitive_ignores_stale_edges() {
    let mut shop = shop();
    shop.schema.remove(shop.customers);

    let seeds: IndexSet<ObjectId> = [shop.orders].into_iter().collect();
    let all = expand_transitive(&shop.schema, seeds);

    assert!(all.contains(&shop.orders));
    assert!(all.contains(&shop.public));
    assert!(!all.contains(&shop.customers));
}
