use indoc::indoc;

use super::{LegacyBody, LegacyFragment, LegacyView, StoredView, convert, load_view, read_stored, upgrade_xml};
use crate::test_utils::shop;
use crate::{Error, FormatVersion, Reference, ReferenceType, SqlRole, View};

#[test]
fn raw_sql_becomes_single_definition_expression() {
    let shop = shop();
    let legacy = LegacyView {
        name: "ids".to_string(),
        body: LegacyBody::Raw {
            sql: "SELECT id FROM t".to_string(),
            tables: vec![shop.products],
        },
    };

    let view = convert(StoredView::Legacy(legacy));

    assert_eq!(view.format(), FormatVersion::CURRENT);
    assert_eq!(view.len(), 1);
    let r = &view.references()[0];
    assert_eq!(r.reference_type(), ReferenceType::Expression);
    assert!(r.is_definition_expression());
    assert_eq!(r.expression(), "SELECT id FROM t");
    assert_eq!(r.referenced_tables(), &[shop.products]);
    assert_eq!(
        r.sql_definition(SqlRole::ViewDefinition, &shop.schema).unwrap(),
        "SELECT id FROM t"
    );
}

#[test]
fn raw_sql_associations_are_deduplicated() {
    let shop = shop();
    let legacy = LegacyView {
        name: "v".to_string(),
        body: LegacyBody::Raw {
            sql: "SELECT 1".to_string(),
            tables: vec![shop.orders, shop.customers, shop.orders],
        },
    };

    let view = convert(StoredView::Legacy(legacy));
    assert_eq!(view.references()[0].referenced_tables(), &[shop.orders, shop.customers]);
}

#[test]
fn fragments_are_transcribed_in_order_with_aliases() {
    let shop = shop();
    let legacy = LegacyView {
        name: "summary".to_string(),
        body: LegacyBody::Fragments(vec![
            LegacyFragment::Column {
                table: shop.customers,
                column: Some(shop.customer_name),
                table_alias: "c".to_string(),
                column_alias: "customer".to_string(),
                ref_alias: "Customer".to_string(),
            },
            LegacyFragment::Expression {
                expression: "count(*)".to_string(),
                alias: "n".to_string(),
                ref_alias: String::new(),
            },
            LegacyFragment::Column {
                table: shop.orders,
                column: None,
                table_alias: "o".to_string(),
                column_alias: String::new(),
                ref_alias: String::new(),
            },
        ]),
    };

    let view = convert(StoredView::Legacy(legacy));

    let mut expected_first = Reference::new_column(shop.customers, Some(shop.customer_name), "c", "customer");
    expected_first.set_ref_alias("Customer");
    assert_eq!(view.references()[0], expected_first);
    assert_eq!(view.references()[1], Reference::new_expression("count(*)", "n"));
    assert!(!view.references()[1].is_definition_expression());
    assert_eq!(view.references()[2], Reference::new_column(shop.orders, None, "o", ""));
}

#[test]
fn converting_current_view_is_a_noop() {
    let shop = shop();
    let mut view = View::new("v");
    view.push(Reference::new_column(shop.orders, Some(shop.order_id), "o", ""))
        .unwrap();

    let once = convert(StoredView::Current(view.clone()));
    let twice = convert(StoredView::Current(once.clone()));

    assert_eq!(once, view);
    assert_eq!(twice, view);
}

#[test]
fn load_legacy_raw_definition() {
    let shop = shop();
    let xml = indoc! {r#"
        <view name="ids">
          <definition>SELECT id FROM products</definition>
          <reftable name="public.products"/>
          <reftable name="public.gone"/>
        </view>
    "#};

    let view = load_view(xml, &shop.schema).unwrap();

    assert_eq!(view.name(), "ids");
    let r = view.definition_expression().unwrap();
    assert_eq!(r.expression(), "SELECT id FROM products");
    assert_eq!(r.referenced_tables(), &[shop.products]);
}

#[test]
fn load_legacy_fragments() {
    let shop = shop();
    let xml = indoc! {r#"
        <view name="summary">
          <reference table="public.orders" column="id" alias="o" column-alias="order_id"/>
          <reference alias="ts"><expression>now()</expression></reference>
        </view>
    "#};

    let view = load_view(xml, &shop.schema).unwrap();

    assert_eq!(view.len(), 2);
    assert_eq!(
        view.references()[0],
        Reference::new_column(shop.orders, Some(shop.order_id), "o", "order_id")
    );
    assert_eq!(view.references()[1], Reference::new_expression("now()", "ts"));
    assert_eq!(
        view.sql_body(&shop.schema).unwrap(),
        "SELECT o.id AS order_id, (now()) AS ts\nFROM public.orders AS o"
    );
}

#[test]
fn legacy_fragment_with_unknown_table_fails() {
    let shop = shop();
    let xml = r#"<view name="v"><reference table="public.gone" column="id"/></view>"#;

    let err = load_view(xml, &shop.schema).unwrap_err();
    assert!(matches!(err, Error::UnknownTable(name) if name == "public.gone"));
}

#[test]
fn read_stored_detects_format() {
    let shop = shop();

    let legacy = read_stored(r#"<view name="v"><definition>SELECT 1</definition></view>"#, &shop.schema)
        .unwrap();
    assert!(matches!(legacy, StoredView::Legacy(LegacyView { body: LegacyBody::Raw { .. }, .. })));

    let explicit_legacy = read_stored(r#"<view name="v" format-version="1"/>"#, &shop.schema).unwrap();
    assert!(matches!(explicit_legacy, StoredView::Legacy(_)));

    let current = read_stored(r#"<view name="v" format-version="2"/>"#, &shop.schema).unwrap();
    assert!(matches!(current, StoredView::Current(_)));
}

#[test]
fn upgrade_is_idempotent() {
    let shop = shop();
    let legacy = indoc! {r#"
        <view name="ids">
          <definition>SELECT id FROM products WHERE sku &lt;&gt; ''</definition>
          <reftable name="products"/>
        </view>
    "#};

    let upgraded = upgrade_xml(legacy, &shop.schema).unwrap();
    let again = upgrade_xml(&upgraded, &shop.schema).unwrap();

    assert_eq!(again, upgraded);
    assert!(upgraded.contains(r#"format-version="2""#));
    assert!(upgraded.contains(r#"is-def-expr="true""#));
    assert!(upgraded.contains(r#"<ref-table name="public.products"/>"#));

    let view = load_view(&upgraded, &shop.schema).unwrap();
    assert_eq!(view.references()[0].expression(), "SELECT id FROM products WHERE sku <> ''");
}

#[test]
fn upgraded_view_reloads_equal_to_direct_conversion() {
    let shop = shop();
    let legacy = r#"<view name="v"><reference table="customers" column="name" alias="c"/></view>"#;

    let direct = load_view(legacy, &shop.schema).unwrap();
    let reloaded = View::from_xml(&upgrade_xml(legacy, &shop.schema).unwrap(), &shop.schema).unwrap();

    assert_eq!(direct, reloaded);
}

#[test]
fn unknown_format_markers_are_rejected() {
    let shop = shop();

    for marker in ["0", "3", "two", ""] {
        let xml = format!(r#"<view name="v" format-version="{marker}"/>"#);
        let err = read_stored(&xml, &shop.schema).unwrap_err();
        assert!(
            matches!(&err, Error::InvalidAttribute { attribute: "format-version", value, .. } if value == marker),
            "{marker}: {err:?}"
        );
    }
}
