use indoc::indoc;

use super::deps::render;
use super::test_fixtures::schema;

const VIEW: &str = indoc! {r#"
    <view name="names" format-version="2">
      <reference type="column" table="public.customers" column="name" alias="c" column-alias="" ref-alias=""/>
    </view>
"#};

#[test]
fn direct_dependencies() {
    let schema = schema();

    let listing = render(VIEW, &schema, false, None).unwrap();

    insta::assert_snapshot!(listing, @r"
    table	public.customers
    column	public.customers.name
    ");
}

#[test]
fn indirect_dependencies_follow_foreign_key_cycle() {
    let schema = schema();

    let listing = render(VIEW, &schema, true, None).unwrap();

    insta::assert_snapshot!(listing, @r"
    schema	public
    table	public.orders
    table	public.customers
    column	public.customers.name
    ");
}

#[test]
fn legacy_raw_view_depends_on_associated_tables() {
    let schema = schema();
    let legacy = r#"<view name="v"><definition>SELECT 1</definition><reftable name="orders"/></view>"#;

    let listing = render(legacy, &schema, false, Some(0)).unwrap();
    assert_eq!(listing, "table\tpublic.orders");
}
