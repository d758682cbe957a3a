//! Identifier quoting for generated SQL.

/// PostgreSQL reserved key words, including those only allowed as function
/// or type names. None of them can appear as a bare column or table name.
const RESERVED: &[&str] = &[
    "all", "analyse", "analyze", "and", "any", "array", "as", "asc", "asymmetric",
    "authorization", "binary", "both", "case", "cast", "check", "collate", "collation",
    "column", "concurrently", "constraint", "create", "cross", "current_catalog",
    "current_date", "current_role", "current_schema", "current_time", "current_timestamp",
    "current_user", "default", "deferrable", "desc", "distinct", "do", "else", "end", "except",
    "false", "fetch", "for", "foreign", "freeze", "from", "full", "grant", "group", "having",
    "ilike", "in", "initially", "inner", "intersect", "into", "is", "isnull", "join", "lateral",
    "leading", "left", "like", "limit", "localtime", "localtimestamp", "natural", "not",
    "notnull", "null", "offset", "on", "only", "or", "order", "outer", "overlaps", "placing",
    "primary", "references", "returning", "right", "select", "session_user", "similar", "some",
    "symmetric", "system_user", "table", "tablesample", "then", "to", "trailing", "true",
    "union", "unique", "user", "using", "variadic", "verbose", "view", "when", "where",
    "window", "with",
];

/// Whether `name` can appear in SQL without quotes.
///
/// Plain identifiers are lowercase ASCII letters, digits, `_` and `$`, don't
/// start with a digit or `$`, and aren't reserved words.
pub fn is_plain_ident(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !(first.is_ascii_lowercase() || first == '_') {
        return false;
    }
    chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '$')
        && !RESERVED.contains(&name)
}

/// Quote an identifier when it isn't plain.
///
/// # Examples
/// ```
/// use viewref_core::utils::quote_ident;
/// assert_eq!(quote_ident("orders"), "orders");
/// assert_eq!(quote_ident("Orders"), "\"Orders\"");
/// assert_eq!(quote_ident("order"), "\"order\"");
/// ```
pub fn quote_ident(name: &str) -> String {
    if is_plain_ident(name) {
        return name.to_string();
    }
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Join a schema and object name into a quoted qualified name.
///
/// # Examples
/// ```
/// use viewref_core::utils::qualify;
/// assert_eq!(qualify("public", "orders"), "public.orders");
/// assert_eq!(qualify("Sales", "orders"), "\"Sales\".orders");
/// ```
pub fn qualify(schema: &str, name: &str) -> String {
    format!("{}.{}", quote_ident(schema), quote_ident(name))
}
