//! Builders for Airtable filter formulas

/// Quote a string literal for use inside a formula.
pub fn quote(value: &str) -> String {
    let escaped = value.replace('\\', "\\\\").replace('\'', "\\'");
    format!("'{}'", escaped)
}

/// Exact match of a field against a string, e.g. `{PIN} = 'AB12'`
pub fn field_equals(field: &str, value: &str) -> String {
    format!("{{{}}} = {}", field, quote(value))
}
