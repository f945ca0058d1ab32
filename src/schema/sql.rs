// src/schema/sql.rs

use super::types::Schema;

/// `CREATE TABLE IF NOT EXISTS <table> (name type, ...)` in schema order.
pub fn build_create_statement(schema: &Schema, table_name: &str) -> String {
    let columns = schema
        .columns()
        .iter()
        .map(|c| format!("{} {}", c.name, c.declared_type))
        .collect::<Vec<_>>()
        .join(", ");
    format!("CREATE TABLE IF NOT EXISTS {} ({})", table_name, columns)
}

/// `INSERT INTO <table> (names...) VALUES (values...)`.
///
/// `values` are SQL fragments in schema order: bind placeholders for the
/// statement that is executed, rendered literals for the one that is logged.
pub fn build_insert_statement<S: AsRef<str>>(schema: &Schema, table_name: &str, values: &[S]) -> String {
    let columns = schema.names().collect::<Vec<_>>().join(", ");
    let values = values
        .iter()
        .map(|v| v.as_ref())
        .collect::<Vec<_>>()
        .join(", ");
    format!("INSERT INTO {} ({}) VALUES ({})", table_name, columns, values)
}

/// `?1, ?2, ...` for every column of `schema`.
pub fn placeholders(schema: &Schema) -> Vec<String> {
    (1..=schema.len()).map(|i| format!("?{}", i)).collect()
}
