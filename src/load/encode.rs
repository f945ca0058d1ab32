// src/load/encode.rs

use rusqlite::types::{ToSql, ToSqlOutput, ValueRef};

use crate::error::EncodeError;
use crate::schema::Schema;

/// One bound value of an insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlValue {
    Text(String),
    Blob(Vec<u8>),
}

impl SqlValue {
    /// The value written as an SQL literal: `'text'` (quotes doubled) or `x'hex'`.
    pub fn to_sql_literal(&self) -> String {
        match self {
            SqlValue::Text(s) => format!("'{}'", s.replace('\'', "''")),
            SqlValue::Blob(b) => format!("x'{}'", hex::encode(b)),
        }
    }
}

impl ToSql for SqlValue {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            SqlValue::Text(s) => ToSqlOutput::Borrowed(ValueRef::Text(s.as_bytes())),
            SqlValue::Blob(b) => ToSqlOutput::Borrowed(ValueRef::Blob(b)),
        })
    }
}

/// Values for one data line, in schema order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedRow {
    values: Vec<SqlValue>,
}

impl EncodedRow {
    pub fn values(&self) -> &[SqlValue] {
        &self.values
    }

    pub fn literals(&self) -> Vec<String> {
        self.values.iter().map(SqlValue::to_sql_literal).collect()
    }
}

/// Split `line` on `delimiter` and convert each trimmed field according to
/// the declared type of its column.
///
/// `BLOB` columns take hexadecimal text and bind the decoded bytes; every
/// other type binds the trimmed text unchanged and leaves conversion to the
/// column's affinity. The field count must equal the schema length.
pub fn encode_row(line: &str, schema: &Schema, delimiter: &str) -> Result<EncodedRow, EncodeError> {
    let fields: Vec<&str> = line.split(delimiter).collect();
    if fields.len() != schema.len() {
        return Err(EncodeError::RowShape {
            expected: schema.len(),
            found: fields.len(),
        });
    }

    let mut values = Vec::with_capacity(fields.len());
    for (field, col) in fields.into_iter().zip(schema.columns()) {
        let v = field.trim();
        if col.is_blob() {
            let bytes = hex::decode(v).map_err(|source| EncodeError::InvalidBlob {
                column: col.name.clone(),
                value: v.to_owned(),
                source,
            })?;
            values.push(SqlValue::Blob(bytes));
        } else {
            values.push(SqlValue::Text(v.to_owned()));
        }
    }

    Ok(EncodedRow { values })
}
