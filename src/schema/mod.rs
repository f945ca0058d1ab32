pub mod header;
pub mod sql;
pub mod types;

pub use header::{parse_header, read_header_line};
pub use sql::{build_create_statement, build_insert_statement, placeholders};
pub use types::{ColumnSpec, Schema, BLOB_TYPE, DEFAULT_TYPE};
