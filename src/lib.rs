//! Load delimited text files into SQLite tables.
//!
//! The first line of a file names the columns, optionally with a declared
//! type (`price (INTEGER)`); untyped columns are `TEXT`. Every following
//! line becomes one row of the target table.

pub mod config;
pub mod error;
pub mod load;
pub mod schema;

pub use config::{Args, LoadConfig, RowMismatch};
pub use error::{ConfigError, EncodeError, LoadError, SchemaError};
pub use load::{load, LoadReport};
pub use schema::{ColumnSpec, Schema};
