// src/schema/types.rs

use serde::{Deserialize, Serialize};

/// Type given to columns whose header token carries no `(TYPE)` annotation.
pub const DEFAULT_TYPE: &str = "TEXT";

/// The only declared type whose values are not bound as text.
pub const BLOB_TYPE: &str = "BLOB";

/// A single column definition as parsed from a header token.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Eq, Hash)]
pub struct ColumnSpec {
    pub position: usize,
    pub name: String,
    pub declared_type: String,
}

impl ColumnSpec {
    pub fn is_blob(&self) -> bool {
        self.declared_type == BLOB_TYPE
    }
}

/// Ordered column list for one input file; positions are `0..len()`.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Eq, Default)]
pub struct Schema {
    columns: Vec<ColumnSpec>,
}

impl Schema {
    pub(crate) fn from_columns(columns: Vec<ColumnSpec>) -> Self {
        debug_assert!(columns.iter().enumerate().all(|(i, c)| c.position == i));
        Self { columns }
    }

    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<&ColumnSpec> {
        self.columns.get(position)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }
}
