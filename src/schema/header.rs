// src/schema/header.rs

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use std::io::{self, BufRead};
use tracing::{debug, instrument, trace};

use super::types::{ColumnSpec, Schema, DEFAULT_TYPE};
use crate::error::SchemaError;

/// `name (TYPE)`, anchored at both ends.
static TYPED_COLUMN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\w+)\s\((\w+)\)$").expect("valid typed column regex"));

/// Read the first line of `reader` with its surrounding whitespace stripped.
/// Returns `None` when the input is empty.
pub fn read_header_line<R: BufRead>(reader: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Turn a header line into a `Schema`.
///
/// Tokens of the form `name (TYPE)` keep their declared type verbatim; any
/// other token becomes the column name as-is with type `TEXT`. Only
/// duplicate names are rejected.
#[instrument(level = "debug", skip(header_line), fields(header_len = header_line.len()))]
pub fn parse_header(header_line: &str, delimiter: &str) -> Result<Schema, SchemaError> {
    let mut columns = Vec::new();
    let mut seen: HashMap<String, usize> = HashMap::new();

    for (position, token) in header_line.split(delimiter).enumerate() {
        let (name, declared_type) = match TYPED_COLUMN.captures(token) {
            Some(caps) => (caps[1].to_owned(), caps[2].to_owned()),
            None => (token.to_owned(), DEFAULT_TYPE.to_owned()),
        };

        // SQLite column names are case-insensitive
        let key = name.to_ascii_lowercase();
        if let Some(&first) = seen.get(&key) {
            return Err(SchemaError::DuplicateColumn {
                name,
                first,
                second: position,
            });
        }
        seen.insert(key, position);

        trace!(position, name = %name, ty = %declared_type, "Parsed column");
        columns.push(ColumnSpec {
            position,
            name,
            declared_type,
        });
    }

    debug!(columns = columns.len(), "Finished header parsing");
    Ok(Schema::from_columns(columns))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::io::Cursor;

    fn pairs(schema: &Schema) -> Vec<(String, String)> {
        schema
            .columns()
            .iter()
            .map(|c| (c.name.clone(), c.declared_type.clone()))
            .collect()
    }

    #[test]
    fn typed_header() {
        let schema = parse_header("col1 (TEXT),col2 (INTEGER)", ",").unwrap();
        assert_eq!(
            pairs(&schema),
            vec![
                ("col1".to_string(), "TEXT".to_string()),
                ("col2".to_string(), "INTEGER".to_string())
            ]
        );
    }

    #[test]
    fn untyped_header_defaults_to_text() {
        let schema = parse_header("colA,colB", ",").unwrap();
        assert_eq!(schema.len(), 2);
        assert!(schema.columns().iter().all(|c| c.declared_type == "TEXT"));
        assert_eq!(schema.names().collect::<Vec<_>>(), vec!["colA", "colB"]);
    }

    #[test]
    fn type_case_is_preserved() {
        let schema = parse_header("data (blob)|id (Integer)", "|").unwrap();
        assert_eq!(schema.get(0).unwrap().declared_type, "blob");
        assert_eq!(schema.get(1).unwrap().declared_type, "Integer");
        assert!(!schema.get(0).unwrap().is_blob());
    }

    #[test]
    fn malformed_annotation_falls_back_to_raw_token() {
        // leading space, missing space, two spaces, non-word type
        let schema = parse_header(" a (TEXT),b(TEXT),c  (TEXT),d (VARCHAR(10))", ",").unwrap();
        assert_eq!(
            schema.names().collect::<Vec<_>>(),
            vec![" a (TEXT)", "b(TEXT)", "c  (TEXT)", "d (VARCHAR(10))"]
        );
        assert!(schema.columns().iter().all(|c| c.declared_type == "TEXT"));
    }

    #[test]
    fn multi_char_delimiter() {
        let schema = parse_header("x (INTEGER)::y", "::").unwrap();
        assert_eq!(
            pairs(&schema),
            vec![
                ("x".to_string(), "INTEGER".to_string()),
                ("y".to_string(), "TEXT".to_string())
            ]
        );
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let err = parse_header("id,name,id (INTEGER)", ",").unwrap_err();
        match err {
            SchemaError::DuplicateColumn {
                name,
                first,
                second,
            } => {
                assert_eq!(name, "id");
                assert_eq!((first, second), (0, 2));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn duplicate_names_differing_in_case_are_rejected() {
        match parse_header("id,ID", ",").unwrap_err() {
            SchemaError::DuplicateColumn {
                name,
                first,
                second,
            } => {
                assert_eq!(name, "ID");
                assert_eq!((first, second), (0, 1));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn header_line_is_stripped() {
        let mut input = Cursor::new("  colA,colB \r\nrow,1\n");
        let line = read_header_line(&mut input).unwrap();
        assert_eq!(line.as_deref(), Some("colA,colB"));

        let mut empty = Cursor::new("");
        assert_eq!(read_header_line(&mut empty).unwrap(), None);
    }

    /// Lowercase only, so names are also distinct ignoring case.
    pub(crate) fn unique_names() -> impl Strategy<Value = Vec<String>> {
        prop::collection::hash_set("[a-z_][a-z0-9_]{0,8}", 1..24)
            .prop_map(|set| set.into_iter().collect())
    }

    proptest! {
        #[test]
        fn schema_length_matches_token_count(names in unique_names()) {
            let schema = parse_header(&names.join(","), ",").unwrap();
            prop_assert_eq!(schema.len(), names.len());
            for (i, col) in schema.columns().iter().enumerate() {
                prop_assert_eq!(col.position, i);
                prop_assert_eq!(&col.name, &names[i]);
                prop_assert_eq!(col.declared_type.as_str(), "TEXT");
            }
        }

        #[test]
        fn typed_tokens_capture_name_and_type(
            names in unique_names(),
            ty in "[A-Za-z][A-Za-z0-9_]{0,10}",
        ) {
            let header = names
                .iter()
                .map(|n| format!("{} ({})", n, ty))
                .collect::<Vec<_>>()
                .join(";");
            let schema = parse_header(&header, ";").unwrap();
            prop_assert_eq!(schema.len(), names.len());
            for (col, name) in schema.columns().iter().zip(&names) {
                prop_assert_eq!(&col.name, name);
                prop_assert_eq!(&col.declared_type, &ty);
            }
        }
    }
}
