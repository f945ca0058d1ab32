use std::path::PathBuf;

/// Problems with the header line that cannot be papered over by the
/// TEXT fallback.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("input has no header line")]
    EmptyInput,

    #[error("duplicate column `{name}` at positions {first} and {second}")]
    DuplicateColumn {
        name: String,
        first: usize,
        second: usize,
    },
}

/// A data line that cannot be turned into a value list for the schema.
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    #[error("expected {expected} fields, found {found}")]
    RowShape { expected: usize, found: usize },

    #[error("column `{column}` is declared BLOB but {value:?} is not valid hex")]
    InvalidBlob {
        column: String,
        value: String,
        #[source]
        source: hex::FromHexError,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("delimiter must not be empty")]
    EmptyDelimiter,

    #[error("table name must not be empty")]
    EmptyTableName,

    #[error("batch size must be at least 1")]
    ZeroBatchSize,
}

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("opening database {}: {source}", .path.display())]
    StoreOpen {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("database rejected `{statement}`: {source}")]
    StoreWrite {
        statement: String,
        #[source]
        source: rusqlite::Error,
    },

    #[error("line {line}: {source}")]
    Encode {
        line: usize,
        #[source]
        source: EncodeError,
    },

    #[error("writing report {}: {source}", .path.display())]
    Report {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T, E = LoadError> = std::result::Result<T, E>;
