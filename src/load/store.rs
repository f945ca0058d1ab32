// src/load/store.rs

use rusqlite::{params_from_iter, Connection, Transaction};
use std::path::Path;
use tracing::{debug, instrument};

use super::encode::EncodedRow;
use crate::error::{LoadError, Result};

/// The target SQLite database, exclusively owned for one load.
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Open a database on disk at `path`, creating the file if it doesn't exist.
    #[instrument(level = "debug", skip(path), fields(path = %path.as_ref().display()))]
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path).map_err(|source| LoadError::StoreOpen {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("database opened");
        Ok(Self { conn })
    }

    /// Run a single statement that returns no rows.
    pub fn execute(&self, sql: &str) -> Result<()> {
        self.conn
            .execute(sql, [])
            .map_err(|source| LoadError::StoreWrite {
                statement: sql.to_owned(),
                source,
            })?;
        Ok(())
    }

    /// Start a transaction that inserts rows with `insert_sql`.
    pub fn begin_batch(&mut self, insert_sql: &str) -> Result<Batch<'_>> {
        let tx = self
            .conn
            .transaction()
            .map_err(|source| LoadError::StoreWrite {
                statement: "BEGIN".into(),
                source,
            })?;
        Ok(Batch {
            tx,
            insert_sql: insert_sql.to_owned(),
            rows: 0,
        })
    }
}

/// Rows inserted since the last commit. Dropping a batch without
/// committing rolls it back.
pub struct Batch<'c> {
    tx: Transaction<'c>,
    insert_sql: String,
    rows: usize,
}

impl Batch<'_> {
    pub fn insert(&mut self, row: &EncodedRow) -> rusqlite::Result<()> {
        let mut stmt = self.tx.prepare_cached(&self.insert_sql)?;
        stmt.execute(params_from_iter(row.values()))?;
        self.rows += 1;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    pub fn commit(self) -> Result<usize> {
        let rows = self.rows;
        self.tx.commit().map_err(|source| LoadError::StoreWrite {
            statement: "COMMIT".into(),
            source,
        })?;
        Ok(rows)
    }
}
