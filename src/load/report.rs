// src/load/report.rs

use serde::Serialize;
use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use crate::config::RowMismatch;
use crate::error::{LoadError, Result};
use crate::schema::ColumnSpec;

/// Summary of one finished load.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct LoadReport {
    pub file: PathBuf,
    pub database: PathBuf,
    pub table: String,
    pub columns: Vec<ColumnSpec>,
    pub on_row_mismatch: RowMismatch,
    pub rows_loaded: usize,
    pub rows_skipped: usize,
    pub batches_committed: usize,
    pub elapsed_ms: u128,
}

/// Write `report` as pretty JSON to `path`. The JSON goes to a hidden
/// sibling file first and is renamed into place.
pub fn write_report<P: AsRef<Path>>(path: P, report: &LoadReport) -> Result<()> {
    let path = path.as_ref();
    write_atomic(path, report).map_err(|source| LoadError::Report {
        path: path.to_path_buf(),
        source,
    })
}

fn write_atomic(path: &Path, report: &LoadReport) -> io::Result<()> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "report.json".into());
    let tmp_path = path.with_file_name(format!(".{}.tmp", file_name));

    let mut tmp = fs::File::create(&tmp_path)?;
    let json = serde_json::to_vec_pretty(report).map_err(io::Error::other)?;
    tmp.write_all(&json)?;
    tmp.write_all(b"\n")?;
    tmp.sync_all()?;
    drop(tmp);

    if let Err(e) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e);
    }
    Ok(())
}
