// src/config.rs

use clap::{Parser, ValueEnum};
use serde::Serialize;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

pub const DEFAULT_TABLE: &str = "table1";
pub const DEFAULT_DELIMITER: &str = ",";
pub const DEFAULT_BATCH_SIZE: usize = 1000;

/// What to do with a data line whose field count differs from the header.
#[derive(ValueEnum, Serialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum RowMismatch {
    /// Abort the load; earlier batches stay committed.
    #[default]
    Reject,
    /// Log the line and carry on.
    Skip,
}

#[derive(Parser, Debug)]
#[command(
    name = "ds",
    author,
    version,
    about = "Load a delimited text file with a header line into an SQLite table"
)]
pub struct Args {
    /// Table to create (if missing) and append rows to.
    #[arg(short = 'T', long = "table", default_value = DEFAULT_TABLE)]
    pub table: String,

    /// Field delimiter, used for the header and every data line.
    #[arg(short = 'S', long = "delimiter", default_value = DEFAULT_DELIMITER, allow_hyphen_values = true)]
    pub delimiter: String,

    /// Database file. Defaults to the input path with `.db` appended.
    #[arg(short = 'D', long = "database")]
    pub database: Option<PathBuf>,

    /// Rows per transaction. 1 commits every row on its own.
    #[arg(long, default_value_t = DEFAULT_BATCH_SIZE)]
    pub batch_size: usize,

    /// Handling of lines with too few or too many fields.
    #[arg(long, value_enum, default_value_t = RowMismatch::Reject)]
    pub on_row_mismatch: RowMismatch,

    /// Print every insert statement to stdout.
    #[arg(long)]
    pub echo: bool,

    /// Write a JSON summary of the load to this path.
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Delimited text file whose first line is the header.
    pub file: PathBuf,
}

impl Args {
    /// Validate the parsed flags into the configuration the loader runs on.
    pub fn into_config(self) -> Result<LoadConfig, ConfigError> {
        let database = self
            .database
            .unwrap_or_else(|| default_database(&self.file));
        let config = LoadConfig {
            file: self.file,
            database,
            table: self.table,
            delimiter: self.delimiter,
            batch_size: self.batch_size,
            on_row_mismatch: self.on_row_mismatch,
            echo: self.echo,
            report: self.report,
        };
        config.validate()?;
        Ok(config)
    }
}

/// Everything one load needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadConfig {
    pub file: PathBuf,
    pub database: PathBuf,
    pub table: String,
    pub delimiter: String,
    pub batch_size: usize,
    pub on_row_mismatch: RowMismatch,
    pub echo: bool,
    pub report: Option<PathBuf>,
}

impl LoadConfig {
    /// Defaults for `file`: table `table1`, `,` delimiter, `<file>.db`.
    pub fn new<P: Into<PathBuf>>(file: P) -> Self {
        let file = file.into();
        Self {
            database: default_database(&file),
            file,
            table: DEFAULT_TABLE.to_owned(),
            delimiter: DEFAULT_DELIMITER.to_owned(),
            batch_size: DEFAULT_BATCH_SIZE,
            on_row_mismatch: RowMismatch::default(),
            echo: false,
            report: None,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.delimiter.is_empty() {
            return Err(ConfigError::EmptyDelimiter);
        }
        if self.table.is_empty() {
            return Err(ConfigError::EmptyTableName);
        }
        if self.batch_size == 0 {
            return Err(ConfigError::ZeroBatchSize);
        }
        Ok(())
    }
}

/// `data.csv` -> `data.csv.db`
pub fn default_database(file: &Path) -> PathBuf {
    let mut name = OsString::from(file.as_os_str());
    name.push(".db");
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<LoadConfig, ConfigError> {
        Args::try_parse_from(args).unwrap().into_config()
    }

    #[test]
    fn defaults() {
        let config = parse(&["ds", "dir/data.csv"]).unwrap();
        assert_eq!(config, LoadConfig::new("dir/data.csv"));
        assert_eq!(config.table, "table1");
        assert_eq!(config.delimiter, ",");
        assert_eq!(config.database, PathBuf::from("dir/data.csv.db"));
        assert_eq!(config.batch_size, 1000);
        assert_eq!(config.on_row_mismatch, RowMismatch::Reject);
        assert!(!config.echo);
        assert!(config.report.is_none());
    }

    #[test]
    fn short_flags() {
        let config = parse(&["ds", "-T", "people", "-S", ";", "-D", "out.sqlite", "in.txt"]).unwrap();
        assert_eq!(config.table, "people");
        assert_eq!(config.delimiter, ";");
        assert_eq!(config.database, PathBuf::from("out.sqlite"));
        assert_eq!(config.file, PathBuf::from("in.txt"));
    }

    #[test]
    fn long_flags() {
        let config = parse(&[
            "ds",
            "--batch-size",
            "1",
            "--on-row-mismatch",
            "skip",
            "--echo",
            "--report",
            "report.json",
            "--delimiter",
            "-",
            "in.txt",
        ])
        .unwrap();
        assert_eq!(config.batch_size, 1);
        assert_eq!(config.on_row_mismatch, RowMismatch::Skip);
        assert!(config.echo);
        assert_eq!(config.report, Some(PathBuf::from("report.json")));
        assert_eq!(config.delimiter, "-");
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(matches!(
            parse(&["ds", "-S", "", "in.txt"]),
            Err(ConfigError::EmptyDelimiter)
        ));
        assert!(matches!(
            parse(&["ds", "-T", "", "in.txt"]),
            Err(ConfigError::EmptyTableName)
        ));
        assert!(matches!(
            parse(&["ds", "--batch-size", "0", "in.txt"]),
            Err(ConfigError::ZeroBatchSize)
        ));
    }

    #[test]
    fn file_is_required() {
        assert!(Args::try_parse_from(["ds"]).is_err());
    }
}
