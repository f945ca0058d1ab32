pub mod encode;
pub mod report;
pub mod store;

pub use encode::{encode_row, EncodedRow, SqlValue};
pub use report::{write_report, LoadReport};
pub use store::{Batch, Store};

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, enabled, info, instrument, trace, warn, Level};

use crate::config::{LoadConfig, RowMismatch};
use crate::error::{EncodeError, LoadError, Result, SchemaError};
use crate::schema::{
    build_create_statement, build_insert_statement, parse_header, placeholders, read_header_line,
    Schema,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoadState {
    Idle,
    SchemaParsed,
    TableReady,
    InsertingRows,
    Closed,
}

fn advance(state: &mut LoadState, next: LoadState) {
    debug!(from = ?*state, to = ?next, "loader state");
    *state = next;
}

#[derive(Debug, Default)]
struct RowCounts {
    loaded: usize,
    skipped: usize,
    batches: usize,
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> LoadError + '_ {
    move |source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Load `config.file` into `config.table` of `config.database`.
///
/// The header line becomes the table definition; every following line is
/// one row. Rows are committed in transactions of `config.batch_size`, so a
/// failure part way through leaves every earlier batch in place.
#[instrument(level = "info", skip(config), fields(file = %config.file.display(), table = %config.table))]
pub fn load(config: &LoadConfig) -> Result<LoadReport> {
    let start = Instant::now();
    let mut state = LoadState::Idle;

    let file = File::open(&config.file).map_err(io_error(&config.file))?;
    let mut reader = BufReader::new(file);

    let header = read_header_line(&mut reader)
        .map_err(io_error(&config.file))?
        .ok_or(SchemaError::EmptyInput)?;
    let schema = parse_header(&header, &config.delimiter)?;
    advance(&mut state, LoadState::SchemaParsed);
    info!(columns = schema.len(), "parsed header");

    let mut store = Store::open(&config.database)?;
    let create = build_create_statement(&schema, &config.table);
    debug!(statement = %create, "creating table");
    store.execute(&create)?;
    advance(&mut state, LoadState::TableReady);

    advance(&mut state, LoadState::InsertingRows);
    let mut counts = RowCounts::default();
    if let Err(e) = insert_rows(&mut store, &schema, config, &mut reader, &mut counts) {
        warn!(
            rows_committed = counts.loaded,
            batches_committed = counts.batches,
            "load aborted"
        );
        return Err(e);
    }

    drop(reader);
    drop(store);
    advance(&mut state, LoadState::Closed);

    let report = LoadReport {
        file: config.file.clone(),
        database: config.database.clone(),
        table: config.table.clone(),
        columns: schema.columns().to_vec(),
        on_row_mismatch: config.on_row_mismatch,
        rows_loaded: counts.loaded,
        rows_skipped: counts.skipped,
        batches_committed: counts.batches,
        elapsed_ms: start.elapsed().as_millis(),
    };
    info!(
        rows = report.rows_loaded,
        skipped = report.rows_skipped,
        elapsed = ?start.elapsed(),
        "load complete"
    );

    if let Some(path) = &config.report {
        write_report(path, &report)?;
        info!("wrote report {}", path.display());
    }

    Ok(report)
}

fn insert_rows<R: BufRead>(
    store: &mut Store,
    schema: &Schema,
    config: &LoadConfig,
    reader: &mut R,
    counts: &mut RowCounts,
) -> Result<()> {
    let insert_sql = build_insert_statement(schema, &config.table, &placeholders(schema));
    debug!(statement = %insert_sql, "prepared insert");

    let mut batch = store.begin_batch(&insert_sql)?;
    // the header is line 1
    let mut line_no = 1;
    let mut line = String::new();

    loop {
        line.clear();
        if reader
            .read_line(&mut line)
            .map_err(io_error(&config.file))?
            == 0
        {
            break;
        }
        line_no += 1;

        let raw = line.trim_end_matches(['\n', '\r']);
        if raw.is_empty() {
            trace!(line = line_no, "skipping blank line");
            continue;
        }

        let row = match encode_row(raw, schema, &config.delimiter) {
            Ok(row) => row,
            Err(e @ EncodeError::RowShape { .. }) if config.on_row_mismatch == RowMismatch::Skip => {
                warn!(line = line_no, "skipping row: {}", e);
                counts.skipped += 1;
                continue;
            }
            Err(source) => {
                return Err(LoadError::Encode {
                    line: line_no,
                    source,
                })
            }
        };

        if config.echo || enabled!(Level::TRACE) {
            let rendered = build_insert_statement(schema, &config.table, &row.literals());
            trace!(line = line_no, "{}", rendered);
            if config.echo {
                println!("{}", rendered);
            }
        }

        batch
            .insert(&row)
            .map_err(|source| LoadError::StoreWrite {
                statement: build_insert_statement(schema, &config.table, &row.literals()),
                source,
            })?;

        if batch.len() >= config.batch_size {
            counts.loaded += batch.commit()?;
            counts.batches += 1;
            debug!(rows = counts.loaded, "committed batch");
            batch = store.begin_batch(&insert_sql)?;
        }
    }

    if !batch.is_empty() {
        counts.loaded += batch.commit()?;
        counts.batches += 1;
        debug!(rows = counts.loaded, "committed final batch");
    }

    Ok(())
}
