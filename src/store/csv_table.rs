//! CSV <-> Table conversion for the per-kind store files.

use crate::errors::AppResult;
use crate::models::record::{ID_FIELD, TIMESTAMP_FIELD};
use crate::models::{Record, Table};
use std::io::Write;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Why a store file could not be turned into a table.
#[derive(Debug)]
pub(crate) enum Corruption {
    Csv(csv::Error),
    MissingColumn(&'static str),
    DuplicateColumn(String),
    RowTooLong { line: u64, cells: usize, columns: usize },
}

impl std::fmt::Display for Corruption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Corruption::Csv(e) => write!(f, "{e}"),
            Corruption::MissingColumn(c) => write!(f, "header has no '{c}' column"),
            Corruption::DuplicateColumn(c) => write!(f, "duplicate column '{c}'"),
            Corruption::RowTooLong {
                line,
                cells,
                columns,
            } => write!(f, "line {line}: {cells} cells for {columns} columns"),
        }
    }
}

/// Parse a whole store file.
///
/// Rows shorter than the header are fine (columns added after they were
/// written); rows longer than the header are not.
pub(crate) fn parse_table(bytes: &[u8]) -> Result<Table, Corruption> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);

    if bytes.iter().all(|b| b.is_ascii_whitespace()) {
        return Ok(Table::default());
    }

    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(bytes);

    let headers = rdr.headers().map_err(Corruption::Csv)?.clone();
    let columns: Vec<String> = headers.iter().map(|h| h.trim().to_string()).collect();

    for required in [ID_FIELD, TIMESTAMP_FIELD] {
        if !columns.iter().any(|c| c == required) {
            return Err(Corruption::MissingColumn(required));
        }
    }
    for (i, c) in columns.iter().enumerate() {
        if columns[..i].contains(c) {
            return Err(Corruption::DuplicateColumn(c.clone()));
        }
    }

    let mut table = Table {
        columns,
        rows: Vec::new(),
    };

    for result in rdr.records() {
        let row = result.map_err(Corruption::Csv)?;
        if row.len() > table.columns.len() {
            return Err(Corruption::RowTooLong {
                line: row.position().map(|p| p.line()).unwrap_or(0),
                cells: row.len(),
                columns: table.columns.len(),
            });
        }

        let mut record = Record::new();
        for (col, cell) in table.columns.iter().zip(row.iter()) {
            record.set_cell(col, cell.to_string());
        }
        table.rows.push(record);
    }

    Ok(table)
}

/// Write `table` as CSV: header row first, one line per record, absent
/// values as empty cells.
pub(crate) fn write_table<W: Write>(table: &Table, out: W) -> AppResult<()> {
    let mut wtr = csv::Writer::from_writer(out);

    wtr.write_record(&table.columns)?;
    for row in &table.rows {
        wtr.write_record(table.columns.iter().map(|c| row.get(c).unwrap_or("")))?;
    }

    wtr.flush()?;
    Ok(())
}
