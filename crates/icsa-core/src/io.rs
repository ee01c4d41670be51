//! Reading and writing comment tables.
//!
//! Input arrives as CSV or Excel (export services produce both); output is
//! always CSV. Parsing is byte-driven so the HTTP front end can feed
//! uploads straight through without touching disk.

use std::io::Cursor;
use std::path::Path;

use calamine::{open_workbook_auto_from_rs, Data, Reader};
use csv::{ReaderBuilder, WriterBuilder};

use crate::table::DataTable;
use crate::TableError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    Csv,
    Excel,
}

impl TableFormat {
    /// Detect the format from a file name's extension (`csv`, `xlsx`, `xls`).
    ///
    /// # Errors
    ///
    /// Returns `TableError::UnsupportedFormat` for anything else.
    pub fn from_path(path: &Path) -> Result<Self, TableError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase);
        match ext.as_deref() {
            Some("csv") => Ok(TableFormat::Csv),
            Some("xlsx" | "xls") => Ok(TableFormat::Excel),
            _ => Err(TableError::UnsupportedFormat {
                name: path.display().to_string(),
            }),
        }
    }
}

/// Parse raw file bytes into a [`DataTable`].
///
/// `skip_rows` leading rows are discarded before the header row is taken;
/// export files often carry a metadata preamble above the real header. The
/// count is over parsed records (the CSV reader drops blank lines). Empty
/// cells parse as `None`, everything else as its string form.
///
/// # Errors
///
/// Returns `TableError::Empty` when no header row remains after skipping,
/// or the underlying CSV/spreadsheet error when the bytes do not parse.
pub fn parse_table_bytes(
    bytes: &[u8],
    format: TableFormat,
    skip_rows: usize,
) -> Result<DataTable, TableError> {
    match format {
        TableFormat::Csv => parse_csv(bytes, skip_rows),
        TableFormat::Excel => parse_excel(bytes, skip_rows),
    }
}

fn parse_csv(bytes: &[u8], skip_rows: usize) -> Result<DataTable, TableError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes);

    let mut table: Option<DataTable> = None;
    for (i, record) in reader.records().enumerate() {
        let record = record?;
        if i < skip_rows {
            continue;
        }
        match table.as_mut() {
            None => {
                let headers = record.iter().map(str::to_string).collect();
                table = Some(DataTable::new(headers));
            }
            Some(t) => {
                t.push_row(record.iter().map(cell_from_str).collect());
            }
        }
    }
    table.ok_or(TableError::Empty)
}

fn parse_excel(bytes: &[u8], skip_rows: usize) -> Result<DataTable, TableError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))?;
    let range = workbook.worksheet_range_at(0).ok_or(TableError::Empty)??;

    let mut table: Option<DataTable> = None;
    for row in range.rows().skip(skip_rows) {
        match table.as_mut() {
            None => {
                let headers = row
                    .iter()
                    .map(|cell| match cell {
                        Data::Empty => String::new(),
                        other => other.to_string(),
                    })
                    .collect();
                table = Some(DataTable::new(headers));
            }
            Some(t) => {
                t.push_row(
                    row.iter()
                        .map(|cell| match cell {
                            Data::Empty => None,
                            other => Some(other.to_string()),
                        })
                        .collect(),
                );
            }
        }
    }
    table.ok_or(TableError::Empty)
}

fn cell_from_str(field: &str) -> Option<String> {
    if field.is_empty() {
        None
    } else {
        Some(field.to_string())
    }
}

/// Read a table file from disk, detecting the format from its extension.
///
/// # Errors
///
/// Propagates format detection, I/O, and parse errors.
pub fn read_table_file(path: &Path, skip_rows: usize) -> Result<DataTable, TableError> {
    let format = TableFormat::from_path(path)?;
    let bytes = std::fs::read(path)?;
    parse_table_bytes(&bytes, format, skip_rows)
}

/// Serialize a table as CSV to any writer. Absent cells become empty fields.
///
/// # Errors
///
/// Propagates CSV serialization errors.
pub fn write_csv<W: std::io::Write>(table: &DataTable, writer: W) -> Result<(), TableError> {
    let mut out = WriterBuilder::new().from_writer(writer);
    out.write_record(table.headers())?;
    for row in table.rows() {
        out.write_record(row.iter().map(|cell| cell.as_deref().unwrap_or("")))?;
    }
    out.flush()?;
    Ok(())
}

/// Write a table to a CSV file at `path`.
///
/// # Errors
///
/// Propagates file creation and CSV serialization errors.
pub fn write_table_csv(table: &DataTable, path: &Path) -> Result<(), TableError> {
    let file = std::fs::File::create(path)?;
    write_csv(table, file)
}

/// Parse `bytes` and locate `target` among the headers, retrying once with
/// `retry_skip_rows` leading rows skipped when the first pass does not
/// resolve the column. Returns the parsed table and the actual header name
/// that matched.
///
/// # Errors
///
/// Returns `TableError::ColumnNotFound` when neither pass resolves the
/// column; parse errors from the first pass propagate as-is.
pub fn load_table_with_column(
    bytes: &[u8],
    format: TableFormat,
    target: &str,
    retry_skip_rows: usize,
) -> Result<(DataTable, String), TableError> {
    let table = parse_table_bytes(bytes, format, 0)?;
    if let Some(idx) = table.resolve_column(target) {
        let name = table.headers()[idx].clone();
        return Ok((table, name));
    }

    if retry_skip_rows > 0 {
        if let Ok(skipped) = parse_table_bytes(bytes, format, retry_skip_rows) {
            if let Some(idx) = skipped.resolve_column(target) {
                let name = skipped.headers()[idx].clone();
                return Ok((skipped, name));
            }
        }
    }

    Err(TableError::ColumnNotFound {
        column: target.to_string(),
    })
}
