//! In-memory CSV table.
//!
//! Stages read the whole upstream artifact, add or overwrite columns, and
//! write a complete new artifact. Rows that cannot be interpreted against
//! the header (wrong field count, invalid UTF-8) are kept and written back,
//! with the defect recorded so the stage can report them as row errors.

use csv::{ByteRecord, ReaderBuilder, WriterBuilder};
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;

use crate::errors::{IcpError, RowError};

#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub cells: Vec<String>,
    /// Set when the raw record did not fit the header
    pub defect: Option<RowError>,
}

impl Row {
    pub fn new(cells: Vec<String>) -> Self {
        Self {
            cells,
            defect: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Row>,
}

impl Table {
    pub fn new(headers: Vec<String>, rows: Vec<Row>) -> Self {
        Self { headers, rows }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == name)
    }

    /// Index of `name`, appending an empty column if absent.
    pub fn ensure_column(&mut self, name: &str) -> usize {
        if let Some(index) = self.column(name) {
            return index;
        }
        self.headers.push(name.to_string());
        for row in &mut self.rows {
            row.cells.resize(self.headers.len(), String::new());
        }
        self.headers.len() - 1
    }

    pub fn set(&mut self, row: usize, column: usize, value: String) {
        let cells = &mut self.rows[row].cells;
        if cells.len() <= column {
            cells.resize(column + 1, String::new());
        }
        cells[column] = value;
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|r| r.cells.get(column))
            .map(String::as_str)
    }

    /// Reorder rows by `order`, a permutation of row indices.
    pub fn reorder(&mut self, order: &[usize]) {
        debug_assert_eq!(order.len(), self.rows.len());
        let mut slots: Vec<Option<Row>> = self.rows.drain(..).map(Some).collect();
        self.rows = order.iter().filter_map(|&i| slots[i].take()).collect();
    }
}

/// Read a CSV table from `reader`. A zero-byte input is an empty table.
pub fn read_from<R: Read>(reader: R) -> Result<Table, IcpError> {
    let mut csv_reader = ReaderBuilder::new()
        .flexible(true)
        .has_headers(true)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader
        .byte_headers()?
        .iter()
        .map(|field| String::from_utf8_lossy(field).trim_start_matches('\u{feff}').to_string())
        .collect();

    let mut rows = Vec::new();
    let mut record = ByteRecord::new();
    while csv_reader.read_byte_record(&mut record)? {
        rows.push(decode_row(&record, headers.len()));
    }

    Ok(Table::new(headers, rows))
}

fn decode_row(record: &ByteRecord, width: usize) -> Row {
    let mut defect = None;
    let mut cells: Vec<String> = record
        .iter()
        .map(|field| match std::str::from_utf8(field) {
            Ok(text) => text.to_string(),
            Err(_) => {
                defect.get_or_insert_with(|| RowError::malformed("invalid UTF-8"));
                String::from_utf8_lossy(field).into_owned()
            }
        })
        .collect();

    if cells.len() != width {
        defect.get_or_insert_with(|| {
            RowError::malformed(format!("expected {} fields, found {}", width, cells.len()))
        });
        cells.resize(width, String::new());
    }

    Row { cells, defect }
}

pub fn read_table(path: &Path) -> Result<Table, IcpError> {
    let file = File::open(path)?;
    read_from(file)
}

pub fn write_to<W: Write>(writer: W, table: &Table) -> Result<(), IcpError> {
    let mut csv_writer = WriterBuilder::new().flexible(true).from_writer(writer);
    csv_writer.write_record(&table.headers)?;
    for row in &table.rows {
        csv_writer.write_record(&row.cells)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write `table` to `path`, creating parent directories as needed.
pub fn write_table(path: &Path, table: &Table) -> Result<(), IcpError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;
    write_to(file, table)
}
