use std::io::Read;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TableError {
    #[error("read error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv parse error: {0}")]
    Csv(#[from] csv::Error),
    #[error("input has no header row")]
    NoHeader,
}

/// An alert export materialized in memory: header order plus row-major string
/// cells. Absent cells are empty strings; every row exposes the same columns.
#[derive(Debug, Clone, Default)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: Vec<String>) -> Self {
        Table { columns, rows: Vec::new() }
    }

    /// Append a row; short rows are padded with empty cells, long rows truncated.
    pub fn push_row(&mut self, mut cells: Vec<String>) {
        cells.resize(self.columns.len(), String::new());
        self.rows.push(cells);
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Cell value at (row, column); empty string when either is unknown.
    pub fn value(&self, row: usize, column: &str) -> &str {
        match self.column_index(column) {
            Some(idx) => self.rows.get(row).map(|r| r[idx].as_str()).unwrap_or(""),
            None => "",
        }
    }

    pub fn column_values(&self, column: &str) -> Vec<&str> {
        match self.column_index(column) {
            Some(idx) => self.rows.iter().map(|r| r[idx].as_str()).collect(),
            None => Vec::new(),
        }
    }
}

/// Read a delimited table from any byte stream. The caller supplies the
/// delimiter; no sniffing happens here. Cells are decoded with lossy UTF-8 so
/// legacy-encoded exports never abort the run, and header names are trimmed.
pub fn read_table<R: Read>(reader: R, delimiter: u8) -> Result<Table, TableError> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(reader);

    let headers = rdr.byte_headers()?.clone();
    if headers.is_empty() {
        return Err(TableError::NoHeader);
    }
    let columns: Vec<String> = headers
        .iter()
        .map(|h| String::from_utf8_lossy(h).trim().to_string())
        .collect();

    let mut table = Table::new(columns);
    for record in rdr.byte_records() {
        let record = record?;
        let cells = record
            .iter()
            .map(|c| String::from_utf8_lossy(c).into_owned())
            .collect();
        table.push_row(cells);
    }
    Ok(table)
}
