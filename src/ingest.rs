//! CSV and XLSX ingestion.
//!
//! Both formats share the same contract: a header row with the six French
//! column names, matched case-insensitively, followed by data rows. Rows
//! are coerced field by field; the first field that fails numeric coercion
//! aborts the whole load with [`DiagnosticError::MalformedRow`]. Structural
//! problems (unreadable container, missing column, broken row) surface as
//! [`DiagnosticError::Parse`]. Zero data rows is not an ingest error.

use std::io::Cursor;

use calamine::{Data, Reader, Xlsx};
use log::debug;

use crate::error::DiagnosticError;
use crate::model::{Dataset, InputFormat, Record};

/// Exact header names expected in the uploaded file, in template order.
pub const REQUIRED_HEADERS: [&str; 6] = ["Magasin", "Produit", "Revenu", "Coût", "Clients", "Avis"];

/// Parses raw uploaded bytes into a dataset.
pub fn parse(bytes: &[u8], format: InputFormat) -> Result<Dataset, DiagnosticError> {
    match format {
        InputFormat::Csv => parse_csv(bytes),
        InputFormat::Xlsx => parse_xlsx(bytes),
    }
}

/// Column indices of the six required headers within the actual header row.
struct ColumnMap {
    store: usize,
    product: usize,
    revenue: usize,
    cost: usize,
    customers: usize,
    rating: usize,
}

impl ColumnMap {
    fn resolve(headers: &[String]) -> Result<Self, DiagnosticError> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|header| header.trim().eq_ignore_ascii_case(name))
                .ok_or_else(|| DiagnosticError::Parse(format!("missing required column '{name}'")))
        };

        Ok(Self {
            store: find("Magasin")?,
            product: find("Produit")?,
            revenue: find("Revenu")?,
            cost: find("Coût")?,
            customers: find("Clients")?,
            rating: find("Avis")?,
        })
    }
}

/// Parses UTF-8, comma-delimited CSV bytes. A leading BOM is tolerated.
pub fn parse_csv(bytes: &[u8]) -> Result<Dataset, DiagnosticError> {
    let text = std::str::from_utf8(bytes)
        .map_err(|_| DiagnosticError::Parse("the CSV file is not valid UTF-8".into()))?;
    let text = text.trim_start_matches('\u{FEFF}');

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|err| DiagnosticError::Parse(format!("unreadable CSV header row: {err}")))?
        .iter()
        .map(str::to_string)
        .collect();
    let columns = ColumnMap::resolve(&headers)?;

    let mut dataset = Dataset::new();
    for (index, result) in reader.records().enumerate() {
        let row = index + 1;
        let record = result
            .map_err(|err| DiagnosticError::Parse(format!("broken CSV data row {row}: {err}")))?;
        let field = |column: usize| record.get(column).unwrap_or("").trim();

        dataset.push(Record {
            store: field(columns.store).to_string(),
            product: field(columns.product).to_string(),
            revenue: parse_number(field(columns.revenue), row, "Revenu")?,
            cost: parse_number(field(columns.cost), row, "Coût")?,
            customers: parse_count(field(columns.customers), row, "Clients")?,
            rating: parse_number(field(columns.rating), row, "Avis")?,
        });
    }

    debug!("parsed {} data rows from CSV", dataset.len());
    Ok(dataset)
}

/// Parses the first sheet of an XLSX workbook from in-memory bytes.
pub fn parse_xlsx(bytes: &[u8]) -> Result<Dataset, DiagnosticError> {
    let mut workbook = Xlsx::new(Cursor::new(bytes.to_vec()))
        .map_err(|err| DiagnosticError::Parse(format!("unreadable XLSX workbook: {err}")))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| DiagnosticError::Parse("the workbook contains no sheet".into()))?
        .map_err(|err| DiagnosticError::Parse(format!("unreadable worksheet: {err}")))?;

    let mut rows = range.rows();
    let headers: Vec<String> = rows
        .next()
        .ok_or_else(|| DiagnosticError::Parse("the worksheet has no header row".into()))?
        .iter()
        .map(cell_text)
        .collect();
    let columns = ColumnMap::resolve(&headers)?;

    let empty = Data::Empty;
    let mut dataset = Dataset::new();
    for (index, cells) in rows.enumerate() {
        let row = index + 1;
        let cell = |column: usize| cells.get(column).unwrap_or(&empty);

        dataset.push(Record {
            store: cell_text(cell(columns.store)),
            product: cell_text(cell(columns.product)),
            revenue: cell_number(cell(columns.revenue), row, "Revenu")?,
            cost: cell_number(cell(columns.cost), row, "Coût")?,
            customers: cell_count(cell(columns.customers), row, "Clients")?,
            rating: cell_number(cell(columns.rating), row, "Avis")?,
        });
    }

    debug!("parsed {} data rows from XLSX", dataset.len());
    Ok(dataset)
}

/// Coerces a textual field to `f64`, accepting a comma decimal separator.
fn parse_number(value: &str, row: usize, column: &'static str) -> Result<f64, DiagnosticError> {
    let normalized = value.replace(',', ".");
    normalized
        .parse::<f64>()
        .map_err(|_| DiagnosticError::MalformedRow {
            row,
            column,
            value: value.to_string(),
        })
}

/// Coerces a textual field to a non-negative integer count. Whole-valued
/// floats like `120.0` are accepted, spreadsheet exports produce them.
fn parse_count(value: &str, row: usize, column: &'static str) -> Result<u32, DiagnosticError> {
    if let Ok(count) = value.parse::<u32>() {
        return Ok(count);
    }
    match parse_number(value, row, column)? {
        f if f.fract() == 0.0 && f >= 0.0 && f <= u32::MAX as f64 => Ok(f as u32),
        _ => Err(DiagnosticError::MalformedRow {
            row,
            column,
            value: value.to_string(),
        }),
    }
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::String(text) => text.trim().to_string(),
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}

fn cell_number(cell: &Data, row: usize, column: &'static str) -> Result<f64, DiagnosticError> {
    match cell {
        Data::Float(value) => Ok(*value),
        Data::Int(value) => Ok(*value as f64),
        Data::String(text) => parse_number(text.trim(), row, column),
        other => Err(DiagnosticError::MalformedRow {
            row,
            column,
            value: other.to_string(),
        }),
    }
}

fn cell_count(cell: &Data, row: usize, column: &'static str) -> Result<u32, DiagnosticError> {
    match cell_number(cell, row, column)? {
        f if f.fract() == 0.0 && f >= 0.0 && f <= u32::MAX as f64 => Ok(f as u32),
        _ => Err(DiagnosticError::MalformedRow {
            row,
            column,
            value: cell.to_string(),
        }),
    }
}
