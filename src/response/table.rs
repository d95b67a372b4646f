//! # Response tables
//!
//! [`ResponseTable`] is the typed result of a successful parse: an ordered, frozen set of
//! [`Column`]s and one [`Value`] per column in every row.
//!
//! ## Overview
//!
//! * The column set is fixed from the header before the first row is decoded and never
//!   changes afterwards; the only way to build a table is [`ResponseTable::new`] followed by
//!   [`ResponseTable::push_row`], which rejects rows that do not fit the columns.
//! * A table with zero rows is a valid result (Horizons returned an empty data block).
//! * Lookups by column name go through [`ResponseTable::column_index`]; the typed
//!   accessors ([`ResponseTable::floats`], [`ResponseTable::texts`]) return `None` when the
//!   column does not exist or has another kind.

use std::fmt;
use std::io;

use serde::Serialize;

use crate::horizons_errors::HorizonsError;

/// Kind of the values stored in a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ValueKind {
    Text,
    Integer,
    Float,
    Label,
}

/// One typed column of a [`ResponseTable`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Column {
    pub name: &'static str,
    pub kind: ValueKind,
}

/// A decoded cell.
///
/// Failed numeric decodes stay inside their kind: `Float(NaN)` and `Integer(None)`.
/// Unresolvable labels become `Label("n.a.")`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Text(String),
    Integer(Option<i64>),
    Float(f64),
    Label(&'static str),
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Text(_) => ValueKind::Text,
            Value::Integer(_) => ValueKind::Integer,
            Value::Float(_) => ValueKind::Float,
            Value::Label(_) => ValueKind::Label,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(value) => Some(*value),
            _ => None,
        }
    }

    /// Text and label cells as `&str`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(text) => Some(text),
            Value::Label(label) => Some(label),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(text) => write!(f, "{text}"),
            Value::Integer(Some(value)) => write!(f, "{value}"),
            Value::Integer(None) => write!(f, "NaN"),
            Value::Float(value) => write!(f, "{value}"),
            Value::Label(label) => write!(f, "{label}"),
        }
    }
}

/// Typed table parsed from one Horizons response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseTable {
    columns: Vec<Column>,
    rows: Vec<Vec<Value>>,
}

impl ResponseTable {
    /// Empty table with a frozen column set.
    pub fn new(columns: Vec<Column>) -> Self {
        ResponseTable {
            columns,
            rows: Vec::new(),
        }
    }

    /// Append a row.
    ///
    /// Return
    /// ----------
    /// * `false` (and the row is discarded) when the row width or one of the value kinds
    ///   does not match the columns.
    pub fn push_row(&mut self, row: Vec<Value>) -> bool {
        let fits = row.len() == self.columns.len()
            && row
                .iter()
                .zip(&self.columns)
                .all(|(value, column)| value.kind() == column.kind);
        if fits {
            self.rows.push(row);
        }
        fits
    }

    /// Number of rows (epochs).
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Column names in table order.
    pub fn fields(&self) -> Vec<&'static str> {
        self.columns.iter().map(|column| column.name).collect()
    }

    pub fn column_index(&self, field: &str) -> Option<usize> {
        self.columns.iter().position(|column| column.name == field)
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    /// Single cell by row index and column name.
    pub fn get(&self, row: usize, field: &str) -> Option<&Value> {
        let index = self.column_index(field)?;
        self.rows.get(row)?.get(index)
    }

    /// Whole float column.
    pub fn floats(&self, field: &str) -> Option<Vec<f64>> {
        let index = self.column_index(field)?;
        if self.columns[index].kind != ValueKind::Float {
            return None;
        }
        self.rows.iter().map(|row| row[index].as_f64()).collect()
    }

    /// Whole text or label column.
    pub fn texts(&self, field: &str) -> Option<Vec<&str>> {
        let index = self.column_index(field)?;
        if !matches!(self.columns[index].kind, ValueKind::Text | ValueKind::Label) {
            return None;
        }
        self.rows.iter().map(|row| row[index].as_str()).collect()
    }

    /// Calendar epochs (`datetime` column).
    pub fn dates(&self) -> Option<Vec<&str>> {
        self.texts("datetime")
    }

    /// Julian Date epochs (`datetime_jd` column).
    pub fn dates_jd(&self) -> Option<Vec<f64>> {
        self.floats("datetime_jd")
    }

    /// Write the table as CSV, one header record followed by one record per row.
    ///
    /// Arguments
    /// -----------------
    /// * `writer` – any [`io::Write`] sink, e.g. a file or a `Vec<u8>`.
    ///
    /// Return
    /// ----------
    /// * `Err(HorizonsError::CsvExportError)` when the sink fails.
    pub fn write_csv<W: io::Write>(&self, writer: W) -> Result<(), HorizonsError> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(self.columns.iter().map(|column| column.name))?;
        for row in &self.rows {
            csv_writer.write_record(row.iter().map(|value| value.to_string()))?;
        }
        csv_writer.flush().map_err(csv::Error::from)?;
        Ok(())
    }
}

impl fmt::Display for ResponseTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(Value::Text(name)) = self.get(0, "targetname") {
            writeln!(f, "targetname: {name}")?;
        }
        write!(
            f,
            "{} data sets with {} different fields",
            self.len(),
            self.columns.len()
        )
    }
}
