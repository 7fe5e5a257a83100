use std::fmt;

use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use crate::error::ErrorSink;

/// Header cell of the table returned when any diagnostic was recorded.
pub const ERRORS_HEADER: &str = "Errors";

/// A single generated cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
    Null,
}

impl CellValue {
    /// Convert a JSON scalar taken from a list or library pool.
    ///
    /// Arrays and objects have no scalar form and are kept as compact JSON text.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => CellValue::Null,
            Value::Bool(value) => CellValue::Bool(*value),
            Value::Number(number) => match number.as_i64() {
                Some(value) => CellValue::Int(value),
                None => CellValue::Float(number.as_f64().unwrap_or_default()),
            },
            Value::String(value) => CellValue::Text(value.clone()),
            other => CellValue::Text(other.to_string()),
        }
    }

    pub fn empty() -> Self {
        CellValue::Text(String::new())
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            CellValue::Int(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::Text(value) => Some(value.as_str()),
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Int(value) => write!(f, "{value}"),
            CellValue::Float(value) => write!(f, "{value}"),
            CellValue::Bool(value) => write!(f, "{value}"),
            CellValue::Text(value) => f.write_str(value),
            CellValue::Null => f.write_str("null"),
        }
    }
}

impl Default for CellValue {
    fn default() -> Self {
        CellValue::empty()
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Int(value)
    }
}

/// One generated row, index-aligned with the resolved column order.
pub type Row = Vec<CellValue>;

/// What a [`Table`] carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    /// Generated data, optionally preceded by a header row.
    Data { header: bool },
    /// `["Errors"]` followed by one row per diagnostic.
    Errors,
}

/// Result of a generation run: an ordered sequence of rows.
///
/// Serializes as a plain array of arrays.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    kind: TableKind,
    rows: Vec<Row>,
}

impl Table {
    pub fn data(rows: Vec<Row>, header: bool) -> Self {
        Self {
            kind: TableKind::Data { header },
            rows,
        }
    }

    /// Build the fallback table listing every diagnostic in recording order.
    pub fn from_errors(errors: &ErrorSink) -> Self {
        let mut rows = Vec::with_capacity(errors.len() + 1);
        rows.push(vec![CellValue::from(ERRORS_HEADER)]);
        rows.extend(
            errors
                .messages()
                .into_iter()
                .map(|message| vec![CellValue::Text(message)]),
        );
        Self {
            kind: TableKind::Errors,
            rows,
        }
    }

    pub fn kind(&self) -> TableKind {
        self.kind
    }

    pub fn is_error(&self) -> bool {
        self.kind == TableKind::Errors
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// The leading header row, if the table has one.
    pub fn header(&self) -> Option<&Row> {
        match self.kind {
            TableKind::Data { header: true } | TableKind::Errors => self.rows.first(),
            TableKind::Data { header: false } => None,
        }
    }

    /// Rows after the header, if any.
    pub fn body(&self) -> &[Row] {
        match self.header() {
            Some(_) => &self.rows[1..],
            None => &self.rows,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl Serialize for Table {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(&self.rows)
    }
}
