use std::collections::HashMap;

use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::TableError;
use crate::rule::{Rule, is_truthy, json_int};
use crate::value::CellValue;

/// Number of data rows generated when `settings.rows` is absent.
pub const DEFAULT_ROWS: u64 = 10;
/// First index value when `settings.index.start` is absent or not an integer.
pub const DEFAULT_INDEX_START: i64 = 1;

/// User-supplied schema: table settings plus ordered column rules.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct Template {
    #[serde(default)]
    pub settings: Settings,
    /// Columns in declaration order. `template` is accepted as an alias.
    #[serde(alias = "template")]
    pub columns: IndexMap<String, Field>,
}

/// Table-wide settings.
#[derive(Debug, Clone, PartialEq, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    /// Number of data rows. Integral floats such as `3.0` are accepted.
    #[serde(deserialize_with = "deserialize_rows")]
    #[schemars(with = "u64")]
    pub rows: u64,
    /// Emit the resolved column names as the first row.
    pub include_headers: bool,
    /// Optional synthetic index column, always first.
    pub index: Option<IndexSettings>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            include_headers: false,
            index: None,
        }
    }
}

fn deserialize_rows<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    json_int(Some(&value))
        .and_then(|rows| u64::try_from(rows).ok())
        .ok_or_else(|| {
            D::Error::custom(format!("rows must be a non-negative integer, got {value}"))
        })
}

/// Synthetic, monotonically increasing index column.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, JsonSchema)]
#[serde(default)]
pub struct IndexSettings {
    pub name: Option<String>,
    /// First index value; anything but an integer falls back to 1.
    pub start: Option<Value>,
}

impl IndexSettings {
    pub fn new(name: impl Into<String>, start: i64) -> Self {
        Self {
            name: Some(name.into()),
            start: Some(Value::from(start)),
        }
    }

    /// Column name, when the index is actually enabled.
    pub fn column_name(&self) -> Option<&str> {
        self.name.as_deref().filter(|name| !name.is_empty())
    }

    pub fn start(&self) -> i64 {
        json_int(self.start.as_ref()).unwrap_or(DEFAULT_INDEX_START)
    }
}

/// How one declared column is filled.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "Value")]
pub enum Field {
    /// `{ "autoGenerate": Rule }`
    Generated(Rule),
    /// `{ "list": [...] }`, picked uniformly. Never empty.
    List(Vec<CellValue>),
    /// Any other shape; yields an empty cell.
    Empty,
}

impl Field {
    pub fn from_json(value: &Value) -> Self {
        let Some(object) = value.as_object() else {
            return Field::Empty;
        };
        if let Some(rule) = object.get("autoGenerate").filter(|rule| is_truthy(rule)) {
            return Field::Generated(Rule::from_json(rule));
        }
        match object.get("list") {
            Some(Value::Array(values)) if !values.is_empty() => {
                Field::List(values.iter().map(CellValue::from_json).collect())
            }
            _ => Field::Empty,
        }
    }
}

impl From<Value> for Field {
    fn from(value: Value) -> Self {
        Field::from_json(&value)
    }
}

impl Template {
    /// Validate untyped template JSON into a [`Template`].
    ///
    /// Only structural problems fail here; rule-level problems surface per
    /// cell during generation.
    pub fn from_json(value: &Value) -> Result<Self, TableError> {
        let object = value.as_object().ok_or(TableError::InvalidTemplate)?;

        let columns = object
            .get("columns")
            .or_else(|| object.get("template"))
            .and_then(Value::as_object)
            .ok_or(TableError::InvalidStructure)?;

        let settings = match object.get("settings") {
            None | Some(Value::Null) => Settings::default(),
            Some(settings) => serde_json::from_value(settings.clone())
                .map_err(|err| TableError::InvalidSettings(err.to_string()))?,
        };

        let columns = columns
            .iter()
            .map(|(name, field)| (name.clone(), Field::from_json(field)))
            .collect();

        Ok(Self { settings, columns })
    }

    /// Column names in output order, the index column first when configured.
    pub fn layout(&self) -> ColumnLayout {
        let index = self
            .settings
            .index
            .as_ref()
            .and_then(IndexSettings::column_name);
        ColumnLayout::new(index.into_iter().chain(self.columns.keys().map(String::as_str)))
    }
}

/// Resolved column order and the name → position lookup used by back-references.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnLayout {
    names: Vec<String>,
    positions: HashMap<String, usize>,
}

impl ColumnLayout {
    pub fn new<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        let names: Vec<String> = names.into_iter().map(str::to_string).collect();
        let mut positions = HashMap::with_capacity(names.len());
        for (position, name) in names.iter().enumerate() {
            // duplicate names resolve to the first occurrence
            positions.entry(name.clone()).or_insert(position);
        }
        Self { names, positions }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.positions.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
