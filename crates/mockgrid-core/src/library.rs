use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

use crate::rule::{CompositeRule, Rule};
use crate::value::CellValue;

/// A named entry of the library.
#[derive(Debug, Clone, PartialEq)]
pub enum LibraryEntry {
    /// Non-empty pool of candidates, picked uniformly.
    Pool(Vec<CellValue>),
    /// Derived entry built from other entries.
    Composite(CompositeRule),
    /// Empty array, non-composite object or bare scalar.
    Unusable,
}

impl LibraryEntry {
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Array(values) if !values.is_empty() => {
                LibraryEntry::Pool(values.iter().map(CellValue::from_json).collect())
            }
            Value::Object(_) => match Rule::from_json(value) {
                Rule::Composite(rule) => LibraryEntry::Composite(rule),
                _ => LibraryEntry::Unusable,
            },
            _ => LibraryEntry::Unusable,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            LibraryEntry::Pool(_) => "pool",
            LibraryEntry::Composite(_) => "composite",
            LibraryEntry::Unusable => "unusable",
        }
    }
}

/// Named value pools and derived composite entries.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "Value")]
pub struct Library {
    entries: BTreeMap<String, LibraryEntry>,
}

impl Library {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a library from a JSON object. Anything that is not an object
    /// yields an empty library; null entries are skipped.
    pub fn from_json(value: &Value) -> Self {
        let entries = value
            .as_object()
            .into_iter()
            .flatten()
            .filter(|(_, entry)| !entry.is_null())
            .map(|(key, entry)| (key.clone(), LibraryEntry::from_json(entry)))
            .collect();
        Self { entries }
    }

    pub fn lookup(&self, key: &str) -> Option<&LibraryEntry> {
        self.entries.get(key)
    }

    /// Shallow merge: entries of `overrides` replace same-named entries.
    pub fn merge(&mut self, overrides: Library) {
        self.entries.extend(overrides.entries);
    }

    /// Keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &LibraryEntry)> {
        self.entries.iter().map(|(key, entry)| (key.as_str(), entry))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<Value> for Library {
    fn from(value: Value) -> Self {
        Library::from_json(&value)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn classifies_entries() {
        let library = Library::from_json(&json!({
            "colors": ["red", "green"],
            "empty": [],
            "fullName": {"type": "composite", "patterns": [[{"type": "static", "value": "x"}]]},
            "other": {"type": "number", "min": 1, "max": 2},
            "scalar": "blue",
            "gone": null
        }));

        assert_eq!(library.lookup("colors").map(LibraryEntry::kind), Some("pool"));
        assert_eq!(library.lookup("empty"), Some(&LibraryEntry::Unusable));
        assert_eq!(
            library.lookup("fullName").map(LibraryEntry::kind),
            Some("composite")
        );
        assert_eq!(library.lookup("other"), Some(&LibraryEntry::Unusable));
        assert_eq!(library.lookup("scalar"), Some(&LibraryEntry::Unusable));
        assert_eq!(library.lookup("gone"), None);
    }

    #[test]
    fn merge_replaces_whole_entries() {
        let mut library = Library::from_json(&json!({"foo": ["a", "b"], "bar": ["c"]}));
        library.merge(Library::from_json(&json!({"foo": ["z"]})));

        assert_eq!(
            library.lookup("foo"),
            Some(&LibraryEntry::Pool(vec![CellValue::from("z")]))
        );
        assert_eq!(
            library.lookup("bar"),
            Some(&LibraryEntry::Pool(vec![CellValue::from("c")]))
        );
    }

    #[test]
    fn non_object_input_is_empty() {
        assert!(Library::from_json(&json!(["a"])).is_empty());
    }
}
