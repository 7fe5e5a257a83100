use serde::Deserialize;
use serde_json::{Map, Value};

/// Why a `type` discriminator could not be mapped onto a known variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tag {
    /// `type` absent, null or empty.
    Missing,
    /// `type` present but not one of the supported tags.
    Unknown(String),
}

/// Inclusive integer bounds; either side is `None` when absent or not an integer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Bounds {
    pub min: Option<i64>,
    pub max: Option<i64>,
}

impl Bounds {
    pub fn new(min: i64, max: i64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }

    fn from_object(object: &Map<String, Value>) -> Self {
        Self {
            min: json_int(object.get("min")),
            max: json_int(object.get("max")),
        }
    }
}

/// Fixed-length random string drawn from an alphabet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RandomSpec {
    /// Positive length; zero, negative and non-integer lengths are `None`.
    pub length: Option<usize>,
    /// Non-empty alphabet.
    pub characters: Option<String>,
}

impl RandomSpec {
    pub fn new(length: usize, characters: impl Into<String>) -> Self {
        let characters = characters.into();
        Self {
            length: (length > 0).then_some(length),
            characters: (!characters.is_empty()).then_some(characters),
        }
    }

    fn from_object(object: &Map<String, Value>) -> Self {
        let length = json_int(object.get("length"))
            .filter(|length| *length > 0)
            .and_then(|length| usize::try_from(length).ok());
        let characters = object
            .get("characters")
            .and_then(Value::as_str)
            .filter(|characters| !characters.is_empty())
            .map(str::to_string);
        Self { length, characters }
    }
}

/// Output format of a date rule that is not a token string.
pub const UTC_FORMAT: &str = "UTC";

/// Date-in-range rule. Bounds stay as raw literals until resolution so that a
/// bad literal is reported against the column that uses it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DateSpec {
    pub start: Option<Value>,
    pub end: Option<Value>,
    pub format: Option<String>,
}

impl DateSpec {
    fn from_object(object: &Map<String, Value>) -> Self {
        Self {
            start: object.get("start").filter(|value| is_truthy(value)).cloned(),
            end: object.get("end").filter(|value| is_truthy(value)).cloned(),
            format: object
                .get("format")
                .and_then(Value::as_str)
                .filter(|format| !format.is_empty())
                .map(str::to_string),
        }
    }

    /// Token format string, or [`UTC_FORMAT`] when none was given.
    pub fn format(&self) -> &str {
        self.format.as_deref().unwrap_or(UTC_FORMAT)
    }
}

/// Declared weight of a pattern.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Weight {
    Declared(f64),
    /// Present but not a finite, non-negative number.
    Invalid,
}

/// One alternative of a composite rule.
#[derive(Debug, Clone, PartialEq)]
pub enum Pattern {
    Parts {
        parts: Vec<Part>,
        weight: Option<Weight>,
    },
    /// Neither an array of parts nor `{ "pattern": [...] }`.
    Invalid,
}

impl Pattern {
    pub fn new(parts: Vec<Part>) -> Self {
        Pattern::Parts {
            parts,
            weight: None,
        }
    }

    pub fn weighted(parts: Vec<Part>, weight: f64) -> Self {
        Pattern::Parts {
            parts,
            weight: Some(Weight::Declared(weight)),
        }
    }

    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Array(parts) => Pattern::new(parts.iter().map(Part::from_json).collect()),
            Value::Object(object) => {
                let Some(Value::Array(parts)) = object.get("pattern") else {
                    return Pattern::Invalid;
                };
                let weight = object.get("weight").map(|weight| {
                    weight
                        .as_f64()
                        .filter(|weight| weight.is_finite() && *weight >= 0.0)
                        .map_or(Weight::Invalid, Weight::Declared)
                });
                Pattern::Parts {
                    parts: parts.iter().map(Part::from_json).collect(),
                    weight,
                }
            }
            _ => Pattern::Invalid,
        }
    }

    pub fn weight(&self) -> Option<Weight> {
        match self {
            Pattern::Parts { weight, .. } => *weight,
            Pattern::Invalid => None,
        }
    }
}

/// Weighted or uniform choice between patterns, concatenating the chosen parts.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeRule {
    /// `None` when `patterns` is absent, not an array, or empty.
    pub patterns: Option<Vec<Pattern>>,
}

impl CompositeRule {
    pub fn new(patterns: Vec<Pattern>) -> Self {
        Self {
            patterns: (!patterns.is_empty()).then_some(patterns),
        }
    }

    fn from_object(object: &Map<String, Value>) -> Self {
        let patterns = match object.get("patterns") {
            Some(Value::Array(patterns)) if !patterns.is_empty() => {
                Some(patterns.iter().map(Pattern::from_json).collect())
            }
            _ => None,
        };
        Self { patterns }
    }

    /// Whether any pattern declares a weight, switching selection to weighted mode.
    pub fn is_weighted(&self) -> bool {
        self.patterns
            .iter()
            .flatten()
            .any(|pattern| pattern.weight().is_some())
    }
}

/// Generation rule of a column (`autoGenerate`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "Value")]
pub enum Rule {
    Library { key: Option<String> },
    LoremIpsum(Bounds),
    Number(Bounds),
    Random(RandomSpec),
    Date(DateSpec),
    Composite(CompositeRule),
    Unsupported(Tag),
}

impl Rule {
    /// Classify an untyped rule. Never fails: anything unrecognized becomes
    /// [`Rule::Unsupported`] and is reported when a cell is resolved.
    pub fn from_json(value: &Value) -> Self {
        let Some(object) = value.as_object() else {
            return Rule::Unsupported(Tag::Missing);
        };
        match type_tag(object) {
            Ok("library") => Rule::Library {
                key: string_value(object),
            },
            Ok("loremIpsum") => Rule::LoremIpsum(Bounds::from_object(object)),
            Ok("number") => Rule::Number(Bounds::from_object(object)),
            Ok("random") => Rule::Random(RandomSpec::from_object(object)),
            Ok("date") => Rule::Date(DateSpec::from_object(object)),
            Ok("composite") => Rule::Composite(CompositeRule::from_object(object)),
            Ok(other) => Rule::Unsupported(Tag::Unknown(other.to_string())),
            Err(tag) => Rule::Unsupported(tag),
        }
    }
}

impl From<Value> for Rule {
    fn from(value: Value) -> Self {
        Rule::from_json(&value)
    }
}

/// One piece of a composite pattern.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "Value")]
pub enum Part {
    Library { key: Option<String> },
    Static(String),
    /// Back-reference to a column generated earlier in the same row.
    Field { column: Option<String> },
    List(Vec<Value>),
    Random(RandomSpec),
    Number(Bounds),
    Date(DateSpec),
    Unsupported(Tag),
}

impl Part {
    pub fn from_json(value: &Value) -> Self {
        let Some(object) = value.as_object() else {
            return Part::Unsupported(Tag::Missing);
        };
        match type_tag(object) {
            Ok("library") => Part::Library {
                key: string_value(object),
            },
            Ok("static") => Part::Static(match object.get("value") {
                Some(Value::String(text)) => text.clone(),
                Some(value) if is_truthy(value) => {
                    crate::value::CellValue::from_json(value).to_string()
                }
                _ => String::new(),
            }),
            Ok("field") => Part::Field {
                column: string_value(object),
            },
            Ok("list") => Part::List(match object.get("value") {
                Some(Value::Array(values)) => values.clone(),
                _ => Vec::new(),
            }),
            Ok("random") => Part::Random(RandomSpec::from_object(object)),
            Ok("number") => Part::Number(Bounds::from_object(object)),
            Ok("date") => Part::Date(DateSpec::from_object(object)),
            Ok(other) => Part::Unsupported(Tag::Unknown(other.to_string())),
            Err(tag) => Part::Unsupported(tag),
        }
    }
}

impl From<Value> for Part {
    fn from(value: Value) -> Self {
        Part::from_json(&value)
    }
}

fn type_tag(object: &Map<String, Value>) -> Result<&str, Tag> {
    match object.get("type") {
        Some(Value::String(tag)) if !tag.is_empty() => Ok(tag.as_str()),
        Some(value) if is_truthy(value) => Err(Tag::Unknown(value.to_string())),
        _ => Err(Tag::Missing),
    }
}

fn string_value(object: &Map<String, Value>) -> Option<String> {
    match object.get("value")? {
        Value::String(value) => Some(value.clone()),
        Value::Null => None,
        other => Some(other.to_string()),
    }
}

/// Integer from a JSON number, accepting integral floats such as `3.0`.
pub(crate) fn json_int(value: Option<&Value>) -> Option<i64> {
    let number = value?.as_number()?;
    if let Some(value) = number.as_i64() {
        return Some(value);
    }
    let value = number.as_f64()?;
    if value.fract() == 0.0 && value >= i64::MIN as f64 && value <= i64::MAX as f64 {
        Some(value as i64)
    } else {
        None
    }
}

/// JSON truthiness as understood by template authors: null, false, 0 and ""
/// count as "not provided".
pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(value) => *value,
        Value::Number(number) => number.as_f64().is_some_and(|value| value != 0.0),
        Value::String(value) => !value.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
