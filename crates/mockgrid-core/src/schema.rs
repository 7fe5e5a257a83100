//! JSON Schema documentation of the template contract.
//!
//! Rules, parts and fields are parsed leniently from raw JSON, so their schemas
//! are described by the shapes below rather than derived from the parsed types.

#![allow(dead_code)]

use schemars::JsonSchema;
use schemars::r#gen::SchemaGenerator;
use schemars::schema::Schema;
use serde_json::Value;

use crate::rule::{Part, Rule};
use crate::template::Field;

/// Column rule, discriminated by `type`.
#[derive(JsonSchema)]
#[schemars(tag = "type", rename_all = "camelCase")]
enum RuleShape {
    /// Uniform pick from a library pool, or a library composite.
    Library { value: String },
    /// Lorem-ipsum text with an inclusive word-count range.
    LoremIpsum { min: i64, max: i64 },
    /// Integer in an inclusive range.
    Number { min: i64, max: i64 },
    /// `length` characters drawn from `characters`.
    Random { length: u64, characters: String },
    /// Instant in `[start, end]`; `format` is `UTC` or a token string such as `YYYY-MM-DD`.
    Date {
        start: Option<String>,
        end: Option<String>,
        format: Option<String>,
    },
    /// One of several patterns, concatenated part by part.
    Composite { patterns: Vec<PatternShape> },
}

#[derive(JsonSchema)]
#[schemars(untagged)]
enum PatternShape {
    Parts(Vec<Part>),
    Weighted {
        pattern: Vec<Part>,
        /// Relative weight; patterns without one weigh 1.
        weight: Option<f64>,
    },
}

/// Composite pattern part, discriminated by `type`.
#[derive(JsonSchema)]
#[schemars(tag = "type", rename_all = "camelCase")]
enum PartShape {
    Library { value: String },
    Static { value: String },
    /// Copy of a cell generated earlier in the same row.
    Field { value: String },
    List { value: Vec<Value> },
    Random { length: u64, characters: String },
    Number { min: i64, max: i64 },
    Date {
        start: Option<String>,
        end: Option<String>,
        format: Option<String>,
    },
}

#[derive(JsonSchema)]
struct FieldShape {
    #[schemars(rename = "autoGenerate")]
    auto_generate: Option<Rule>,
    list: Option<Vec<Value>>,
}

impl JsonSchema for Rule {
    fn schema_name() -> String {
        "Rule".to_string()
    }

    fn json_schema(generator: &mut SchemaGenerator) -> Schema {
        RuleShape::json_schema(generator)
    }
}

impl JsonSchema for Part {
    fn schema_name() -> String {
        "Part".to_string()
    }

    fn json_schema(generator: &mut SchemaGenerator) -> Schema {
        PartShape::json_schema(generator)
    }
}

impl JsonSchema for Field {
    fn schema_name() -> String {
        "Field".to_string()
    }

    fn json_schema(generator: &mut SchemaGenerator) -> Schema {
        FieldShape::json_schema(generator)
    }
}
