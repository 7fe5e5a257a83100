use thiserror::Error;

/// Diagnostic recorded while turning a template into a table.
///
/// Structural variants are detected before any row is generated; every other
/// variant is a per-cell rule failure. None of them abort a run on their own:
/// they are collected in an [`ErrorSink`] and the whole run degrades to an
/// error table once generation completes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    #[error("Invalid or missing template.")]
    InvalidTemplate,
    #[error("Invalid template structure in provided template.")]
    InvalidStructure,
    #[error("Invalid template settings: {0}")]
    InvalidSettings(String),

    #[error("Missing 'type' in autoGenerate for column '{column}'.")]
    MissingType { column: String },
    #[error("Unsupported autoGenerate type '{kind}' for column '{column}'.")]
    UnsupportedType { kind: String, column: String },

    #[error("Library key '{key}' not found for column '{column}'.")]
    LibraryKeyNotFound { key: String, column: String },
    #[error("Library key '{key}' is empty or not an array for column '{column}'.")]
    LibraryEntryUnusable { key: String, column: String },
    #[error(
        "Library key '{key}' exceeds the maximum nesting depth of {depth} for column '{column}'."
    )]
    LibraryTooDeep {
        key: String,
        depth: usize,
        column: String,
    },

    #[error("'loremIpsum' type requires 'min' and 'max' values in column '{column}'.")]
    LoremBoundsMissing { column: String },
    #[error("Invalid or missing 'min'/'max' in autoGenerate for column '{column}'.")]
    NumberBoundsMissing { column: String },
    #[error("'min' cannot be greater than 'max' in autoGenerate for column '{column}'.")]
    InvertedBounds { column: String },
    #[error("'random' type requires 'length' and 'characters' in column '{column}'.")]
    RandomSpecMissing { column: String },

    #[error("'patterns' must be a non-empty array in autoGenerate for column '{column}'.")]
    PatternsMissing { column: String },
    #[error("Invalid pattern in autoGenerate for column '{column}'.")]
    InvalidPattern { column: String },
    #[error("Invalid 'weight' in pattern for column '{column}'.")]
    InvalidWeight { column: String },
    #[error("Missing 'type' in pattern part for column '{column}'.")]
    MissingPartType { column: String },
    #[error("Unsupported part type '{kind}' in column '{column}'.")]
    UnsupportedPartType { kind: String, column: String },
    #[error("Referenced field '{field}' not found for column '{column}'.")]
    FieldNotFound { field: String, column: String },
    #[error("Referenced field '{field}' has not been generated yet for column '{column}'.")]
    FieldNotYetGenerated { field: String, column: String },
    #[error("'list' part must have a non-empty 'value' array in column '{column}'.")]
    ListPartEmpty { column: String },
    #[error("'random' part must have 'length' and 'characters' properties in column '{column}'.")]
    RandomPartMissing { column: String },
    #[error("'number' part must have 'min' and 'max' properties in column '{column}'.")]
    NumberPartMissing { column: String },
    #[error("'min' cannot be greater than 'max' in number part for column '{column}'.")]
    InvertedPartBounds { column: String },

    #[error("'start' parameter in date type for column '{column}' is not a valid date.")]
    InvalidStartDate { column: String },
    #[error("'end' parameter in date type for column '{column}' is not a valid date.")]
    InvalidEndDate { column: String },
    #[error("'start' date is after 'end' date for column '{column}'.")]
    StartAfterEnd { column: String },
}

impl TableError {
    /// Returns true for errors detected before row generation starts.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            TableError::InvalidTemplate
                | TableError::InvalidStructure
                | TableError::InvalidSettings(_)
        )
    }
}

/// Ordered, append-only collection of diagnostics for one generation run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ErrorSink {
    errors: Vec<TableError>,
}

impl ErrorSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a diagnostic. Never fails.
    pub fn record(&mut self, error: TableError) {
        tracing::debug!(error = %error, "diagnostic recorded");
        self.errors.push(error);
    }

    /// Fold another sink into this one, keeping recording order.
    pub fn absorb(&mut self, other: ErrorSink) {
        self.errors.extend(other.errors);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Human-readable messages in the order they were recorded.
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }
}
