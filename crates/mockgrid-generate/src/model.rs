use serde::{Deserialize, Serialize};

/// Maximum depth of library composites resolving other library composites.
pub const DEFAULT_MAX_LIBRARY_DEPTH: usize = 16;

/// Options for the table generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateOptions {
    /// Seed for reproducible tables. Each call reseeds, so equal seeds give
    /// equal tables. When unset every call draws fresh randomness.
    pub seed: Option<u64>,
    /// Nesting limit for library entries that reference other library entries.
    pub max_library_depth: usize,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            seed: None,
            max_library_depth: DEFAULT_MAX_LIBRARY_DEPTH,
        }
    }
}

/// Summary of one `generate` call, logged when it completes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationSummary {
    pub run_id: String,
    pub rows_requested: u64,
    pub columns: usize,
    pub errors: usize,
    pub duration_ms: u64,
}
