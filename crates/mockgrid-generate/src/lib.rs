//! Template-driven table generation for mockgrid.
//!
//! [`TableGenerator`] turns a template of column rules into a table of
//! synthetic rows, drawing names and other pools from a [`Library`]. Any
//! diagnostic recorded along the way replaces the data with an error table.
//!
//! [`Library`]: mockgrid_core::Library

pub mod assets;
pub mod engine;
pub mod errors;
pub mod generators;
pub mod model;
pub mod output;

pub use assets::{default_library, load_library_file};
pub use engine::{TableGenerator, assemble};
pub use errors::GenerationError;
pub use model::{DEFAULT_MAX_LIBRARY_DEPTH, GenerateOptions, GenerationSummary};
pub use output::{render_console, write_csv, write_table_csv, write_table_json};
