//! Core contracts for mockgrid.
//!
//! This crate defines the template, rule and library types consumed by the
//! generator, the table shape it produces, and the diagnostics it records.

pub mod error;
pub mod library;
pub mod rule;
pub mod schema;
pub mod template;
pub mod value;

pub use error::{ErrorSink, TableError};
pub use library::{Library, LibraryEntry};
pub use rule::{Bounds, CompositeRule, DateSpec, Part, Pattern, RandomSpec, Rule, Tag, Weight};
pub use template::{ColumnLayout, Field, IndexSettings, Settings, Template};
pub use value::{CellValue, Row, Table, TableKind};
