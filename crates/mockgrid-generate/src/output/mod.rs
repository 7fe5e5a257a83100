//! Table sinks: console grid, JSON and CSV files.

pub mod console;
pub mod csv;
pub mod json;

pub use console::render_console;
pub use csv::{write_csv, write_table_csv};
pub use json::write_table_json;
