use std::time::Instant;

use rand::seq::IndexedRandom;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde_json::Value;
use tracing::{info, warn};

use mockgrid_core::{
    CellValue, ErrorSink, Field, IndexSettings, Library, Row, Table, TableError, Template,
};

use crate::assets::default_library;
use crate::errors::GenerationError;
use crate::generators::{ResolveContext, RowView, resolve_rule};
use crate::model::{GenerateOptions, GenerationSummary};

/// Builds tables from templates against a library of named pools.
///
/// The library is only changed through [`TableGenerator::extend_library`];
/// overrides passed to a single call apply to that call alone.
#[derive(Debug, Clone, Default)]
pub struct TableGenerator {
    library: Library,
    options: GenerateOptions,
}

impl TableGenerator {
    pub fn new(library: Library) -> Self {
        Self {
            library,
            options: GenerateOptions::default(),
        }
    }

    /// Generator backed by a copy of the built-in library.
    pub fn with_default_library() -> Result<Self, GenerationError> {
        Ok(Self::new(default_library()?.clone()))
    }

    pub fn with_options(mut self, options: GenerateOptions) -> Self {
        self.options = options;
        self
    }

    pub fn library(&self) -> &Library {
        &self.library
    }

    pub fn options(&self) -> &GenerateOptions {
        &self.options
    }

    /// Merge entries into this generator's library for all later calls.
    pub fn extend_library(&mut self, entries: Library) {
        self.library.merge(entries);
    }

    /// Generate a table from untyped template JSON.
    ///
    /// Never fails: structural problems and rule diagnostics both come back as
    /// the error table. Structural checks run before overrides are looked at.
    pub fn generate(&self, template: &Value, overrides: Option<&Value>) -> Table {
        let template = match Template::from_json(template) {
            Ok(template) => template,
            Err(err) => return self.reject(err),
        };
        let overrides = overrides.map(Library::from_json);
        self.generate_template(&template, overrides.as_ref())
    }

    /// Generate a table from an already parsed template.
    pub fn generate_template(&self, template: &Template, overrides: Option<&Library>) -> Table {
        let started = Instant::now();
        let run_id = uuid::Uuid::new_v4().to_string();

        let merged;
        let library = match overrides {
            Some(overrides) if !overrides.is_empty() => {
                let mut library = self.library.clone();
                library.merge(overrides.clone());
                merged = library;
                &merged
            }
            _ => &self.library,
        };

        info!(
            run_id = %run_id,
            rows = template.settings.rows,
            columns = template.columns.len(),
            overrides = overrides.map_or(0, Library::len),
            seed = self.options.seed,
            "generation started"
        );

        let mut rng = self.rng();
        let mut sink = ErrorSink::new();
        let table = assemble(template, library, &self.options, &mut sink, &mut rng);

        let summary = GenerationSummary {
            run_id,
            rows_requested: template.settings.rows,
            columns: template.layout().len(),
            errors: sink.len(),
            duration_ms: started.elapsed().as_millis() as u64,
        };

        if sink.is_empty() {
            info!(
                run_id = %summary.run_id,
                rows = summary.rows_requested,
                columns = summary.columns,
                duration_ms = summary.duration_ms,
                "generation finished"
            );
            table
        } else {
            warn!(
                run_id = %summary.run_id,
                errors = summary.errors,
                duration_ms = summary.duration_ms,
                "generation produced diagnostics, returning error table"
            );
            Table::from_errors(&sink)
        }
    }

    fn reject(&self, err: TableError) -> Table {
        warn!(error = %err, "template rejected");
        let mut sink = ErrorSink::new();
        sink.record(err);
        Table::from_errors(&sink)
    }

    fn rng(&self) -> ChaCha8Rng {
        match self.options.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_rng(&mut rand::rng()),
        }
    }
}

/// Build every row of `template`, recording diagnostics in `sink`.
///
/// The returned table is only meaningful when `sink` stays empty.
pub fn assemble(
    template: &Template,
    library: &Library,
    options: &GenerateOptions,
    sink: &mut ErrorSink,
    rng: &mut dyn RngCore,
) -> Table {
    let layout = template.layout();
    let index = template
        .settings
        .index
        .as_ref()
        .filter(|index| index.column_name().is_some())
        .map(IndexSettings::start);
    let include_headers = template.settings.include_headers;

    let mut rows: Vec<Row> = Vec::new();
    if include_headers {
        rows.push(
            layout
                .names()
                .iter()
                .map(|name| CellValue::from(name.as_str()))
                .collect(),
        );
    }

    for i in 0..template.settings.rows {
        let mut row: Row = Vec::with_capacity(layout.len());
        if let Some(start) = index {
            row.push(CellValue::Int(start.saturating_add(i as i64)));
        }
        for (column, field) in &template.columns {
            let cell = match field {
                Field::Generated(rule) => {
                    let ctx = ResolveContext::new(library, column)
                        .with_row(RowView::new(&row, &layout))
                        .with_max_depth(options.max_library_depth);
                    resolve_rule(rule, &ctx, sink, rng)
                }
                Field::List(values) => values.choose(rng).cloned().unwrap_or_default(),
                Field::Empty => CellValue::empty(),
            };
            row.push(cell);
        }
        rows.push(row);
    }

    Table::data(rows, include_headers)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn list_fields_pick_from_their_values() {
        let generator = TableGenerator::new(Library::new());
        let table = generator.generate(
            &json!({
                "settings": { "rows": 20 },
                "columns": { "tier": { "list": ["gold", "silver", 3] } }
            }),
            None,
        );
        assert!(!table.is_error());
        for row in table.rows() {
            assert!(
                [
                    CellValue::from("gold"),
                    CellValue::from("silver"),
                    CellValue::Int(3)
                ]
                .contains(&row[0])
            );
        }
    }

    #[test]
    fn empty_fields_yield_empty_text() {
        let generator = TableGenerator::new(Library::new());
        let table = generator.generate(
            &json!({
                "settings": { "rows": 2 },
                "columns": { "notes": {}, "other": { "list": [] } }
            }),
            None,
        );
        assert_eq!(
            table.rows(),
            &[
                vec![CellValue::empty(), CellValue::empty()],
                vec![CellValue::empty(), CellValue::empty()]
            ]
        );
    }
}
