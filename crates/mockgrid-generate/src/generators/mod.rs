//! Rule resolvers.
//!
//! Every resolver returns a value and records failures in the shared
//! [`ErrorSink`]; none of them fails the run on its own.

pub mod composite;
pub mod date;
pub mod library;
pub mod primitives;

use rand::RngCore;

use mockgrid_core::{CellValue, ColumnLayout, ErrorSink, Library, Rule, TableError, Tag};

use crate::generators::primitives::BoundsError;
use crate::model::DEFAULT_MAX_LIBRARY_DEPTH;

/// Immutable view of the row being built: the cells produced so far and the
/// column order they follow.
#[derive(Debug, Clone, Copy)]
pub struct RowView<'a> {
    pub cells: &'a [CellValue],
    pub layout: &'a ColumnLayout,
}

impl<'a> RowView<'a> {
    pub fn new(cells: &'a [CellValue], layout: &'a ColumnLayout) -> Self {
        Self { cells, layout }
    }
}

/// Everything a resolver needs besides the sink and the RNG.
#[derive(Debug, Clone, Copy)]
pub struct ResolveContext<'a> {
    pub library: &'a Library,
    /// Column the value is generated for; named in every diagnostic.
    pub column: &'a str,
    /// Absent while resolving library composites, which have no row of their own.
    pub row: Option<RowView<'a>>,
    pub max_depth: usize,
    depth: usize,
}

impl<'a> ResolveContext<'a> {
    pub fn new(library: &'a Library, column: &'a str) -> Self {
        Self {
            library,
            column,
            row: None,
            max_depth: DEFAULT_MAX_LIBRARY_DEPTH,
            depth: 0,
        }
    }

    pub fn with_row(mut self, row: RowView<'a>) -> Self {
        self.row = Some(row);
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Context for a library composite: one level deeper, no row.
    pub(crate) fn nested(&self) -> Self {
        Self {
            row: None,
            depth: self.depth + 1,
            ..*self
        }
    }

    pub(crate) fn column_name(&self) -> String {
        self.column.to_string()
    }
}

/// Resolve one column rule into one cell.
pub fn resolve_rule(
    rule: &Rule,
    ctx: &ResolveContext<'_>,
    sink: &mut ErrorSink,
    rng: &mut dyn RngCore,
) -> CellValue {
    match rule {
        Rule::Library { key } => {
            library::resolve_library(key.as_deref().unwrap_or_default(), ctx, sink, rng)
        }
        Rule::LoremIpsum(bounds) => match primitives::checked_bounds(bounds) {
            Ok((min, max)) => {
                let words = primitives::sample_number(min, max, rng);
                CellValue::Text(primitives::lorem_ipsum(words, rng))
            }
            Err(BoundsError::Missing) => fail(
                sink,
                TableError::LoremBoundsMissing {
                    column: ctx.column_name(),
                },
            ),
            Err(BoundsError::Inverted) => fail(
                sink,
                TableError::InvertedBounds {
                    column: ctx.column_name(),
                },
            ),
        },
        Rule::Number(bounds) => match primitives::checked_bounds(bounds) {
            Ok((min, max)) => CellValue::Int(primitives::sample_number(min, max, rng)),
            Err(BoundsError::Missing) => fail(
                sink,
                TableError::NumberBoundsMissing {
                    column: ctx.column_name(),
                },
            ),
            Err(BoundsError::Inverted) => fail(
                sink,
                TableError::InvertedBounds {
                    column: ctx.column_name(),
                },
            ),
        },
        Rule::Random(spec) => match primitives::random_string(spec, rng) {
            Some(value) => CellValue::Text(value),
            None => fail(
                sink,
                TableError::RandomSpecMissing {
                    column: ctx.column_name(),
                },
            ),
        },
        Rule::Date(spec) => CellValue::Text(date::resolve_date(spec, ctx.column, sink, rng)),
        Rule::Composite(rule) => {
            CellValue::Text(composite::resolve_composite(rule, ctx, sink, rng))
        }
        Rule::Unsupported(Tag::Missing) => fail(
            sink,
            TableError::MissingType {
                column: ctx.column_name(),
            },
        ),
        Rule::Unsupported(Tag::Unknown(kind)) => fail(
            sink,
            TableError::UnsupportedType {
                kind: kind.clone(),
                column: ctx.column_name(),
            },
        ),
    }
}

fn fail(sink: &mut ErrorSink, error: TableError) -> CellValue {
    sink.record(error);
    CellValue::empty()
}
