use rand::RngCore;
use rand::seq::IndexedRandom;

use mockgrid_core::{CellValue, ErrorSink, LibraryEntry, TableError};

use crate::generators::ResolveContext;
use crate::generators::composite::resolve_composite;

/// Resolve a library key: a uniform pick from a pool, or the value of a
/// library composite resolved without row context.
pub fn resolve_library(
    key: &str,
    ctx: &ResolveContext<'_>,
    sink: &mut ErrorSink,
    rng: &mut dyn RngCore,
) -> CellValue {
    match ctx.library.lookup(key) {
        None => {
            sink.record(TableError::LibraryKeyNotFound {
                key: key.to_string(),
                column: ctx.column_name(),
            });
            CellValue::empty()
        }
        Some(LibraryEntry::Unusable) => {
            sink.record(TableError::LibraryEntryUnusable {
                key: key.to_string(),
                column: ctx.column_name(),
            });
            CellValue::empty()
        }
        Some(LibraryEntry::Pool(values)) => values.choose(rng).cloned().unwrap_or_default(),
        Some(LibraryEntry::Composite(rule)) => {
            if ctx.depth() >= ctx.max_depth {
                sink.record(TableError::LibraryTooDeep {
                    key: key.to_string(),
                    depth: ctx.max_depth,
                    column: ctx.column_name(),
                });
                return CellValue::empty();
            }
            let mut scope = ErrorSink::new();
            let value = resolve_composite(rule, &ctx.nested(), &mut scope, rng);
            sink.absorb(scope);
            CellValue::Text(value)
        }
    }
}
