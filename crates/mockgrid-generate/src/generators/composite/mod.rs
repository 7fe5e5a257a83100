use rand::seq::IndexedRandom;
use rand::{Rng, RngCore};

use mockgrid_core::{CellValue, CompositeRule, ErrorSink, Part, Pattern, TableError, Tag, Weight};

use crate::generators::ResolveContext;
use crate::generators::date::resolve_date;
use crate::generators::library::resolve_library;
use crate::generators::primitives::{self, BoundsError};

/// Resolve a composite rule: pick one pattern, then concatenate its parts left
/// to right.
///
/// Library and date parts record their own diagnostics and contribute an empty
/// string. Every other part failure discards the value built so far and yields
/// an empty string.
pub fn resolve_composite(
    rule: &CompositeRule,
    ctx: &ResolveContext<'_>,
    sink: &mut ErrorSink,
    rng: &mut dyn RngCore,
) -> String {
    let Some(patterns) = rule.patterns.as_deref() else {
        sink.record(TableError::PatternsMissing {
            column: ctx.column_name(),
        });
        return String::new();
    };

    let selected = if rule.is_weighted() {
        match weights(patterns) {
            Some(weights) => pick_weighted(&weights, rng.random::<f64>()),
            None => {
                sink.record(TableError::InvalidWeight {
                    column: ctx.column_name(),
                });
                return String::new();
            }
        }
    } else {
        rng.random_range(0..patterns.len())
    };

    let Pattern::Parts { parts, .. } = &patterns[selected] else {
        sink.record(TableError::InvalidPattern {
            column: ctx.column_name(),
        });
        return String::new();
    };

    let mut value = String::new();
    for part in parts {
        match resolve_part(part, ctx, sink, rng) {
            Ok(text) => value.push_str(&text),
            Err(err) => {
                sink.record(err);
                return String::new();
            }
        }
    }
    value
}

/// Weight of every pattern, missing weights counting as 1. `None` when any
/// declared weight is invalid.
fn weights(patterns: &[Pattern]) -> Option<Vec<f64>> {
    patterns
        .iter()
        .map(|pattern| match pattern.weight() {
            None => Some(1.0),
            Some(Weight::Declared(weight)) => Some(weight),
            Some(Weight::Invalid) => None,
        })
        .collect()
}

/// Index of the first pattern with a non-zero weight whose cumulative weight
/// reaches `unit * total`, where `unit` is a uniform draw in `[0, 1)`.
///
/// Falls back to the last pattern when nothing qualifies, which only happens
/// for a zero total or rounding at the upper edge.
pub fn pick_weighted(weights: &[f64], unit: f64) -> usize {
    let total: f64 = weights.iter().sum();
    let draw = unit * total;
    let mut cumulative = 0.0;
    for (idx, weight) in weights.iter().enumerate() {
        cumulative += weight;
        if draw <= cumulative && *weight > 0.0 {
            return idx;
        }
    }
    weights.len().saturating_sub(1)
}

fn resolve_part(
    part: &Part,
    ctx: &ResolveContext<'_>,
    sink: &mut ErrorSink,
    rng: &mut dyn RngCore,
) -> Result<String, TableError> {
    match part {
        Part::Library { key } => {
            Ok(resolve_library(key.as_deref().unwrap_or_default(), ctx, sink, rng).to_string())
        }
        Part::Static(text) => Ok(text.clone()),
        Part::Field { column } => {
            let field = column.as_deref().unwrap_or_default();
            let row = ctx.row.as_ref();
            let position = row
                .and_then(|row| row.layout.position(field))
                .ok_or_else(|| TableError::FieldNotFound {
                    field: field.to_string(),
                    column: ctx.column_name(),
                })?;
            row.and_then(|row| row.cells.get(position))
                .map(ToString::to_string)
                .ok_or_else(|| TableError::FieldNotYetGenerated {
                    field: field.to_string(),
                    column: ctx.column_name(),
                })
        }
        Part::List(values) => values
            .choose(rng)
            .map(|value| CellValue::from_json(value).to_string())
            .ok_or_else(|| TableError::ListPartEmpty {
                column: ctx.column_name(),
            }),
        Part::Random(spec) => {
            primitives::random_string(spec, rng).ok_or_else(|| TableError::RandomPartMissing {
                column: ctx.column_name(),
            })
        }
        Part::Number(bounds) => match primitives::checked_bounds(bounds) {
            Ok((min, max)) => Ok(primitives::sample_number(min, max, rng).to_string()),
            Err(BoundsError::Missing) => Err(TableError::NumberPartMissing {
                column: ctx.column_name(),
            }),
            Err(BoundsError::Inverted) => Err(TableError::InvertedPartBounds {
                column: ctx.column_name(),
            }),
        },
        Part::Date(spec) => Ok(resolve_date(spec, ctx.column, sink, rng)),
        Part::Unsupported(Tag::Missing) => Err(TableError::MissingPartType {
            column: ctx.column_name(),
        }),
        Part::Unsupported(Tag::Unknown(kind)) => Err(TableError::UnsupportedPartType {
            kind: kind.clone(),
            column: ctx.column_name(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ties_go_to_the_earlier_pattern() {
        assert_eq!(pick_weighted(&[1.0, 1.0], 0.5), 0);
        assert_eq!(pick_weighted(&[1.0, 1.0], 0.500_001), 1);
    }

    #[test]
    fn draw_maps_onto_cumulative_weights() {
        let weights = [1.0, 3.0, 6.0];
        assert_eq!(pick_weighted(&weights, 0.0), 0);
        assert_eq!(pick_weighted(&weights, 0.05), 0);
        assert_eq!(pick_weighted(&weights, 0.2), 1);
        assert_eq!(pick_weighted(&weights, 0.39), 1);
        assert_eq!(pick_weighted(&weights, 0.99), 2);
    }

    #[test]
    fn zero_weights_are_never_selected_when_others_exist() {
        assert_eq!(pick_weighted(&[0.0, 2.0], 0.0), 1);
        assert_eq!(pick_weighted(&[2.0, 0.0], 0.999), 0);
    }

    #[test]
    fn zero_total_falls_back_to_last_pattern() {
        assert_eq!(pick_weighted(&[0.0, 0.0, 0.0], 0.3), 2);
    }
}
