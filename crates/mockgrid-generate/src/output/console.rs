use std::fmt::Write;

use mockgrid_core::{CellValue, Table};

const ROW_NUMBER_HEADING: &str = "#";

/// Render a table as an aligned text grid for terminal display.
///
/// The first column numbers the body rows from 0. A header row, when present,
/// labels the columns; otherwise they are labelled by position.
pub fn render_console(table: &Table) -> String {
    let body = table.body();
    let width = table.rows().iter().map(Vec::len).max().unwrap_or(0);

    let headings: Vec<String> = match table.header() {
        Some(header) => (0..width)
            .map(|idx| header.get(idx).map(cell_text).unwrap_or_default())
            .collect(),
        None => (0..width).map(|idx| idx.to_string()).collect(),
    };

    let mut grid: Vec<Vec<String>> = Vec::with_capacity(body.len() + 1);
    grid.push(
        std::iter::once(ROW_NUMBER_HEADING.to_string())
            .chain(headings)
            .collect(),
    );
    for (number, row) in body.iter().enumerate() {
        grid.push(
            std::iter::once(number.to_string())
                .chain((0..width).map(|idx| row.get(idx).map(cell_text).unwrap_or_default()))
                .collect(),
        );
    }

    let widths: Vec<usize> = (0..=width)
        .map(|col| {
            grid.iter()
                .map(|line| line[col].chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect();

    let separator = widths
        .iter()
        .map(|width| "-".repeat(width + 2))
        .collect::<Vec<_>>()
        .join("+");

    let mut out = String::new();
    for (line_no, line) in grid.iter().enumerate() {
        let cells: Vec<String> = line
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!(" {cell:<width$} "))
            .collect();
        let _ = writeln!(out, "{}", cells.join("|").trim_end());
        if line_no == 0 {
            let _ = writeln!(out, "{separator}");
        }
    }
    out
}

fn cell_text(value: &CellValue) -> String {
    value.to_string()
}
