use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use mockgrid_core::{CellValue, Table};

use crate::errors::GenerationError;

/// Write a table as CSV to `path`, returning the number of bytes written.
///
/// No header is synthesized: a header row, when the table carries one, is
/// written as the first record like any other row.
pub fn write_table_csv(path: &Path, table: &Table) -> Result<u64, GenerationError> {
    let writer = BufWriter::new(File::create(path)?);
    write_csv(writer, table)
}

/// Write a table as CSV to any writer, returning the number of bytes written.
///
/// The whole table is encoded before anything reaches `out`, so a failed
/// record leaves `out` untouched.
pub fn write_csv<W: Write>(mut out: W, table: &Table) -> Result<u64, GenerationError> {
    let mut encoder = csv::WriterBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_writer(Vec::new());

    for row in table.rows() {
        encoder.write_record(row.iter().map(csv_field))?;
    }

    let encoded = encoder.into_inner().map_err(|err| err.into_error())?;
    out.write_all(&encoded)?;
    out.flush()?;
    Ok(encoded.len() as u64)
}

fn csv_field(value: &CellValue) -> String {
    match value {
        CellValue::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quotes_fields_and_blanks_nulls() {
        let table = Table::data(
            vec![
                vec![CellValue::from("name"), CellValue::from("note")],
                vec![CellValue::from("Doe, Jane"), CellValue::Null],
            ],
            true,
        );
        let mut out = Vec::new();
        let bytes = write_csv(&mut out, &table).expect("write csv");
        let text = String::from_utf8(out).expect("utf8");
        assert_eq!(text, "name,note\n\"Doe, Jane\",\n");
        assert_eq!(bytes, text.len() as u64);
    }
}
