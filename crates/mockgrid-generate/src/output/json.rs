use std::io::Write;

use mockgrid_core::Table;

use crate::errors::GenerationError;

/// Write a table as a JSON array with one row per line.
pub fn write_table_json<W: Write>(mut writer: W, table: &Table) -> Result<(), GenerationError> {
    if table.is_empty() {
        writer.write_all(b"[]\n")?;
        return Ok(writer.flush()?);
    }

    writer.write_all(b"[\n")?;
    let last = table.len() - 1;
    for (idx, row) in table.rows().iter().enumerate() {
        writer.write_all(b"  ")?;
        serde_json::to_writer(&mut writer, row)?;
        if idx < last {
            writer.write_all(b",")?;
        }
        writer.write_all(b"\n")?;
    }
    writer.write_all(b"]\n")?;
    Ok(writer.flush()?)
}

#[cfg(test)]
mod tests {
    use mockgrid_core::CellValue;

    use super::*;

    #[test]
    fn writes_one_row_per_line() {
        let table = Table::data(
            vec![
                vec![CellValue::from("id"), CellValue::from("name")],
                vec![CellValue::Int(1), CellValue::from("Ada")],
            ],
            true,
        );
        let mut out = Vec::new();
        write_table_json(&mut out, &table).expect("write json");
        assert_eq!(
            String::from_utf8(out).expect("utf8"),
            "[\n  [\"id\",\"name\"],\n  [1,\"Ada\"]\n]\n"
        );
    }

    #[test]
    fn empty_table_is_an_empty_array() {
        let mut out = Vec::new();
        write_table_json(&mut out, &Table::data(Vec::new(), false)).expect("write json");
        assert_eq!(out, b"[]\n");
    }
}
