// In crates/artifacts/src/table.rs

use csv::{ReaderBuilder, StringRecord, Trim};

/// Reads every data row of a CSV artifact. The first line is the header and is discarded.
///
/// Each source line yields exactly one record. Quotes carry no meaning, and a
/// blank or undecodable line comes back as an empty record.
pub(crate) fn data_rows(text: &str) -> Vec<StringRecord> {
    text.lines().skip(1).map(line_record).collect()
}

fn line_record(line: &str) -> StringRecord {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .trim(Trim::All)
        .from_reader(line.as_bytes());

    reader
        .records()
        .next()
        .and_then(|record| record.ok())
        .unwrap_or_default()
}

/// Reads a two-column `<label>, <value>` table.
pub(crate) fn label_values(text: &str) -> Vec<(String, String)> {
    data_rows(text)
        .iter()
        .map(|row| {
            (
                row.get(0).unwrap_or_default().to_string(),
                row.get(1).unwrap_or_default().to_string(),
            )
        })
        .collect()
}
