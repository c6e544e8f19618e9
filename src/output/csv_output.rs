//! CSV serialization of the result table

use crate::output::table::ResultTable;
use crate::ScrapeError;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// UTF-8 byte order mark, so spreadsheet tools pick the right encoding
pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Writes the table as CSV to any writer
///
/// The header row lists the columns in first-seen order, followed by one
/// record per table row. An empty table produces a header-only document.
pub fn write_table<W: Write>(
    table: &ResultTable,
    mut writer: W,
    bom: bool,
) -> Result<(), ScrapeError> {
    if bom {
        writer.write_all(UTF8_BOM)?;
    }

    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    if table.column_count() > 0 {
        csv_writer.write_record(table.headers())?;
    }
    for row in table.rows() {
        csv_writer.write_record(row)?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Writes the table to a CSV file, replacing any existing file
///
/// # Arguments
///
/// * `table` - The accumulated product table
/// * `path` - Destination file
/// * `bom` - Prefix the file with a UTF-8 byte order mark
pub fn write_csv(table: &ResultTable, path: &Path, bom: bool) -> Result<(), ScrapeError> {
    let file = File::create(path)?;
    write_table(table, BufWriter::new(file), bom)?;

    tracing::info!(
        "Wrote {} row(s) x {} column(s) to {}",
        table.len(),
        table.column_count(),
        path.display()
    );
    Ok(())
}
