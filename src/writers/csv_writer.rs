use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::Result;
use crate::models::RecordTable;
use crate::utils::constants::UTF8_BOM;

/// Writes tables as UTF-8 CSV with a leading byte-order mark.
pub struct CsvWriter;

impl CsvWriter {
    pub fn new() -> Self {
        Self
    }

    /// Write the table to `path`, replacing any existing file.
    pub fn write_table(&self, table: &RecordTable, path: &Path) -> Result<()> {
        let file = File::create(path)?;
        let mut out = BufWriter::new(file);
        self.write_to(table, &mut out)?;
        out.flush()?;
        Ok(())
    }

    /// Encode the table into memory exactly as [`CsvWriter::write_table`] would.
    pub fn to_bytes(&self, table: &RecordTable) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        self.write_to(table, &mut buffer)?;
        Ok(buffer)
    }

    fn write_to<W: Write>(&self, table: &RecordTable, out: &mut W) -> Result<()> {
        out.write_all(UTF8_BOM)?;

        let mut writer = csv::Writer::from_writer(out);

        writer.write_record(table.headers())?;
        for row in table.rows() {
            writer.write_record(row)?;
        }
        writer.flush()?;

        Ok(())
    }
}

impl Default for CsvWriter {
    fn default() -> Self {
        Self::new()
    }
}
