use encoding_rs::UTF_8;
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::error::{ProcessingError, Result};
use crate::models::RecordTable;
use crate::utils::constants::UTF8_BOM;

/// Text encodings tried when loading an input table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    /// Strict UTF-8 without a byte-order mark.
    Utf8,
    /// UTF-8 with an optional leading byte-order mark.
    Utf8Bom,
    /// ISO-8859-1; every byte sequence decodes.
    Latin1,
}

impl TextEncoding {
    /// Order in which encodings are attempted.
    pub const FALLBACK_ORDER: [TextEncoding; 3] =
        [TextEncoding::Utf8, TextEncoding::Utf8Bom, TextEncoding::Latin1];

    pub fn name(self) -> &'static str {
        match self {
            TextEncoding::Utf8 => "utf-8",
            TextEncoding::Utf8Bom => "utf-8-sig",
            TextEncoding::Latin1 => "latin-1",
        }
    }

    pub fn decode(self, bytes: &[u8]) -> Result<String> {
        match self {
            TextEncoding::Utf8 => {
                if bytes.starts_with(UTF8_BOM) {
                    return Err(self.error("unexpected byte-order mark"));
                }
                decode_utf8_strict(bytes).ok_or_else(|| self.error("invalid byte sequence"))
            }
            TextEncoding::Utf8Bom => {
                let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
                decode_utf8_strict(body).ok_or_else(|| self.error("invalid byte sequence"))
            }
            TextEncoding::Latin1 => Ok(encoding_rs::mem::decode_latin1(bytes).into_owned()),
        }
    }

    fn error(self, message: &str) -> ProcessingError {
        ProcessingError::Decode {
            encoding: self.name(),
            message: message.to_string(),
        }
    }
}

impl std::fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

fn decode_utf8_strict(bytes: &[u8]) -> Option<String> {
    UTF_8
        .decode_without_bom_handling_and_without_replacement(bytes)
        .map(|text| text.into_owned())
}

/// Loads delimited text tables, falling back through [`TextEncoding::FALLBACK_ORDER`].
pub struct TableReader {
    delimiter: u8,
}

impl TableReader {
    pub fn new() -> Self {
        Self { delimiter: b',' }
    }

    pub fn with_delimiter(delimiter: u8) -> Self {
        Self { delimiter }
    }

    /// Read a table, returning it with the encoding that succeeded.
    ///
    /// When every encoding fails the error of the last attempt is returned.
    pub fn read_table(&self, path: &Path) -> Result<(RecordTable, TextEncoding)> {
        if !path.exists() {
            return Err(ProcessingError::InputNotFound(path.to_path_buf()));
        }

        let bytes = fs::read(path)?;
        self.read_bytes(&bytes)
    }

    pub fn read_bytes(&self, bytes: &[u8]) -> Result<(RecordTable, TextEncoding)> {
        let mut last_error = None;

        for encoding in TextEncoding::FALLBACK_ORDER {
            match encoding
                .decode(bytes)
                .and_then(|text| self.parse_table(&text))
            {
                Ok(table) => {
                    debug!(
                        "Loaded {} rows, {} columns as {}",
                        table.len(),
                        table.headers().len(),
                        encoding
                    );
                    return Ok((table, encoding));
                }
                Err(e) => {
                    debug!("Reading as {} failed: {}", encoding, e);
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            ProcessingError::InvalidFormat("No encodings to try".to_string())
        }))
    }

    /// Parse decoded text: first record is the header row.
    pub fn parse_table(&self, text: &str) -> Result<RecordTable> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .flexible(true)
            .from_reader(text.as_bytes());

        let headers: Vec<String> = reader.headers()?.iter().map(String::from).collect();
        if headers.is_empty() || headers.iter().all(|h| h.is_empty()) {
            return Err(ProcessingError::InvalidFormat(
                "No columns to parse from file".to_string(),
            ));
        }

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(record.iter().map(String::from).collect());
        }

        RecordTable::new(headers, rows)
    }
}

impl Default for TableReader {
    fn default() -> Self {
        Self::new()
    }
}
