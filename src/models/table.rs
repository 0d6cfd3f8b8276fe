use crate::error::{ProcessingError, Result};

/// In-memory CSV table: ordered headers and rows of string cells.
///
/// Every row has exactly one cell per header. Short rows are padded with
/// empty cells on construction; rows longer than the header are rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl RecordTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self> {
        let width = headers.len();
        let mut normalized = Vec::with_capacity(rows.len());

        for (index, mut row) in rows.into_iter().enumerate() {
            if row.len() > width {
                return Err(ProcessingError::InvalidFormat(format!(
                    "Row {} has {} fields, header has {}",
                    index + 1,
                    row.len(),
                    width
                )));
            }
            row.resize(width, String::new());
            normalized.push(row);
        }

        Ok(Self {
            headers,
            rows: normalized,
        })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Append an empty column unless one with this exact name exists.
    /// Returns the column index either way.
    pub fn ensure_column(&mut self, name: &str) -> usize {
        if let Some(index) = self.column_index(name) {
            return index;
        }

        self.headers.push(name.to_string());
        for row in &mut self.rows {
            row.push(String::new());
        }
        self.headers.len() - 1
    }

    pub fn ensure_columns<'a, I>(&mut self, names: I)
    where
        I: IntoIterator<Item = &'a str>,
    {
        for name in names {
            self.ensure_column(name);
        }
    }

    pub fn value(&self, row: usize, column: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Value of a named column, empty if the column does not exist.
    pub fn value_by_name(&self, row: usize, name: &str) -> &str {
        match self.column_index(name) {
            Some(column) => self.value(row, column),
            None => "",
        }
    }

    pub fn set_value(&mut self, row: usize, column: usize, value: impl Into<String>) {
        if let Some(cell) = self.rows.get_mut(row).and_then(|r| r.get_mut(column)) {
            *cell = value.into();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RecordTable {
        RecordTable::new(
            vec!["nome".to_string(), "lat".to_string(), "lon".to_string()],
            vec![
                vec!["A".to_string(), "-23.5".to_string(), "-46.6".to_string()],
                vec!["B".to_string()],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_short_rows_are_padded() {
        let table = sample();
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows()[1], vec!["B", "", ""]);
    }

    #[test]
    fn test_long_rows_are_rejected() {
        let result = RecordTable::new(
            vec!["a".to_string()],
            vec![vec!["1".to_string(), "2".to_string()]],
        );
        assert!(matches!(result, Err(ProcessingError::InvalidFormat(_))));
    }

    #[test]
    fn test_ensure_column_appends_once() {
        let mut table = sample();
        let first = table.ensure_column("CEP");
        let second = table.ensure_column("CEP");

        assert_eq!(first, 3);
        assert_eq!(second, 3);
        assert_eq!(table.headers().len(), 4);
        assert!(table.rows().iter().all(|r| r.len() == 4 && r[3].is_empty()));
    }

    #[test]
    fn test_ensure_columns_keeps_existing_values() {
        let mut table = sample();
        table.set_value(0, 1, "-10.0");
        table.ensure_columns(["lat", "Cidade"]);

        assert_eq!(table.value_by_name(0, "lat"), "-10.0");
        assert_eq!(table.headers()[3], "Cidade");
    }

    #[test]
    fn test_out_of_range_access_is_empty() {
        let mut table = sample();
        assert_eq!(table.value(10, 0), "");
        assert_eq!(table.value_by_name(0, "missing"), "");

        table.set_value(10, 0, "ignored");
        assert_eq!(table.len(), 2);
    }
}
