use crate::utils::coordinates::is_blank;

/// In-memory table of string cells with an ordered header.
///
/// Every cell is kept exactly as read; empty cells are `""`. Rows shorter
/// than the header read as missing cells.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Dataset {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn from_rows(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { columns, rows }
    }

    /// Build a dataset from string literals, mostly for fixtures
    pub fn from_str_rows(columns: &[&str], rows: &[&[&str]]) -> Self {
        Self {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows: rows
                .iter()
                .map(|row| row.iter().map(|v| v.to_string()).collect())
                .collect(),
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
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

    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Cell at `row` in `column`; `None` when the column is absent or the row is short
    pub fn value(&self, row: usize, column: &str) -> Option<&str> {
        let index = self.column_index(column)?;
        self.rows.get(row)?.get(index).map(String::as_str)
    }

    /// Whether any row carries a non-blank value in `column`
    pub fn any_truthy(&self, column: &str) -> bool {
        match self.column_index(column) {
            Some(index) => self
                .rows
                .iter()
                .any(|row| row.get(index).is_some_and(|v| !is_blank(v))),
            None => false,
        }
    }

    pub fn rename_columns<F>(&mut self, mut rename: F)
    where
        F: FnMut(&str) -> Option<String>,
    {
        for column in &mut self.columns {
            if let Some(renamed) = rename(column) {
                *column = renamed;
            }
        }
    }

    pub fn retain_rows<F>(&mut self, keep: F)
    where
        F: FnMut(&Vec<String>) -> bool,
    {
        self.rows.retain(keep);
    }

    /// Rewrite every cell of `column` in place; no-op when the column is absent
    pub fn map_column<F>(&mut self, column: &str, mut f: F)
    where
        F: FnMut(&str) -> String,
    {
        let Some(index) = self.column_index(column) else {
            return;
        };
        for row in &mut self.rows {
            if let Some(cell) = row.get_mut(index) {
                *cell = f(cell);
            }
        }
    }
}
