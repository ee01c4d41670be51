//! In-memory tabular model shared by the pipeline and both front ends.
//!
//! A [`DataTable`] is an ordered header row plus rows of optional string
//! cells (`None` = absent value). No parsing, no typing; columns the
//! pipeline does not touch ride through unchanged.

/// Resolve `target` against a header list, ignoring case and surrounding
/// whitespace. Returns the position of the first matching header.
///
/// `"Comment "`, `"COMMENT"`, and `" comment"` all match a target of
/// `"comment"`.
#[must_use]
pub fn resolve_column(headers: &[String], target: &str) -> Option<usize> {
    let want = target.trim().to_lowercase();
    headers.iter().position(|h| h.trim().to_lowercase() == want)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataTable {
    headers: Vec<String>,
    rows: Vec<Vec<Option<String>>>,
}

impl DataTable {
    #[must_use]
    pub fn new(headers: Vec<String>) -> Self {
        DataTable {
            headers,
            rows: Vec::new(),
        }
    }

    /// Append a row, padding or truncating it to the header width.
    pub fn push_row(&mut self, mut row: Vec<Option<String>>) {
        row.resize(self.headers.len(), None);
        self.rows.push(row);
    }

    #[must_use]
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    #[must_use]
    pub fn rows(&self) -> &[Vec<Option<String>>] {
        &self.rows
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of the header exactly equal to `name`.
    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Position of the first header matching `target` case- and
    /// whitespace-insensitively.
    #[must_use]
    pub fn resolve_column(&self, target: &str) -> Option<usize> {
        resolve_column(&self.headers, target)
    }

    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row)?.get(col)?.as_deref()
    }

    /// Overwrite the column exactly named `name`, or append it if absent.
    ///
    /// `values` is padded with `None` when shorter than the table; extra
    /// values are dropped.
    pub fn upsert_column(&mut self, name: &str, mut values: Vec<Option<String>>) {
        values.resize(self.rows.len(), None);
        match self.column_index(name) {
            Some(idx) => {
                for (row, value) in self.rows.iter_mut().zip(values) {
                    row[idx] = value;
                }
            }
            None => {
                self.headers.push(name.to_string());
                for (row, value) in self.rows.iter_mut().zip(values) {
                    row.push(value);
                }
            }
        }
    }
}
