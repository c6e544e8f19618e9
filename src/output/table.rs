//! Column-growing result table
//!
//! Columns are kept in order of first appearance. Appending a row that names
//! a new column back-fills that column with empty strings for every earlier
//! row, and any known column the row does not name receives an empty string,
//! so all columns always have the same length.

use crate::crawler::ProductDetails;
use std::collections::HashMap;

/// Columns every product row carries, in output order
pub const FIXED_COLUMNS: [&str; 4] = ["category", "title", "price", "img_url"];

#[derive(Debug, Clone)]
struct Column {
    name: String,
    values: Vec<String>,
}

/// Ordered mapping from column name to an equal-length sequence of values
#[derive(Debug, Clone, Default)]
pub struct ResultTable {
    columns: Vec<Column>,
    index: HashMap<String, usize>,
    rows: usize,
}

impl ResultTable {
    /// Creates a table holding only the fixed product columns
    pub fn new() -> Self {
        let mut table = Self::empty();
        for name in FIXED_COLUMNS {
            table.add_column(name);
        }
        table
    }

    /// Creates a table with no columns at all
    pub fn empty() -> Self {
        Self::default()
    }

    /// Appends one row
    ///
    /// Keys may come in any order. A key repeated within the row takes its
    /// last value.
    pub fn append<I, K, V>(&mut self, row: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut cells: Vec<Option<String>> = vec![None; self.columns.len()];

        for (key, value) in row {
            let key = key.into();
            let position = match self.index.get(&key) {
                Some(&position) => position,
                None => {
                    cells.push(None);
                    self.add_column(&key)
                }
            };
            cells[position] = Some(value.into());
        }

        for (column, cell) in self.columns.iter_mut().zip(cells) {
            column.values.push(cell.unwrap_or_default());
        }
        self.rows += 1;
    }

    /// Adds a column back-filled with empty strings, returning its position
    fn add_column(&mut self, name: &str) -> usize {
        let position = self.columns.len();
        self.columns.push(Column {
            name: name.to_string(),
            values: vec![String::new(); self.rows],
        });
        self.index.insert(name.to_string(), position);
        position
    }

    /// Column names in first-seen order
    pub fn headers(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// All values of one column, or None for an unknown column
    pub fn column(&self, name: &str) -> Option<&[String]> {
        self.index
            .get(name)
            .map(|&position| self.columns[position].values.as_slice())
    }

    /// One row as values in header order
    pub fn row(&self, index: usize) -> Option<Vec<&str>> {
        if index >= self.rows {
            return None;
        }
        Some(
            self.columns
                .iter()
                .map(|c| c.values[index].as_str())
                .collect(),
        )
    }

    /// Iterates rows in append order
    pub fn rows(&self) -> impl Iterator<Item = Vec<&str>> + '_ {
        (0..self.rows).filter_map(move |i| self.row(i))
    }
}

/// One scraped product ready to be appended to the table
#[derive(Debug, Clone)]
pub struct ProductRecord {
    pub category: String,
    pub details: ProductDetails,
}

impl ProductRecord {
    pub fn new(category: impl Into<String>, details: ProductDetails) -> Self {
        Self {
            category: category.into(),
            details,
        }
    }

    /// Composes `{category, title, price, img_url, ...specs}`
    ///
    /// A specification label equal to a fixed column name is dropped so it
    /// cannot overwrite the scraped field.
    pub fn into_row(self) -> Vec<(String, String)> {
        let ProductDetails {
            title,
            price,
            img_url,
            specs,
        } = self.details;

        let mut row = vec![
            ("category".to_string(), self.category),
            ("title".to_string(), title),
            ("price".to_string(), price),
            ("img_url".to_string(), img_url),
        ];

        for (label, value) in specs {
            if FIXED_COLUMNS.contains(&label.as_str()) {
                tracing::debug!("Ignoring specification '{}' shadowing a fixed column", label);
                continue;
            }
            row.push((label, value));
        }

        row
    }
}
