// Copyright 2025 the Quakeline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Named-column row access.
//!
//! Catalog readers (TSV parsing, location cleaning, date assembly) live outside this workspace.
//! They hand rows to the layer machinery through [`TableData`].

use alloc::sync::Arc;
use alloc::vec::Vec;

/// The kind of values a column holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColumnKind {
    /// Numeric values (`NaN` for missing).
    Numeric,
    /// Text values (`None` for missing).
    Text,
}

/// Read access to a table of named columns.
pub trait TableData: core::fmt::Debug {
    /// Number of rows.
    fn row_count(&self) -> usize;

    /// Kind of the named column, or `None` if it does not exist.
    fn column_kind(&self, col: &str) -> Option<ColumnKind>;

    /// Numeric value at `(row, col)`.
    fn f64(&self, row: usize, col: &str) -> Option<f64>;

    /// Text value at `(row, col)`.
    fn text(&self, row: usize, col: &str) -> Option<Arc<str>>;

    /// Stable key for `row`. Defaults to the row index.
    fn row_key(&self, row: usize) -> u64 {
        row as u64
    }
}

/// A column of a [`ColumnTable`].
#[derive(Clone, Debug, PartialEq)]
pub enum Column {
    /// Numeric column.
    Numeric(Vec<f64>),
    /// Text column.
    Text(Vec<Option<Arc<str>>>),
}

impl Column {
    fn len(&self) -> usize {
        match self {
            Self::Numeric(v) => v.len(),
            Self::Text(v) => v.len(),
        }
    }
}

/// A small owned columnar table.
///
/// Rows are addressed by index; the row count is the shortest column length.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ColumnTable {
    names: Vec<Arc<str>>,
    columns: Vec<Column>,
    row_keys: Option<Vec<u64>>,
}

impl ColumnTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) a numeric column.
    pub fn with_numeric(self, name: impl Into<Arc<str>>, values: Vec<f64>) -> Self {
        self.with_column(name, Column::Numeric(values))
    }

    /// Adds (or replaces) a text column.
    pub fn with_text<S: Into<Arc<str>>>(
        self,
        name: impl Into<Arc<str>>,
        values: impl IntoIterator<Item = Option<S>>,
    ) -> Self {
        let values = values.into_iter().map(|v| v.map(Into::into)).collect();
        self.with_column(name, Column::Text(values))
    }

    /// Adds (or replaces) a column.
    pub fn with_column(mut self, name: impl Into<Arc<str>>, column: Column) -> Self {
        let name = name.into();
        match self.index_of(&name) {
            Some(i) => self.columns[i] = column,
            None => {
                self.names.push(name);
                self.columns.push(column);
            }
        }
        self
    }

    /// Sets explicit row keys (otherwise keys are row indices).
    pub fn with_row_keys(mut self, keys: Vec<u64>) -> Self {
        self.row_keys = Some(keys);
        self
    }

    /// Returns the column named `name`.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.index_of(name).map(|i| &self.columns[i])
    }

    fn index_of(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| &**n == name)
    }
}

impl TableData for ColumnTable {
    fn row_count(&self) -> usize {
        self.columns.iter().map(Column::len).min().unwrap_or(0)
    }

    fn column_kind(&self, col: &str) -> Option<ColumnKind> {
        self.column(col).map(|c| match c {
            Column::Numeric(_) => ColumnKind::Numeric,
            Column::Text(_) => ColumnKind::Text,
        })
    }

    fn f64(&self, row: usize, col: &str) -> Option<f64> {
        match self.column(col)? {
            Column::Numeric(v) => v.get(row).copied(),
            Column::Text(_) => None,
        }
    }

    fn text(&self, row: usize, col: &str) -> Option<Arc<str>> {
        match self.column(col)? {
            Column::Text(v) => v.get(row)?.clone(),
            Column::Numeric(_) => None,
        }
    }

    fn row_key(&self, row: usize) -> u64 {
        self.row_keys
            .as_ref()
            .and_then(|k| k.get(row).copied())
            .unwrap_or(row as u64)
    }
}
