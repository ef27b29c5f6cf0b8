use crate::error::DataError;
use serde::{Deserialize, Serialize};

/// One named numeric series (a table column).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Column {
    pub name: String,
    pub values: Vec<f64>,
}

impl Column {
    pub fn new(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Last finite sample, used as the line-chart endpoint label.
    pub fn last_value(&self) -> Option<f64> {
        self.values.iter().rev().copied().find(|v| v.is_finite())
    }
}

/// Tidy, time-ordered table: one row label per sample, one column per series.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Table {
    index: Vec<String>,
    columns: Vec<Column>,
}

impl Table {
    /// Build a table, checking that every column matches the index length.
    pub fn new(index: Vec<String>, columns: Vec<Column>) -> Result<Self, DataError> {
        if index.is_empty() || columns.is_empty() {
            return Err(DataError::Empty);
        }
        for c in &columns {
            if c.values.len() != index.len() {
                return Err(DataError::LengthMismatch {
                    column: c.name.clone(),
                    expected: index.len(),
                    got: c.values.len(),
                });
            }
        }
        Ok(Self { index, columns })
    }

    pub fn index(&self) -> &[String] {
        &self.index
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn n_rows(&self) -> usize {
        self.index.len()
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    /// Finite values across all columns.
    pub fn finite_values(&self) -> impl Iterator<Item = f64> + '_ {
        self.columns
            .iter()
            .flat_map(|c| c.values.iter().copied())
            .filter(|v| v.is_finite())
    }

    /// (min, max) over all finite values, `None` when there are none.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        let mut it = self.finite_values();
        let first = it.next()?;
        Some(it.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
    }
}
