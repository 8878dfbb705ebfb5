//! Observed-frequency contingency table over two categorical attributes.
//!
//! Rows and columns are keyed by category label and kept in sorted order,
//! so every traversal (and every floating-point sum built from one) is
//! identical across runs.
//!
//! Only cells that were observed at least once are stored. Rows and
//! columns exist exactly when some cell in them is non-zero, which keeps
//! the invariant
//!
//! ```text
//! Σ cells = Σ row totals = Σ column totals = grand total
//! ```

use std::collections::BTreeMap;

/// Counts of `(row, column)` label pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContingencyTable {
    cells: BTreeMap<String, BTreeMap<String, u64>>,
    column_totals: BTreeMap<String, u64>,
    grand_total: u64,
}

impl ContingencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from `(row, column)` pairs in a single pass.
    ///
    /// # Examples
    /// ```
    /// use u_hypotest::contingency::ContingencyTable;
    /// let table = ContingencyTable::from_pairs([("US", "Laptop"), ("US", "TV"), ("UK", "TV")]);
    /// assert_eq!(table.grand_total(), 3);
    /// assert_eq!(table.row_total("US"), 2);
    /// assert_eq!(table.column_total("TV"), 2);
    /// ```
    pub fn from_pairs<I, R, C>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (R, C)>,
        R: AsRef<str>,
        C: AsRef<str>,
    {
        let mut table = Self::new();
        for (row, column) in pairs {
            table.observe(row.as_ref(), column.as_ref());
        }
        table
    }

    /// Increments the `(row, column)` cell by one.
    pub fn observe(&mut self, row: &str, column: &str) {
        *self
            .cells
            .entry(row.to_owned())
            .or_default()
            .entry(column.to_owned())
            .or_insert(0) += 1;
        *self.column_totals.entry(column.to_owned()).or_insert(0) += 1;
        self.grand_total += 1;
    }

    /// Observed cells in row-major sorted order. Zero cells are never
    /// yielded.
    pub fn cells(&self) -> impl Iterator<Item = (&str, &str, u64)> {
        self.cells.iter().flat_map(|(row, cols)| {
            cols.iter()
                .map(move |(col, &count)| (row.as_str(), col.as_str(), count))
        })
    }

    pub fn row_totals(&self) -> BTreeMap<&str, u64> {
        self.cells
            .iter()
            .map(|(row, cols)| (row.as_str(), cols.values().sum()))
            .collect()
    }

    pub fn column_totals(&self) -> BTreeMap<&str, u64> {
        self.column_totals
            .iter()
            .map(|(col, &total)| (col.as_str(), total))
            .collect()
    }

    pub fn row_total(&self, row: &str) -> u64 {
        self.cells.get(row).map_or(0, |cols| cols.values().sum())
    }

    pub fn column_total(&self, column: &str) -> u64 {
        self.column_totals.get(column).copied().unwrap_or(0)
    }

    pub fn grand_total(&self) -> u64 {
        self.grand_total
    }

    /// Number of distinct row labels.
    pub fn row_count(&self) -> usize {
        self.cells.len()
    }

    /// Number of distinct column labels.
    pub fn column_count(&self) -> usize {
        self.column_totals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grand_total == 0
    }

    /// `(rows − 1) × (columns − 1)`, or `0` when either side has fewer
    /// than two categories.
    pub fn degrees_of_freedom(&self) -> usize {
        self.row_count().saturating_sub(1) * self.column_count().saturating_sub(1)
    }

    /// Expected count under independence, `row total × column total / grand total`.
    ///
    /// `None` for an empty table.
    pub fn expected_frequency(&self, row: &str, column: &str) -> Option<f64> {
        if self.grand_total == 0 {
            return None;
        }
        let row_total = self.row_total(row) as f64;
        let column_total = self.column_total(column) as f64;
        Some(row_total * column_total / self.grand_total as f64)
    }
}
