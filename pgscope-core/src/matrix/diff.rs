use crate::matrix::{Matrix, MatrixError};
use std::collections::HashMap;

/// Inclusive span of column indexes whose values are turned into rates.
///
/// Columns outside the span (identifiers, text, timestamps) are copied
/// as-is. `Disabled` means the view is never diffed and the current
/// snapshot is shown directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffRange {
    Span { low: usize, high: usize },
    Disabled,
}

impl DiffRange {
    pub fn span(low: usize, high: usize) -> Self {
        Self::Span { low, high }
    }

    pub fn contains(&self, col: usize) -> bool {
        match self {
            Self::Span { low, high } => (*low..=*high).contains(&col),
            Self::Disabled => false,
        }
    }

    /// Whether this range asks for any diffing on a matrix of `columns` columns.
    ///
    /// A span lying wholly past the last column is the legacy "no diff"
    /// sentinel and is treated the same as `Disabled`.
    pub fn is_active(&self, columns: usize) -> bool {
        match self {
            Self::Span { low, high } => *low < columns || *high < columns,
            Self::Disabled => false,
        }
    }

    /// `0 <= low <= high < columns`, or no diffing at all.
    pub fn is_valid_for(&self, columns: usize) -> bool {
        match self {
            Self::Span { low, high } => !self.is_active(columns) || (low <= high && *high < columns),
            Self::Disabled => true,
        }
    }
}

/// Compute the per-interval delta between two snapshots of the same view.
///
/// Rows are matched on the text of their `unique_key` cell. The result has
/// exactly the rows of `current`, in `current`'s order:
///
/// - a matched row gets `(current - previous) / interval` in every column of
///   `range` and the current value everywhere else;
/// - an unmatched (new) row is copied verbatim;
/// - rows present only in `previous` are dropped.
pub fn diff(
    previous: &Matrix,
    current: &Matrix,
    interval: i64,
    range: DiffRange,
    unique_key: usize,
) -> Result<Matrix, MatrixError> {
    if !range.is_active(current.col_count) {
        return Ok(current.clone());
    }

    if previous.col_count != current.col_count {
        return Err(MatrixError::ColumnMismatch {
            previous: previous.col_count,
            current: current.col_count,
        });
    }

    if unique_key >= current.col_count {
        return Err(MatrixError::ColumnOutOfRange {
            index: unique_key,
            columns: current.col_count,
        });
    }

    if interval <= 0 {
        return Err(MatrixError::NonPositiveInterval { interval });
    }

    // key text -> row index in previous; first occurrence wins
    let mut index: HashMap<&str, usize> = HashMap::with_capacity(previous.row_count);
    for (i, row) in previous.values.iter().enumerate() {
        if let Some(key) = row[unique_key].as_deref() {
            index.entry(key).or_insert(i);
        }
    }

    let mut values = Vec::with_capacity(current.row_count);

    for row in &current.values {
        let matched = row[unique_key]
            .as_deref()
            .and_then(|key| index.get(key))
            .map(|&i| &previous.values[i]);

        let Some(prev_row) = matched else {
            values.push(row.clone());
            continue;
        };

        let mut out = Vec::with_capacity(row.len());
        for (col, cell) in row.iter().enumerate() {
            if range.contains(col) {
                out.push(diff_cell(
                    &current.columns[col],
                    prev_row[col].as_deref(),
                    cell.as_deref(),
                    interval,
                )?);
            } else {
                out.push(cell.clone());
            }
        }
        values.push(out);
    }

    Matrix::new(current.columns.clone(), values)
}

/// Float arithmetic when either side is written with a decimal point or an
/// exponent, integer arithmetic otherwise.
fn is_float_text(value: &str) -> bool {
    value.contains(['.', 'e', 'E'])
}

fn diff_cell(
    column: &str,
    previous: Option<&str>,
    current: Option<&str>,
    interval: i64,
) -> Result<Option<String>, MatrixError> {
    let (Some(prev), Some(curr)) = (previous, current) else {
        return Ok(current.map(str::to_string));
    };
    if prev.is_empty() || curr.is_empty() {
        return Ok(Some(curr.to_string()));
    }

    let non_numeric = || MatrixError::NonNumeric {
        column: column.to_string(),
        previous: prev.to_string(),
        current: curr.to_string(),
    };

    if is_float_text(prev) || is_float_text(curr) {
        let p: f64 = prev.trim().parse().map_err(|_| non_numeric())?;
        let c: f64 = curr.trim().parse().map_err(|_| non_numeric())?;
        return Ok(Some(format!("{:.2}", (c - p) / interval as f64)));
    }

    let p: i64 = prev.trim().parse().map_err(|_| non_numeric())?;
    let c: i64 = curr.trim().parse().map_err(|_| non_numeric())?;
    let delta = c.checked_sub(p).ok_or_else(|| MatrixError::Overflow {
        column: column.to_string(),
    })?;

    Ok(Some((delta / interval).to_string()))
}
