use crate::matrix::Matrix;

/// Appended to a value cut down to fit its column.
pub const TRUNCATION_MARKER: char = '~';

/// Column names shorter than this are padded as if they were this long.
const NAME_WIDTH_FLOOR: usize = 8;

/// Upper bound for long values in fixed (non-dynamic) mode.
const FIXED_WIDTH_CAP: usize = 32;

/// Per-column display widths computed from one matrix.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Alignment {
    pub widths: Vec<usize>,
    pub names: Vec<String>,
}

/// Display length of a cell, counted in characters.
pub fn text_width(value: &str) -> usize {
    value.chars().count()
}

/// Cut `value` to `width` characters, the last of which is the truncation marker.
pub fn truncate_text(value: &str, width: usize) -> String {
    let keep = width.saturating_sub(1);
    let mut out: String = value.chars().take(keep).collect();
    out.push(TRUNCATION_MARKER);
    out
}

/// Compute display widths for every column of `matrix`.
///
/// `truncate` is the user limit for value length; a limit of 0 or 1 disables
/// truncation. `dynamic` lets widths follow the data exactly (replay, where
/// each pass may be recomputed); fixed mode caps very long values so a
/// continuously refreshed display keeps stable columns.
///
/// Values longer than the limit are truncated in place. A matrix without
/// rows gets widths from its column names alone; callers should not assume
/// those reflect data.
pub fn align(matrix: &mut Matrix, truncate: usize, dynamic: bool) -> Alignment {
    let min_width = truncate.max(1);
    let truncation_enabled = truncate > 1;
    let names = matrix.columns.clone();

    if matrix.values.is_empty() {
        let widths = names.iter().map(|n| text_width(n).max(1)).collect();
        return Alignment { widths, names };
    }

    let last = matrix.col_count.saturating_sub(1);
    let mut widths = vec![0usize; matrix.col_count];

    for (col, name) in names.iter().enumerate() {
        let name_len = text_width(name).max(NAME_WIDTH_FLOOR);
        let width = &mut widths[col];

        for row in matrix.values.iter_mut() {
            let cell = &mut row[col];
            let value_len = cell.as_deref().map(text_width).unwrap_or(0).max(1);

            if value_len <= name_len && value_len >= *width {
                *width = name_len;
            } else if value_len > name_len
                && value_len < min_width
                && value_len >= *width
                && col != last
            {
                *width = if dynamic || value_len <= 2 * name_len {
                    value_len
                } else {
                    value_len.min(FIXED_WIDTH_CAP)
                };
            } else if col == last {
                *width = if truncation_enabled {
                    min_width
                } else {
                    (*width).max(value_len).max(NAME_WIDTH_FLOOR)
                };
            } else if value_len <= *width && name_len <= *width {
                // already wide enough
            } else if !truncation_enabled {
                *width = (*width).max(value_len);
            } else if value_len >= min_width {
                if let Some(value) = cell.as_mut() {
                    *value = truncate_text(value, min_width);
                }
                *width = min_width;
            }
        }
    }

    Alignment { widths, names }
}
