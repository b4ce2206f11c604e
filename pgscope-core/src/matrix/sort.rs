use crate::matrix::Matrix;
use std::cmp::Ordering;

/// Reorder the rows of `matrix` by the cells of column `key`.
///
/// Whether to compare numerically is decided once, from the key cell of the
/// first row: if that parses as a float every row is compared as a number,
/// otherwise every row is compared as raw text. Cells that fail to parse in
/// numeric mode sort below every number. The sort is stable.
pub fn sort(matrix: &mut Matrix, key: usize, descending: bool) {
    if matrix.values.is_empty() || key >= matrix.col_count {
        return;
    }

    let numeric = matrix.values[0][key]
        .as_deref()
        .is_some_and(|v| parse_number(v).is_some());

    matrix.values.sort_by(|a, b| {
        let ord = if numeric {
            number_or_min(a[key].as_deref()).total_cmp(&number_or_min(b[key].as_deref()))
        } else {
            compare_text(a[key].as_deref(), b[key].as_deref())
        };

        if descending { ord.reverse() } else { ord }
    });
}

fn parse_number(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok()
}

fn number_or_min(value: Option<&str>) -> f64 {
    value.and_then(parse_number).unwrap_or(f64::NEG_INFINITY)
}

fn compare_text(a: Option<&str>, b: Option<&str>) -> Ordering {
    // NULL sorts below any text
    a.cmp(&b)
}
