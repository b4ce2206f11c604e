mod result_tests;

use crate::matrix::Matrix;

pub(crate) fn matrix(columns: &[&str], rows: &[&[Option<&str>]]) -> Matrix {
    Matrix::new(
        columns.iter().map(|c| c.to_string()).collect(),
        rows.iter()
            .map(|r| r.iter().map(|c| c.map(str::to_string)).collect())
            .collect(),
    )
    .unwrap()
}

pub(crate) fn column(m: &Matrix, col: usize) -> Vec<Option<&str>> {
    m.values.iter().map(|r| r[col].as_deref()).collect()
}
