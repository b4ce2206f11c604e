use super::matrix;
use crate::matrix::{Matrix, MatrixError};
use crate::source::{SourceError, StatSource};
use pretty_assertions::assert_eq;

struct Broken;

impl StatSource for Broken {
    fn query(&mut self, _sql: &str) -> Result<Matrix, SourceError> {
        Err(SourceError::failed("relation \"pg_stat_wal\" does not exist"))
    }
}

struct Fixed(Matrix);

impl StatSource for Fixed {
    fn query(&mut self, _sql: &str) -> Result<Matrix, SourceError> {
        Ok(self.0.clone())
    }
}

#[test]
fn json_round_trip_keeps_null_and_empty_apart() {
    let m = matrix(
        &["pid", "state", "query"],
        &[
            &[Some("101"), None, Some("")],
            &[Some("102"), Some("active"), Some("select 1")],
        ],
    );

    let bytes = m.to_json().unwrap();
    let back = Matrix::from_json(&bytes).unwrap();

    assert_eq!(back, m);
    assert_eq!(back.values[0][1], None);
    assert_eq!(back.values[0][2], Some(String::new()));
}

#[test]
fn decoding_rejects_ragged_rows() {
    let body = br#"{"columns":["a","b"],"values":[["1"]],"nrows":1,"ncols":2,"valid":true}"#;

    let err = Matrix::from_json(body).unwrap_err();

    assert!(matches!(
        err,
        MatrixError::RowShape {
            row: 0,
            expected: 2,
            actual: 1
        }
    ));
}

#[test]
fn decoding_recomputes_cached_counts() {
    let body = br#"{"columns":["a"],"values":[["1"],["2"]],"nrows":7,"ncols":9,"valid":true}"#;

    let m = Matrix::from_json(body).unwrap();

    assert_eq!((m.row_count, m.col_count), (2, 1));
}

#[test]
fn populate_keeps_failure_in_invalid_matrix() {
    let m = Matrix::populate(&mut Broken, "select * from pg_stat_wal");

    assert!(!m.valid);
    assert!(m.is_empty());
    assert_eq!(
        m.error.as_deref(),
        Some("relation \"pg_stat_wal\" does not exist")
    );
}

#[test]
fn populate_returns_valid_matrix_on_success() {
    let expected = matrix(&["x"], &[&[Some("1")]]);

    let m = Matrix::populate(&mut Fixed(expected.clone()), "select 1 as x");

    assert!(m.valid);
    assert_eq!(m, expected);
}

#[test]
fn new_rejects_rows_with_wrong_width() {
    let err = Matrix::new(vec!["a".into()], vec![vec![None, None]]).unwrap_err();

    assert!(matches!(err, MatrixError::RowShape { .. }));
}
