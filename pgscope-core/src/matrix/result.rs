use crate::matrix::MatrixError;
use crate::source::StatSource;
use serde::{Deserialize, Serialize};

/// One query result: ordered column names plus rows of nullable text cells.
///
/// Every row holds exactly `col_count` cells, positionally aligned with
/// `columns`. `valid` stays false until the matrix has been populated
/// successfully; a failed query leaves the reason in `error`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Matrix {
    pub columns: Vec<String>,
    pub values: Vec<Vec<Option<String>>>,
    #[serde(rename = "nrows")]
    pub row_count: usize,
    #[serde(rename = "ncols")]
    pub col_count: usize,
    pub valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Matrix {
    /// Build a valid matrix, checking that every row matches the column count.
    pub fn new(
        columns: Vec<String>,
        values: Vec<Vec<Option<String>>>,
    ) -> Result<Self, MatrixError> {
        let col_count = columns.len();

        for (row, cells) in values.iter().enumerate() {
            if cells.len() != col_count {
                return Err(MatrixError::RowShape {
                    row,
                    expected: col_count,
                    actual: cells.len(),
                });
            }
        }

        Ok(Self {
            row_count: values.len(),
            col_count,
            columns,
            values,
            valid: true,
            error: None,
        })
    }

    /// An empty, invalid matrix carrying the reason it could not be populated.
    pub fn invalid(error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Self::default()
        }
    }

    /// Run `sql` against `source`.
    ///
    /// A failing query does not abort the caller: the failure is kept in the
    /// returned matrix and `valid` stays false, so one dead view never stops
    /// the others from being collected.
    pub fn populate<S: StatSource + ?Sized>(source: &mut S, sql: &str) -> Self {
        match source.query(sql) {
            Ok(matrix) => matrix,
            Err(err) => {
                tracing::warn!(error = %err, "statistics query failed");
                Self::invalid(err.to_string())
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.values.get(row)?.get(col)?.as_deref()
    }

    pub fn to_json(&self) -> Result<Vec<u8>, MatrixError> {
        serde_json::to_vec(self).map_err(|source| MatrixError::Encode { source })
    }

    /// Decode a matrix and re-check its shape; cached counts are recomputed
    /// from the payload rather than trusted.
    pub fn from_json(bytes: &[u8]) -> Result<Self, MatrixError> {
        let decoded: Self =
            serde_json::from_slice(bytes).map_err(|source| MatrixError::Decode { source })?;

        let mut matrix = Self::new(decoded.columns, decoded.values)?;
        matrix.valid = decoded.valid;
        matrix.error = decoded.error;
        Ok(matrix)
    }
}
