use thiserror::Error;

#[derive(Debug, Error)]
pub enum MatrixError {
    // Shape
    #[error("row {row} has {actual} cells, expected {expected}")]
    RowShape {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("column index {index} is out of range for {columns} columns")]
    ColumnOutOfRange { index: usize, columns: usize },

    #[error("previous snapshot has {previous} columns, current snapshot has {current}")]
    ColumnMismatch { previous: usize, current: usize },

    // Delta computation
    #[error("column '{column}': cannot compute delta between '{previous}' and '{current}'")]
    NonNumeric {
        column: String,
        previous: String,
        current: String,
    },

    #[error("column '{column}': integer overflow computing delta")]
    Overflow { column: String },

    #[error("sampling interval must be positive, got {interval}")]
    NonPositiveInterval { interval: i64 },

    // Serialization
    #[error("failed to encode result matrix: {source}")]
    Encode {
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to decode result matrix: {source}")]
    Decode {
        #[source]
        source: serde_json::Error,
    },
}
