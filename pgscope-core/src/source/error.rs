use crate::matrix::MatrixError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("query failed: {0}")]
    Postgres(#[from] ::postgres::Error),

    #[error("query returned a malformed result: {0}")]
    Shape(#[from] MatrixError),

    #[error("unexpected server metadata: {reason}")]
    Metadata { reason: String },

    #[error("{message}")]
    Failed { message: String },
}

impl SourceError {
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed {
            message: message.into(),
        }
    }

    pub fn metadata(reason: impl Into<String>) -> Self {
        Self::Metadata {
            reason: reason.into(),
        }
    }
}
