use crate::catalog::CatalogError;
use crate::matrix::MatrixError;
use crate::source::SourceError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArchiveError {
    // IO
    #[error("failed to open archive {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} is not a pgscope archive, refusing to append to it: {source}")]
    NotAnArchive {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read archive: {source}")]
    Read {
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write archive entry {entry}: {source}")]
    Write {
        entry: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to sync archive {path}: {source}")]
    Sync {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write report: {source}")]
    Render {
        #[source]
        source: std::io::Error,
    },

    // Data
    #[error("failed to encode view '{view}': {source}")]
    Encode {
        view: String,
        #[source]
        source: MatrixError,
    },

    #[error("failed to collect view '{view}': {source}")]
    Collect {
        view: String,
        #[source]
        source: SourceError,
    },

    #[error("failed to compute rates for view '{view}' at {at}: {source}")]
    Diff {
        view: String,
        at: String,
        #[source]
        source: MatrixError,
    },

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

impl ArchiveError {
    pub fn open(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Open {
            path: path.into(),
            source,
        }
    }

    pub fn read(source: std::io::Error) -> Self {
        Self::Read { source }
    }

    pub fn render(source: std::io::Error) -> Self {
        Self::Render { source }
    }
}
