use crate::source::PgVersion;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("server version {version} is not supported, the oldest supported version is {minimum}")]
    UnsupportedVersion {
        version: PgVersion,
        minimum: PgVersion,
    },

    #[error("unknown view '{name}'")]
    UnknownView { name: String },

    #[error("view '{view}' has an invalid definition: {reason}")]
    InvalidView { view: String, reason: String },

    #[error("view '{view}' has no column '{column}'")]
    UnknownColumn { view: String, column: String },

    #[error("archived columns for view '{view}' do not match any known layout: {columns:?}")]
    UnknownLayout { view: String, columns: Vec<String> },
}
