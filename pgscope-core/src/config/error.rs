use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse TOML in {origin}: {source}")]
    Parse {
        origin: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid duration '{value}': {reason}")]
    InvalidDuration { value: String, reason: String },

    #[error("invalid time '{value}', expected YYYYMMDD-hhmmss, YYYY-MM-DD hh:mm:ss or hh:mm:ss")]
    InvalidTime { value: String },

    #[error("invalid filter '{value}', expected COLUMN:REGEX")]
    InvalidFilter { value: String },

    #[error("invalid regular expression in filter '{value}': {source}")]
    InvalidPattern {
        value: String,
        #[source]
        source: regex::Error,
    },

    #[error("invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },

    #[error("no connection string, use --conninfo, PGSCOPE_CONNINFO or [connection] in the config file")]
    MissingConnection,
}

impl ConfigError {
    pub fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ReadFile {
            path: path.into(),
            source,
        }
    }

    pub fn parse(origin: impl Into<String>, source: toml::de::Error) -> Self {
        Self::Parse {
            origin: origin.into(),
            source,
        }
    }

    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }
}
