//! Settings for recording and reporting, loadable from a TOML file.
//!
//! ```toml
//! [connection]
//! conninfo = "host=localhost user=postgres"
//!
//! [record]
//! file = "pgscope.stat.tar"
//! interval = "1s"
//! count = 3600
//! append = true
//!
//! [report]
//! rate = "1m"
//! truncate = 40
//! ```
//!
//! Every key is optional. Command line flags override file values.

mod error;
mod parse;


pub use error::*;
pub use parse::*;

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_ARCHIVE: &str = "pgscope.stat.tar";

/// Environment variable consulted for the connection string.
pub const CONNINFO_ENV: &str = "PGSCOPE_CONNINFO";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PgscopeConfig {
    pub connection: ConnectionConfig,
    pub record: RecordConfig,
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConnectionConfig {
    pub conninfo: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RecordConfig {
    pub file: PathBuf,
    #[serde(with = "humantime_serde")]
    pub interval: Duration,
    /// Samples to take; unset records until interrupted.
    pub count: Option<u64>,
    pub append: bool,
    /// Longest query text to store, 0 for full text.
    pub query_length: usize,
}

impl Default for RecordConfig {
    fn default() -> Self {
        Self {
            file: PathBuf::from(DEFAULT_ARCHIVE),
            interval: Duration::from_secs(1),
            count: None,
            append: false,
            query_length: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportConfig {
    pub file: PathBuf,
    #[serde(with = "humantime_serde")]
    pub rate: Duration,
    /// Longest value shown, 0 or 1 to never truncate.
    pub truncate: usize,
    /// Rows per sample, 0 for all.
    pub limit: usize,
    /// Data lines between repeated headers, 0 for a single header.
    pub header_every: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            file: PathBuf::from(DEFAULT_ARCHIVE),
            rate: Duration::from_secs(1),
            truncate: 32,
            limit: 0,
            header_every: 20,
        }
    }
}

impl PgscopeConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        parse_toml(&text, &path.display().to_string())
    }

    /// Load `path` if given, defaults otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }
}

impl FromStr for PgscopeConfig {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_toml(s, "<string>")
    }
}

fn parse_toml(text: &str, origin: &str) -> Result<PgscopeConfig, ConfigError> {
    let config: PgscopeConfig = toml::from_str(text).map_err(|e| ConfigError::parse(origin, e))?;
    config.record.validate()?;
    config.report.validate()?;
    Ok(config)
}

impl ConnectionConfig {
    /// `flag` if given, the file value otherwise. The flag already carries
    /// `PGSCOPE_CONNINFO` when it was not passed explicitly.
    pub fn resolve(&self, flag: Option<&str>) -> Result<String, ConfigError> {
        flag.or(self.conninfo.as_deref())
            .map(str::to_string)
            .ok_or(ConfigError::MissingConnection)
    }
}

impl RecordConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        // entry names have second resolution
        if self.interval < Duration::from_secs(1) {
            return Err(ConfigError::invalid("interval", "must be at least one second"));
        }
        if self.count == Some(0) {
            return Err(ConfigError::invalid("count", "must be at least 1"));
        }
        if self.file.as_os_str().is_empty() {
            return Err(ConfigError::invalid("file", "must not be empty"));
        }
        Ok(())
    }
}

impl ReportConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rate < Duration::from_secs(1) {
            return Err(ConfigError::invalid("rate", "must be at least one second"));
        }
        if self.rate.subsec_nanos() != 0 {
            return Err(ConfigError::invalid("rate", "must be whole seconds"));
        }
        if self.file.as_os_str().is_empty() {
            return Err(ConfigError::invalid("file", "must not be empty"));
        }
        Ok(())
    }
}
