use crate::source::{SourceError, StatSource};
use std::collections::BTreeMap;
use std::fmt;

/// Settings key holding the schema `pg_stat_statements` is installed in.
pub const STATEMENTS_SCHEMA: &str = "pg_stat_statements.schema";

const SERVER_INFO_QUERY: &str = "SELECT current_setting('server_version_num') AS version_num, \
    pg_is_in_recovery() AS recovery, \
    (SELECT n.nspname FROM pg_extension e JOIN pg_namespace n ON n.oid = e.extnamespace \
     WHERE e.extname = 'pg_stat_statements') AS statements_schema";

/// Server version in `server_version_num` form, e.g. 140005 or 90624.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PgVersion(pub u32);

impl fmt::Display for PgVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = self.0;
        if v >= 100_000 {
            write!(f, "{}.{}", v / 10_000, v % 10_000)
        } else {
            write!(f, "{}.{}.{}", v / 10_000, (v / 100) % 100, v % 100)
        }
    }
}

/// What the catalog needs to know about the server it will query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerInfo {
    pub version_num: u32,
    pub recovery: bool,
    pub settings: BTreeMap<String, String>,
}

impl ServerInfo {
    pub fn new(version_num: u32, recovery: bool) -> Self {
        Self {
            version_num,
            recovery,
            settings: BTreeMap::new(),
        }
    }

    pub fn with_setting(mut self, key: &str, value: &str) -> Self {
        self.settings.insert(key.to_string(), value.to_string());
        self
    }

    pub fn version(&self) -> PgVersion {
        PgVersion(self.version_num)
    }

    pub fn statements_schema(&self) -> Option<&str> {
        self.settings.get(STATEMENTS_SCHEMA).map(String::as_str)
    }

    /// Read version, recovery state and installed extensions from the server.
    pub fn fetch<S: StatSource + ?Sized>(source: &mut S) -> Result<Self, SourceError> {
        let result = source.query(SERVER_INFO_QUERY)?;

        let version_num = result
            .cell(0, 0)
            .and_then(|v| v.parse::<u32>().ok())
            .ok_or_else(|| SourceError::metadata("server_version_num is missing or not a number"))?;

        let recovery = match result.cell(0, 1) {
            Some("t") | Some("true") => true,
            Some("f") | Some("false") => false,
            other => {
                return Err(SourceError::metadata(format!(
                    "unexpected pg_is_in_recovery() value {other:?}"
                )));
            }
        };

        let mut info = Self::new(version_num, recovery);
        if let Some(schema) = result.cell(0, 2) {
            info.settings
                .insert(STATEMENTS_SCHEMA.to_string(), schema.to_string());
        }

        Ok(info)
    }
}
