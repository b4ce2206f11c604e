use crate::source::ServerInfo;

/// Oldest server release with every view's base columns.
pub const MIN_SUPPORTED_VERSION: u32 = 90600;

/// Newest release the catalog has variants for. Newer servers get the
/// newest variants.
pub const LATEST_KNOWN_VERSION: u32 = 180000;

/// The version- and server-dependent pieces substituted into view queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryOptions {
    pub version: u32,
    pub recovery: bool,
    /// Function returning the current WAL position.
    pub wal_position_fn: &'static str,
    /// Function computing the byte distance between two WAL positions.
    pub wal_diff_fn: &'static str,
    /// Maximum length of query text columns; 0 keeps full text.
    pub query_length: usize,
    /// Schema `pg_stat_statements` lives in, if installed.
    pub statements_schema: Option<String>,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            version: LATEST_KNOWN_VERSION,
            recovery: false,
            wal_position_fn: "pg_current_wal_lsn",
            wal_diff_fn: "pg_wal_lsn_diff",
            query_length: 0,
            statements_schema: Some("public".to_string()),
        }
    }
}

impl QueryOptions {
    pub fn for_server(server: &ServerInfo, query_length: usize) -> Self {
        let wal_naming = server.version_num >= 100000;

        let wal_position_fn = match (wal_naming, server.recovery) {
            (true, false) => "pg_current_wal_lsn",
            (true, true) => "pg_last_wal_receive_lsn",
            (false, false) => "pg_current_xlog_location",
            (false, true) => "pg_last_xlog_receive_location",
        };

        let wal_diff_fn = if wal_naming {
            "pg_wal_lsn_diff"
        } else {
            "pg_xlog_location_diff"
        };

        Self {
            version: server.version_num,
            recovery: server.recovery,
            wal_position_fn,
            wal_diff_fn,
            query_length,
            statements_schema: server.statements_schema().map(str::to_string),
        }
    }

    /// Expression for a whitespace-collapsed, optionally shortened query text.
    pub fn query_text(&self, column: &str) -> String {
        let collapsed = format!(r"regexp_replace({column}, '\s+', ' ', 'g')");
        if self.query_length > 0 {
            format!("left({collapsed}, {})", self.query_length)
        } else {
            collapsed
        }
    }

    pub fn statements_relation(&self) -> String {
        let schema = self.statements_schema.as_deref().unwrap_or("public");
        format!("{}.pg_stat_statements", quote_ident(schema))
    }
}

fn quote_ident(ident: &str) -> String {
    let simple = !ident.is_empty()
        && ident
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
        && !ident.starts_with(|c: char| c.is_ascii_digit());

    if simple {
        ident.to_string()
    } else {
        format!("\"{}\"", ident.replace('"', "\"\""))
    }
}
