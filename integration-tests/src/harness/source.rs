use pgscope_core::catalog::{Catalog, QueryOptions, View, ViewSet};
use pgscope_core::matrix::Matrix;
use pgscope_core::source::{STATEMENTS_SCHEMA, ServerInfo, SourceError, StatSource};

/// Rows every fake view returns.
pub const ROWS: usize = 3;

/// Counter growth per row per query, so row `i` grows by `(i + 1) * STEP`.
pub const STEP: u64 = 10;

/// An in-memory server that answers pgscope's own queries.
///
/// Rate columns grow by a fixed step on every call; identifier and text
/// columns stay constant so rows pair up across samples.
pub struct FakeServer {
    info: ServerInfo,
    views: ViewSet,
    queries: usize,
    /// Queries of this view fail.
    pub fail_view: Option<String>,
}

impl FakeServer {
    pub fn new(version_num: u32, recovery: bool, statements: bool) -> Self {
        let mut info = ServerInfo::new(version_num, recovery);
        if statements {
            info = info.with_setting(STATEMENTS_SCHEMA, "public");
        }

        let options = QueryOptions::for_server(&info, 0);
        let views = Catalog::builtin()
            .configure(&info, &options)
            .expect("fake server version must be supported");

        Self {
            info,
            views,
            queries: 0,
            fail_view: None,
        }
    }

    pub fn views(&self) -> &ViewSet {
        &self.views
    }

    /// Statistics queries answered so far.
    pub fn queries(&self) -> usize {
        self.queries
    }

    fn server_info(&self) -> Matrix {
        let columns = ["version_num", "recovery", "statements_schema"]
            .iter()
            .map(|c| c.to_string())
            .collect();
        let row = vec![
            Some(self.info.version_num.to_string()),
            Some(if self.info.recovery { "t" } else { "f" }.to_string()),
            self.info.statements_schema().map(str::to_string),
        ];
        Matrix::new(columns, vec![row]).expect("server info row matches its columns")
    }

    fn sample(view: &View, tick: u64) -> Matrix {
        let rows = (0..ROWS)
            .map(|row| {
                (0..view.column_count)
                    .map(|col| {
                        let value = if col == view.unique_key {
                            format!("{}_{row}", view.name)
                        } else if view.diff.contains(col) {
                            ((row as u64 + 1) * STEP * tick).to_string()
                        } else {
                            view.columns[col].clone()
                        };
                        Some(value)
                    })
                    .collect()
            })
            .collect();

        Matrix::new(view.columns.clone(), rows).expect("fake rows match view columns")
    }
}

impl StatSource for FakeServer {
    fn query(&mut self, sql: &str) -> Result<Matrix, SourceError> {
        if sql.contains("server_version_num") {
            return Ok(self.server_info());
        }

        let Some(view) = self.views.iter().find(|v| v.query == sql) else {
            return Err(SourceError::failed(format!("unexpected query: {sql}")));
        };
        if self.fail_view.as_deref() == Some(view.name.as_str()) {
            return Err(SourceError::failed(format!(
                "relation for {} does not exist",
                view.name
            )));
        }

        self.queries += 1;
        let tick = ((self.queries - 1) / self.views.len().max(1)) as u64 + 1;
        Ok(Self::sample(view, tick))
    }
}
