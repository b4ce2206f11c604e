use crate::catalog::queries;
use crate::catalog::{CatalogError, QueryOptions, View};
use crate::matrix::DiffRange;
use std::collections::BTreeMap;

pub(crate) type RenderFn = fn(&QueryOptions) -> String;

/// One server-release bucket of a view: its column layout and query.
pub(crate) struct Variant {
    /// First `server_version_num` this variant applies to.
    pub since: u32,
    pub columns: &'static [&'static str],
    /// Inclusive rate column span, `None` for views shown as-is.
    pub diff: Option<(usize, usize)>,
    pub order_key: usize,
    pub order_desc: bool,
    pub unique_key: usize,
    pub render: RenderFn,
}

/// A named statistics category with its variants, oldest first.
pub(crate) struct ViewDef {
    pub name: &'static str,
    pub description: &'static str,
    /// Needs the `pg_stat_statements` extension.
    pub needs_statements: bool,
    pub variants: &'static [Variant],
}

impl ViewDef {
    pub fn since(&self) -> u32 {
        self.variants.first().map(|v| v.since).unwrap_or(u32::MAX)
    }

    /// Newest variant not newer than `version`.
    pub fn variant_for(&self, version: u32) -> Option<&Variant> {
        self.variants.iter().rev().find(|v| v.since <= version)
    }

    pub fn newest(&self) -> Option<&Variant> {
        self.variants.last()
    }

    /// The variant that produces exactly these column names, newest first.
    pub fn variant_with_columns(&self, columns: &[String]) -> Option<&Variant> {
        self.variants
            .iter()
            .rev()
            .find(|v| v.columns.iter().copied().eq(columns.iter().map(String::as_str)))
    }
}

impl Variant {
    pub fn build(&self, name: &str, options: &QueryOptions) -> Result<View, CatalogError> {
        let column_count = self.columns.len();
        let invalid = |reason: String| CatalogError::InvalidView {
            view: name.to_string(),
            reason,
        };

        let diff = match self.diff {
            Some((low, high)) => DiffRange::span(low, high),
            None => DiffRange::Disabled,
        };
        if !diff.is_valid_for(column_count) {
            return Err(invalid(format!(
                "diff range {diff:?} does not fit {column_count} columns"
            )));
        }
        if self.order_key >= column_count || self.unique_key >= column_count {
            return Err(invalid(format!(
                "order key {} / unique key {} out of range for {column_count} columns",
                self.order_key, self.unique_key
            )));
        }

        Ok(View {
            name: name.to_string(),
            query: (self.render)(options),
            columns: self.columns.iter().map(|c| c.to_string()).collect(),
            column_count,
            diff,
            order_key: self.order_key,
            order_desc: self.order_desc,
            unique_key: self.unique_key,
            widths: Vec::new(),
            aligned: false,
            filters: BTreeMap::new(),
        })
    }
}

pub(crate) static BUILTIN_VIEWS: &[ViewDef] = &[
    queries::activity::ACTIVITY,
    queries::databases::DATABASES_GENERAL,
    queries::databases::DATABASES_SESSIONS,
    queries::relations::TABLES,
    queries::relations::INDEXES,
    queries::relations::FUNCTIONS,
    queries::relations::SIZES,
    queries::replication::REPLICATION,
    queries::wal::WAL,
    queries::progress::PROGRESS_VACUUM,
    queries::progress::PROGRESS_CLUSTER,
    queries::progress::PROGRESS_INDEX,
    queries::progress::PROGRESS_ANALYZE,
    queries::progress::PROGRESS_BASEBACKUP,
    queries::progress::PROGRESS_COPY,
    queries::statements::STATEMENTS_TIMINGS,
    queries::statements::STATEMENTS_GENERAL,
    queries::statements::STATEMENTS_IO,
    queries::statements::STATEMENTS_TEMP,
    queries::statements::STATEMENTS_LOCAL,
    queries::statements::STATEMENTS_WAL,
];
