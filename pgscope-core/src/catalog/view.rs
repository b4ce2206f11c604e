use crate::catalog::CatalogError;
use crate::matrix::{DiffRange, Matrix, align};
use regex::Regex;
use std::collections::BTreeMap;

/// One statistics view as used by a single recording or reporting session.
///
/// Built fresh from the static catalog for each session. `widths` and
/// `aligned` cache the column sizing computed on the first non-empty sample
/// so the table keeps its shape for the rest of the session.
#[derive(Debug, Clone)]
pub struct View {
    pub name: String,
    pub query: String,
    pub columns: Vec<String>,
    pub column_count: usize,
    pub diff: DiffRange,
    pub order_key: usize,
    pub order_desc: bool,
    pub unique_key: usize,
    pub widths: Vec<usize>,
    pub aligned: bool,
    pub filters: BTreeMap<usize, Regex>,
}

impl View {
    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    fn require_column(&self, column: &str) -> Result<usize, CatalogError> {
        self.column_index(column)
            .ok_or_else(|| CatalogError::UnknownColumn {
                view: self.name.clone(),
                column: column.to_string(),
            })
    }

    /// Override the default ordering with a column name.
    pub fn set_order(&mut self, column: &str, descending: bool) -> Result<(), CatalogError> {
        self.order_key = self.require_column(column)?;
        self.order_desc = descending;
        Ok(())
    }

    /// Only show rows whose `column` matches `pattern`.
    pub fn set_filter(&mut self, column: &str, pattern: Regex) -> Result<(), CatalogError> {
        let index = self.require_column(column)?;
        self.filters.insert(index, pattern);
        Ok(())
    }

    /// Whether a row passes every configured filter. NULL never matches.
    pub fn accepts(&self, row: &[Option<String>]) -> bool {
        self.filters.iter().all(|(col, re)| {
            row.get(*col)
                .and_then(|c| c.as_deref())
                .is_some_and(|v| re.is_match(v))
        })
    }

    /// Size columns from `matrix` unless that already happened this session.
    ///
    /// An empty matrix says nothing about data widths, so it leaves the view
    /// unaligned and the next sample tries again.
    pub fn align_once(&mut self, matrix: &mut Matrix, truncate: usize, dynamic: bool) {
        if self.aligned || matrix.is_empty() {
            return;
        }

        let alignment = align(matrix, truncate, dynamic);
        self.widths = alignment.widths;
        self.aligned = true;
    }
}

/// The views configured for one server, in catalog order.
#[derive(Debug, Clone, Default)]
pub struct ViewSet {
    views: Vec<View>,
}

impl ViewSet {
    pub fn new(views: Vec<View>) -> Self {
        Self { views }
    }

    pub fn get(&self, name: &str) -> Option<&View> {
        self.views.iter().find(|v| v.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &View> {
        self.views.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.views.iter().map(|v| v.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.views.len()
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }
}
