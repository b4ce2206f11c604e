mod entry_tests;
mod reporter_tests;

use crate::archive::{Recorder, Snapshot};
use crate::catalog::{Catalog, ViewSet};
use crate::matrix::Matrix;
use crate::matrix::tests::matrix;
use crate::source::{SourceError, StatSource};
use chrono::{DateTime, Local, TimeZone};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

pub(crate) const INDEX_COLUMNS: [&str; 6] =
    ["index", "idx_scan", "tup_read", "tup_fetch", "reads", "hits"];

/// Answers each query with a canned matrix, or fails for `fail_on`.
#[derive(Default)]
pub(crate) struct Scripted {
    pub responses: HashMap<String, Matrix>,
    pub fail_on: Option<String>,
    pub calls: usize,
}

impl StatSource for Scripted {
    fn query(&mut self, sql: &str) -> Result<Matrix, SourceError> {
        self.calls += 1;
        if self.fail_on.as_deref() == Some(sql) {
            return Err(SourceError::failed("permission denied"));
        }
        self.responses
            .get(sql)
            .cloned()
            .ok_or_else(|| SourceError::failed(format!("unexpected query: {sql}")))
    }
}

pub(crate) fn at(h: u32, m: u32, s: u32) -> DateTime<Local> {
    Local.with_ymd_and_hms(2021, 1, 1, h, m, s).single().unwrap()
}

/// An `indexes` sample with one `(name, idx_scan)` pair per row; other counters are 0.
pub(crate) fn indexes(rows: &[(&str, &str)]) -> Matrix {
    let rows: Vec<Vec<Option<&str>>> = rows
        .iter()
        .map(|(name, scans)| {
            vec![Some(*name), Some(*scans), Some("0"), Some("0"), Some("0"), Some("0")]
        })
        .collect();
    let rows: Vec<&[Option<&str>]> = rows.iter().map(Vec::as_slice).collect();
    matrix(&INDEX_COLUMNS, &rows)
}

pub(crate) fn snapshot(taken_at: DateTime<Local>, view: &str, m: Matrix) -> Snapshot {
    Snapshot {
        taken_at,
        matrices: BTreeMap::from([(view.to_string(), m)]),
    }
}

/// Write `samples` to a fresh archive at `path`.
pub(crate) fn record(path: &Path, samples: &[Snapshot]) {
    let mut recorder = Recorder::open(path, false).unwrap();
    for sample in samples {
        recorder.write(sample).unwrap();
    }
    recorder.close().unwrap();
}

pub(crate) fn single_view(name: &str) -> ViewSet {
    ViewSet::new(vec![Catalog::builtin().view(name).unwrap()])
}
