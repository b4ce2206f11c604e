use crate::archive::{ArchiveError, DEFAULT_HEADER_EVERY, EntryName, TableWriter};
use crate::catalog::{Catalog, CatalogError, View};
use crate::matrix::{Matrix, diff, sort};
use chrono::NaiveDateTime;
use regex::Regex;
use std::io::{Read, Write};
use std::time::Duration;
use tracing::{debug, warn};

/// What to replay and how to present it.
#[derive(Debug, Clone)]
pub struct ReportRequest {
    pub view: String,
    /// Shown in the report header, usually the archive path.
    pub source: String,
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
    /// Period deltas are normalized to. Whole seconds, at least one.
    pub rate: Duration,
    /// Column name overriding the view's default order.
    pub order: Option<String>,
    /// Direction override; the view default applies when `None`.
    pub descending: Option<bool>,
    pub filter: Option<(String, Regex)>,
    /// Maximum rows per sample, 0 for all.
    pub limit: usize,
    /// Maximum value length, 0 or 1 for no truncation.
    pub truncate: usize,
    pub header_every: usize,
    pub color: bool,
}

impl ReportRequest {
    pub fn new(view: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            view: view.into(),
            source: source.into(),
            start: None,
            end: None,
            rate: Duration::from_secs(1),
            order: None,
            descending: None,
            filter: None,
            limit: 0,
            truncate: 32,
            header_every: DEFAULT_HEADER_EVERY,
            color: false,
        }
    }

    /// Whether a sample taken `at` falls inside `[start, end]`.
    pub fn in_window(&self, at: NaiveDateTime) -> bool {
        self.start.is_none_or(|start| at >= start) && self.end.is_none_or(|end| at <= end)
    }
}

/// Counters describing one report run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportSummary {
    /// Archive entries read, of any view.
    pub entries_seen: usize,
    /// Samples that produced at least one output line.
    pub samples_printed: usize,
    /// Entries of the requested view that could not be used.
    pub skipped: usize,
}

/// Replays one view from an archive.
pub struct Reporter {
    request: ReportRequest,
    catalog: Catalog,
    view: View,
    /// Whether `view` carries the request's order and filter overrides.
    overrides_applied: bool,
    table: TableWriter,
    clamped_to: Option<i64>,
}

impl Reporter {
    /// Check the request against the catalog. Unknown views and column
    /// names fail here, before any entry is read.
    pub fn new(request: ReportRequest, catalog: &Catalog) -> Result<Self, ArchiveError> {
        let known = catalog.column_names(&request.view)?;
        let columns = request
            .order
            .iter()
            .chain(request.filter.as_ref().map(|(column, _)| column));
        for column in columns {
            if !known.contains(&column.as_str()) {
                return Err(CatalogError::UnknownColumn {
                    view: request.view.clone(),
                    column: column.clone(),
                }
                .into());
            }
        }

        // The order or filter column may only exist in an older layout; the
        // overrides are applied again once the archived layout is known.
        let newest = catalog.view(&request.view)?;
        let (view, overrides_applied) = match session_view(newest.clone(), &request) {
            Ok(view) => (view, true),
            Err(CatalogError::UnknownColumn { .. }) => (newest, false),
            Err(err) => return Err(err.into()),
        };
        let table = TableWriter::new(request.header_every, request.truncate > 1, request.color);

        Ok(Self {
            request,
            catalog: *catalog,
            view,
            overrides_applied,
            table,
            clamped_to: None,
        })
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    /// Read the whole archive from `reader` and write the report to `out`.
    pub fn run<R: Read, W: Write>(
        &mut self,
        reader: R,
        out: &mut W,
    ) -> Result<ReportSummary, ArchiveError> {
        let mut summary = ReportSummary::default();
        self.write_banner(out)?;

        let mut archive = tar::Archive::new(reader);
        let entries = archive.entries().map_err(ArchiveError::read)?;
        let mut previous: Option<(EntryName, Matrix)> = None;

        for entry in entries {
            let mut entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    warn!(error = %err, "archive ends with a damaged entry, stopping");
                    break;
                }
            };
            summary.entries_seen += 1;

            let path = match entry.path() {
                Ok(path) => path.to_string_lossy().into_owned(),
                Err(err) => {
                    debug!(error = %err, "skipping entry with unreadable name");
                    continue;
                }
            };

            let Some(name) = EntryName::parse(&path) else {
                debug!(entry = %path, "skipping entry with unrecognized name");
                continue;
            };
            if name.view != self.request.view || !self.request.in_window(name.timestamp) {
                continue;
            }

            let mut body = Vec::new();
            if let Err(err) = entry.read_to_end(&mut body) {
                warn!(entry = %path, error = %err, "archive ends inside an entry, stopping");
                break;
            }

            let current = match Matrix::from_json(&body) {
                Ok(matrix) => matrix,
                Err(err) => {
                    warn!(entry = %path, error = %err, "skipping undecodable entry");
                    summary.skipped += 1;
                    continue;
                }
            };

            // a view that failed during recording; the previous sample stays the baseline
            if !current.valid {
                warn!(
                    entry = %path,
                    error = current.error.as_deref().unwrap_or("unknown error"),
                    "skipping sample that failed during recording"
                );
                summary.skipped += 1;
                continue;
            }

            let Some((prev_name, prev)) = previous.take() else {
                self.adopt_layout(&current)?;
                previous = Some((name, current));
                continue;
            };

            if prev.columns != current.columns {
                warn!(entry = %path, "column layout changed, starting a new baseline");
                self.adopt_layout(&current)?;
                previous = Some((name, current));
                continue;
            }

            let interval = (name.timestamp - prev_name.timestamp).num_seconds();
            if interval <= 0 {
                warn!(
                    entry = %path,
                    interval_secs = interval,
                    "sample is not newer than the previous one, skipping"
                );
                summary.skipped += 1;
                previous = Some((prev_name, prev));
                continue;
            }

            if self.write_sample(&name, &prev, &current, interval, out)? > 0 {
                summary.samples_printed += 1;
            }
            previous = Some((name, current));
        }

        debug!(
            entries = summary.entries_seen,
            samples = summary.samples_printed,
            skipped = summary.skipped,
            "report finished"
        );
        Ok(summary)
    }

    fn write_banner<W: Write>(&self, out: &mut W) -> Result<(), ArchiveError> {
        let fmt = |t: Option<NaiveDateTime>, open: &str| {
            t.map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
                .unwrap_or_else(|| open.to_string())
        };

        writeln!(
            out,
            "source: {}\nview: {}\nwindow: {} .. {}\nrate: {}s\n",
            self.request.source,
            self.request.view,
            fmt(self.request.start, "first sample"),
            fmt(self.request.end, "last sample"),
            self.rate_secs(),
        )
        .map_err(ArchiveError::render)
    }

    fn rate_secs(&self) -> i64 {
        self.request.rate.as_secs().max(1) as i64
    }

    /// Switch to the catalog variant that produced these columns.
    fn adopt_layout(&mut self, matrix: &Matrix) -> Result<(), ArchiveError> {
        if self.overrides_applied && self.view.columns == matrix.columns {
            return Ok(());
        }

        let view = self.catalog.view_for_columns(&self.request.view, &matrix.columns)?;
        self.view = session_view(view, &self.request)?;
        self.overrides_applied = true;
        debug!(view = %self.view.name, columns = self.view.column_count, "using archived layout");
        Ok(())
    }

    fn write_sample<W: Write>(
        &mut self,
        name: &EntryName,
        previous: &Matrix,
        current: &Matrix,
        interval: i64,
        out: &mut W,
    ) -> Result<usize, ArchiveError> {
        let mut rate = self.rate_secs();
        if rate > interval {
            if self.clamped_to != Some(interval) {
                warn!(
                    rate_secs = rate,
                    interval_secs = interval,
                    "rate is longer than the sampling interval, using the interval"
                );
                self.clamped_to = Some(interval);
            }
            rate = interval;
        }
        let samples = interval / rate;

        let view = &mut self.view;
        let mut delta = diff(previous, current, samples, view.diff, view.unique_key).map_err(
            |source| ArchiveError::Diff {
                view: view.name.clone(),
                at: name.timestamp.to_string(),
                source,
            },
        )?;

        sort(&mut delta, view.order_key, view.order_desc);
        view.align_once(&mut delta, self.request.truncate, true);

        let mut rows: Vec<&[Option<String>]> = delta
            .values
            .iter()
            .filter(|row| view.accepts(row))
            .map(Vec::as_slice)
            .collect();
        if self.request.limit > 0 {
            rows.truncate(self.request.limit);
        }

        self.table
            .write_sample(out, name.timestamp, &view.columns, &view.widths, &rows)
            .map_err(ArchiveError::render)
    }
}

/// Apply the request's order and filter overrides to a fresh view.
fn session_view(mut view: View, request: &ReportRequest) -> Result<View, CatalogError> {
    if let Some(column) = &request.order {
        let descending = request.descending.unwrap_or(view.order_desc);
        view.set_order(column, descending)?;
    } else if let Some(descending) = request.descending {
        view.order_desc = descending;
    }

    if let Some((column, pattern)) = &request.filter {
        view.set_filter(column, pattern.clone())?;
    }

    Ok(view)
}
