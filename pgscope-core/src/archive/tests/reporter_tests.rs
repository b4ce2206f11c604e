use super::{at, indexes, record, snapshot};
use crate::archive::{ArchiveError, ReportRequest, ReportSummary, Reporter};
use crate::catalog::{Catalog, CatalogError};
use crate::matrix::{Matrix, MatrixError};
use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use regex::Regex;
use std::fs::{File, OpenOptions};
use std::path::Path;
use std::time::Duration;

const HEADER: &str = "         index     idx_scan  tup_read  tup_fetch  reads     hits";

fn two_samples(path: &Path) {
    record(
        path,
        &[
            snapshot(at(12, 0, 0), "indexes", indexes(&[("ia", "10"), ("ib", "100")])),
            snapshot(at(12, 0, 10), "indexes", indexes(&[("ia", "30"), ("ib", "150")])),
        ],
    );
}

fn report_file(path: &Path, request: ReportRequest) -> (String, ReportSummary) {
    let mut reporter = Reporter::new(request, &Catalog::builtin()).unwrap();
    let mut out = Vec::new();
    let summary = reporter.run(File::open(path).unwrap(), &mut out).unwrap();
    (String::from_utf8(out).unwrap(), summary)
}

/// Report lines after the banner.
fn body(out: &str) -> Vec<&str> {
    out.lines().skip(5).collect()
}

fn raw_archive(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut builder = tar::Builder::new(Vec::new());
    for (name, body) in entries {
        let mut header = tar::Header::new_gnu();
        header.set_size(body.len() as u64);
        header.set_mode(0o644);
        builder.append_data(&mut header, name, *body).unwrap();
    }
    builder.into_inner().unwrap()
}

#[test]
fn first_sample_seeds_and_second_prints_rates() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stat.tar");
    two_samples(&path);

    let (out, summary) = report_file(&path, ReportRequest::new("indexes", "stat.tar"));

    assert_eq!(
        out,
        format!(
            "source: stat.tar\nview: indexes\nwindow: first sample .. last sample\nrate: 1s\n\n\
             {HEADER}\n\
             12:00:10 ib        5         0         0          0         0\n\
             \x20        ia        2         0         0          0         0\n"
        )
    );
    assert_eq!(
        summary,
        ReportSummary {
            entries_seen: 2,
            samples_printed: 1,
            skipped: 0,
        }
    );
}

#[test]
fn rate_longer_than_interval_is_clamped() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stat.tar");
    two_samples(&path);

    let mut request = ReportRequest::new("indexes", "stat.tar");
    request.rate = Duration::from_secs(60);
    let (out, _) = report_file(&path, request);

    assert_eq!(
        body(&out)[1],
        "12:00:10 ib        50        0         0          0         0"
    );
    assert!(out.contains("rate: 60s"));
}

#[test]
fn limit_filter_and_order_apply_to_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stat.tar");
    two_samples(&path);

    let mut request = ReportRequest::new("indexes", "stat.tar");
    request.limit = 1;
    let (out, _) = report_file(&path, request);
    assert_eq!(body(&out).len(), 2);

    let mut request = ReportRequest::new("indexes", "stat.tar");
    request.filter = Some(("index".to_string(), Regex::new("^ia$").unwrap()));
    let (out, _) = report_file(&path, request);
    assert_eq!(
        body(&out),
        vec![
            HEADER,
            "12:00:10 ia        2         0         0          0         0"
        ]
    );

    let mut request = ReportRequest::new("indexes", "stat.tar");
    request.order = Some("index".to_string());
    request.descending = Some(false);
    let (out, _) = report_file(&path, request);
    assert!(body(&out)[1].starts_with("12:00:10 ia"));
}

#[test]
fn unknown_names_fail_before_reading() {
    let catalog = Catalog::builtin();

    let err = Reporter::new(ReportRequest::new("nope", "x"), &catalog).err().unwrap();
    assert!(matches!(err, ArchiveError::Catalog(CatalogError::UnknownView { .. })));

    let mut request = ReportRequest::new("indexes", "x");
    request.order = Some("calls".to_string());
    let err = Reporter::new(request, &catalog).err().unwrap();
    assert_eq!(err.to_string(), "view 'indexes' has no column 'calls'");

    let mut request = ReportRequest::new("indexes", "x");
    request.filter = Some(("calls".to_string(), Regex::new(".").unwrap()));
    assert!(Reporter::new(request, &catalog).is_err());
}

#[test]
fn foreign_and_malformed_entries_are_skipped() {
    let first = indexes(&[("ia", "1")]).to_json().unwrap();
    let second = indexes(&[("ia", "3")]).to_json().unwrap();
    let tables = Matrix::new(vec!["relation".to_string()], vec![])
        .unwrap()
        .to_json()
        .unwrap();

    let data = raw_archive(&[
        ("indexes.20210101T120000.json", first.as_slice()),
        ("tables.20210101T120000.json", tables.as_slice()),
        ("README", b"hello".as_slice()),
        ("indexes.20210101T120001.json", b"{not json".as_slice()),
        ("indexes.yesterday.json", b"{}".as_slice()),
        ("indexes.20210101T120002.json", second.as_slice()),
    ]);

    let mut reporter =
        Reporter::new(ReportRequest::new("indexes", "mem"), &Catalog::builtin()).unwrap();
    let mut out = Vec::new();
    let summary = reporter.run(data.as_slice(), &mut out).unwrap();

    assert_eq!(
        summary,
        ReportSummary {
            entries_seen: 6,
            samples_printed: 1,
            skipped: 1,
        }
    );
    let out = String::from_utf8(out).unwrap();
    assert_eq!(
        body(&out)[1],
        "12:00:02 ia        1         0         0          0         0"
    );
}

#[test]
fn failed_samples_are_skipped_and_keep_the_baseline() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stat.tar");
    record(
        &path,
        &[
            snapshot(at(12, 0, 0), "indexes", indexes(&[("ia", "10")])),
            snapshot(at(12, 0, 5), "indexes", Matrix::invalid("permission denied")),
            snapshot(at(12, 0, 10), "indexes", indexes(&[("ia", "30")])),
            snapshot(at(12, 0, 20), "indexes", indexes(&[("ia", "80")])),
        ],
    );

    let (out, summary) = report_file(&path, ReportRequest::new("indexes", "stat.tar"));

    assert_eq!(
        body(&out),
        vec![
            HEADER,
            "12:00:10 ia        2         0         0          0         0",
            "12:00:20 ia        5         0         0          0         0",
        ]
    );
    assert_eq!(
        summary,
        ReportSummary {
            entries_seen: 4,
            samples_printed: 2,
            skipped: 1,
        }
    );
}

#[test]
fn window_limits_the_samples_used() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stat.tar");
    record(
        &path,
        &[
            snapshot(at(12, 0, 0), "indexes", indexes(&[("ia", "0")])),
            snapshot(at(12, 0, 10), "indexes", indexes(&[("ia", "1000")])),
            snapshot(at(12, 0, 20), "indexes", indexes(&[("ia", "1010")])),
        ],
    );

    let mut request = ReportRequest::new("indexes", "stat.tar");
    let day = NaiveDate::from_ymd_opt(2021, 1, 1).unwrap();
    request.start = Some(day.and_hms_opt(12, 0, 5).unwrap());
    request.end = Some(day.and_hms_opt(12, 0, 20).unwrap());
    let (out, summary) = report_file(&path, request);

    assert!(out.contains("window: 2021-01-01 12:00:05 .. 2021-01-01 12:00:20"));
    assert_eq!(summary.samples_printed, 1);
    assert_eq!(
        body(&out)[1],
        "12:00:20 ia        1         0         0          0         0"
    );
}

#[test]
fn new_rows_are_shown_as_sampled() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stat.tar");
    record(
        &path,
        &[
            snapshot(at(12, 0, 0), "indexes", indexes(&[("ia", "10")])),
            snapshot(at(12, 0, 10), "indexes", indexes(&[("ia", "20"), ("ic", "7")])),
        ],
    );

    let (out, _) = report_file(&path, ReportRequest::new("indexes", "stat.tar"));

    assert_eq!(
        body(&out)[1..].to_vec(),
        vec![
            "12:00:10 ic        7         0         0          0         0",
            "         ia        1         0         0          0         0",
        ]
    );
}

#[test]
fn samples_in_the_same_second_are_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stat.tar");
    record(
        &path,
        &[
            snapshot(at(12, 0, 0), "indexes", indexes(&[("ia", "10")])),
            snapshot(
                at(12, 0, 0) + chrono::Duration::milliseconds(500),
                "indexes",
                indexes(&[("ia", "99")]),
            ),
            snapshot(at(12, 0, 2), "indexes", indexes(&[("ia", "14")])),
        ],
    );

    let (out, summary) = report_file(&path, ReportRequest::new("indexes", "stat.tar"));

    assert_eq!(summary.skipped, 1);
    assert_eq!(
        body(&out)[1],
        "12:00:02 ia        2         0         0          0         0"
    );
}

#[test]
fn truncated_archive_ends_the_report_quietly() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stat.tar");
    record(
        &path,
        &[
            snapshot(at(12, 0, 0), "indexes", indexes(&[("ia", "10")])),
            snapshot(at(12, 0, 1), "indexes", indexes(&[("ia", "11")])),
            snapshot(at(12, 0, 2), "indexes", indexes(&[("ia", "12")])),
        ],
    );
    let len = File::open(&path).unwrap().metadata().unwrap().len();
    OpenOptions::new()
        .write(true)
        .open(&path)
        .unwrap()
        .set_len(len - 1024 - 500)
        .unwrap();

    let (out, summary) = report_file(&path, ReportRequest::new("indexes", "stat.tar"));

    assert_eq!(summary.samples_printed, 1);
    assert!(out.contains("12:00:01 ia"));
}

#[test]
fn non_numeric_counter_is_a_hard_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stat.tar");
    record(
        &path,
        &[
            snapshot(at(12, 0, 0), "indexes", indexes(&[("ia", "10")])),
            snapshot(at(12, 0, 1), "indexes", indexes(&[("ia", "lots")])),
        ],
    );

    let mut reporter =
        Reporter::new(ReportRequest::new("indexes", "stat.tar"), &Catalog::builtin()).unwrap();
    let err = reporter
        .run(File::open(&path).unwrap(), &mut Vec::new())
        .unwrap_err();

    assert!(matches!(
        err,
        ArchiveError::Diff {
            source: MatrixError::NonNumeric { .. },
            ..
        }
    ));
}
