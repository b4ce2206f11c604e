use crate::archive::{Recorder, ReportRequest, Snapshot};
use crate::cli::report::report_to;
use crate::matrix::Matrix;
use chrono::{Local, TimeZone};
use std::collections::BTreeMap;
use std::fs::File;

fn wal_sample(records: &str) -> Matrix {
    Matrix::new(
        ["stats_reset", "records", "fpi", "bytes", "buffers_full"]
            .iter()
            .map(|c| c.to_string())
            .collect(),
        vec![
            ["2021-01-01 00:00:00", records, "0", "0", "0"]
                .iter()
                .map(|c| Some(c.to_string()))
                .collect(),
        ],
    )
    .unwrap()
}

#[test]
fn replays_a_recorded_archive() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stat.tar");

    let mut recorder = Recorder::open(&path, false).unwrap();
    for (secs, records) in [(0, "100"), (5, "600")] {
        let taken_at = Local.with_ymd_and_hms(2021, 1, 1, 9, 0, secs).single().unwrap();
        recorder
            .write(&Snapshot {
                taken_at,
                matrices: BTreeMap::from([("wal".to_string(), wal_sample(records))]),
            })
            .unwrap();
    }
    recorder.close().unwrap();

    let mut out = Vec::new();
    let summary = report_to(
        ReportRequest::new("wal", "stat.tar"),
        File::open(&path).unwrap(),
        &mut out,
    )
    .unwrap();
    let out = String::from_utf8(out).unwrap();

    assert_eq!(summary.samples_printed, 1);
    let line = out.lines().last().unwrap();
    assert!(line.starts_with("09:00:05 2021-01-01 00:00:00  100 "), "{line}");
}
