use super::at;
use crate::archive::EntryName;
use chrono::{Duration, NaiveDate, NaiveDateTime};
use pretty_assertions::assert_eq;

fn ts(h: u32, m: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2021, 1, 1)
        .unwrap()
        .and_hms_opt(h, m, s)
        .unwrap()
}

#[test]
fn parses_three_part_name() {
    let name = EntryName::parse("activity.20210101T120000.json").unwrap();

    assert_eq!(name.view, "activity");
    assert_eq!(name.timestamp, ts(12, 0, 0));
    assert_eq!(name.millis, None);
}

#[test]
fn parses_name_with_millis() {
    let name = EntryName::parse("tables.20210101T120005.042.json").unwrap();

    assert_eq!(name.view, "tables");
    assert_eq!(name.timestamp, ts(12, 0, 5));
    assert_eq!(name.millis, Some(42));
}

#[test]
fn rejects_malformed_names() {
    for bad in [
        "activity.json",
        "activity.20210101T120000.txt",
        "activity.2021-01-01.json",
        "activity.20210101T120000.42.json",
        "activity.20210101T120000.042.extra.json",
        ".20210101T120000.json",
        "activity.20211301T120000.json",
        "pg_stat_statements",
    ] {
        assert_eq!(EntryName::parse(bad), None, "{bad}");
    }
}

#[test]
fn sample_names_carry_millis() {
    let taken = at(12, 0, 0) + Duration::milliseconds(7);

    let name = EntryName::for_sample("wal", taken);

    assert_eq!(name.to_string(), "wal.20210101T120000.007.json");
    assert_eq!(EntryName::parse(&name.to_string()), Some(name));
}

#[test]
fn window_gate_matches_view_and_time() {
    use crate::archive::ReportRequest;

    let mut request = ReportRequest::new("activity", "test.tar");
    request.start = Some(ts(0, 0, 0));
    request.end = Some(ts(0, 0, 0) + Duration::days(1));

    let inside = EntryName::parse("activity.20210101T120000.json").unwrap();
    assert_eq!(inside.view, request.view);
    assert!(request.in_window(inside.timestamp));

    let outside = EntryName::parse("activity.20210103T120000.json").unwrap();
    assert!(!request.in_window(outside.timestamp));

    let other = EntryName::parse("tables.20210101T120000.json").unwrap();
    assert_ne!(other.view, request.view);
}
