use integration_tests::harness::{FakeServer, captured_events};
use pgscope_core::archive::ReportRequest;
use pgscope_core::cli::record::record_with;
use pgscope_core::cli::report::report_to;
use pgscope_core::config::RecordConfig;
use std::fs::{File, OpenOptions};
use std::sync::mpsc;
use std::time::Duration;
use tracing::Level;

fn record(path: &std::path::Path, count: u64) {
    let mut server = FakeServer::new(150000, false, false);
    let (_stop_tx, stop_rx) = mpsc::channel();
    let config = RecordConfig {
        file: path.to_path_buf(),
        interval: Duration::from_secs(1),
        count: Some(count),
        append: false,
        query_length: 0,
    };
    record_with(&mut server, &config, &stop_rx).unwrap();
}

#[test]
fn rate_longer_than_interval_warns() {
    let events = captured_events();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stat.tar");
    record(&path, 2);

    let mut request = ReportRequest::new("databases_general", "stat.tar");
    request.rate = Duration::from_secs(3600);
    let summary = report_to(request, File::open(&path).unwrap(), &mut Vec::new()).unwrap();

    assert_eq!(summary.samples_printed, 1);
    let events = events.lock().unwrap();
    assert!(events.iter().any(|e| {
        e.level == Level::WARN
            && e.message.starts_with("rate is longer than the sampling interval")
            && e.field("rate_secs") == Some("3600")
    }));
}

#[test]
fn damaged_tail_warns_and_keeps_earlier_samples() {
    let events = captured_events();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stat.tar");
    record(&path, 3);

    // drop the end marker and most of the last cycle
    let len = File::open(&path).unwrap().metadata().unwrap().len();
    OpenOptions::new()
        .write(true)
        .open(&path)
        .unwrap()
        .set_len(len - 1024 - 1500)
        .unwrap();

    let request = ReportRequest::new("activity", "stat.tar");
    let summary = report_to(request, File::open(&path).unwrap(), &mut Vec::new()).unwrap();

    assert!(summary.samples_printed >= 1);
    let events = events.lock().unwrap();
    assert!(
        events
            .iter()
            .any(|e| e.level == Level::WARN && e.message.contains("archive ends"))
    );
}
