use super::server;
use crate::catalog::{Catalog, CatalogError, QueryOptions};
use crate::matrix::DiffRange;
use pretty_assertions::assert_eq;

#[test]
fn oldest_server_without_statements_gets_base_views() {
    let (info, options) = server(90600, false, false);

    let views = Catalog::builtin().configure(&info, &options).unwrap();

    assert_eq!(
        views.names(),
        vec![
            "activity",
            "databases_general",
            "tables",
            "indexes",
            "functions",
            "sizes",
            "replication",
            "progress_vacuum",
        ]
    );
}

#[test]
fn statement_views_need_the_extension() {
    let (info, options) = server(130000, false, true);

    let views = Catalog::builtin().configure(&info, &options).unwrap();

    assert!(views.get("statements_timings").is_some());
    assert!(views.get("statements_wal").is_some());
    assert!(views.get("wal").is_none());

    let (info, options) = server(130000, false, false);
    let views = Catalog::builtin().configure(&info, &options).unwrap();
    assert!(views.names().iter().all(|n| !n.starts_with("statements_")));
}

#[test]
fn newest_server_gets_every_view() {
    let (info, options) = server(180000, false, true);

    let views = Catalog::builtin().configure(&info, &options).unwrap();

    assert_eq!(views.len(), Catalog::builtin().names().len());
}

#[test]
fn unsupported_version_is_rejected() {
    let (info, options) = server(90500, false, false);

    let err = Catalog::builtin().configure(&info, &options).unwrap_err();

    assert!(matches!(err, CatalogError::UnsupportedVersion { .. }));
    assert_eq!(
        err.to_string(),
        "server version 9.5.0 is not supported, the oldest supported version is 9.6.0"
    );
}

#[test]
fn activity_gains_backend_type_on_10() {
    let catalog = Catalog::builtin();

    let (info, options) = server(90624, false, false);
    let old = catalog.configure(&info, &options).unwrap();
    let activity = old.get("activity").unwrap();
    assert_eq!(activity.column_count, 11);
    assert!(activity.column_index("type").is_none());

    let (info, options) = server(100000, false, false);
    let new = catalog.configure(&info, &options).unwrap();
    let activity = new.get("activity").unwrap();
    assert_eq!(activity.column_count, 12);
    assert_eq!(activity.column_index("type"), Some(5));
    assert_eq!(activity.diff, DiffRange::Disabled);
}

#[test]
fn databases_general_shifts_diff_range_on_12() {
    let catalog = Catalog::builtin();

    let (info, options) = server(110000, false, false);
    let views = catalog.configure(&info, &options).unwrap();
    assert_eq!(views.get("databases_general").unwrap().diff, DiffRange::span(2, 16));

    let (info, options) = server(120000, false, false);
    let views = catalog.configure(&info, &options).unwrap();
    let general = views.get("databases_general").unwrap();
    assert_eq!(general.diff, DiffRange::span(2, 17));
    assert_eq!(general.column_index("csum_fails"), Some(13));
}

#[test]
fn wal_functions_follow_version_and_recovery() {
    let catalog = Catalog::builtin();

    let (info, options) = server(90600, false, false);
    let views = catalog.configure(&info, &options).unwrap();
    let query = &views.get("replication").unwrap().query;
    assert!(query.contains("pg_current_xlog_location()"));
    assert!(query.contains("pg_xlog_location_diff("));
    assert!(query.contains("sent_location"));

    let (info, options) = server(150000, true, false);
    let views = catalog.configure(&info, &options).unwrap();
    let query = &views.get("replication").unwrap().query;
    assert!(query.contains("pg_last_wal_receive_lsn()"));
    assert!(query.contains("pg_wal_lsn_diff("));
    assert!(query.contains("replay_lag"));
}

#[test]
fn future_versions_use_newest_variants() {
    let (info, options) = server(190000, false, true);

    let views = Catalog::builtin().configure(&info, &options).unwrap();

    assert_eq!(views.get("wal").unwrap().column_count, 5);
    assert_eq!(views.get("statements_timings").unwrap().column_count, 12);
}

#[test]
fn query_length_limits_query_text() {
    let (info, _) = server(160000, false, false);
    let options = QueryOptions::for_server(&info, 40);

    let views = Catalog::builtin().configure(&info, &options).unwrap();

    assert!(views.get("activity").unwrap().query.contains("left(regexp_replace(query"));
    assert!(views.get("activity").unwrap().query.contains(", 40)"));
}

#[test]
fn statements_schema_is_quoted_when_needed() {
    let (info, _) = server(160000, false, false);
    let info = info.with_setting(crate::source::STATEMENTS_SCHEMA, "Monitoring");
    let options = QueryOptions::for_server(&info, 0);

    let views = Catalog::builtin().configure(&info, &options).unwrap();

    assert!(
        views
            .get("statements_general")
            .unwrap()
            .query
            .contains(r#"FROM "Monitoring".pg_stat_statements s"#)
    );
}
