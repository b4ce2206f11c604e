use crate::catalog::{Catalog, CatalogError};
use crate::matrix::tests::matrix;
use pretty_assertions::assert_eq;
use regex::Regex;

#[test]
fn order_override_by_name() {
    let mut view = Catalog::builtin().view("tables").unwrap();

    view.set_order("dead", false).unwrap();
    assert_eq!(view.order_key, 10);
    assert!(!view.order_desc);

    let err = view.set_order("bogus", true).unwrap_err();
    assert!(matches!(err, CatalogError::UnknownColumn { .. }));
}

#[test]
fn filter_rejects_null_and_non_matching_rows() {
    let mut view = Catalog::builtin().view("activity").unwrap();
    view.set_filter("user", Regex::new("^app").unwrap()).unwrap();

    let row = |user: Option<&str>| -> Vec<Option<String>> {
        let mut r = vec![Some("1".to_string()); view.column_count];
        r[2] = user.map(str::to_string);
        r
    };

    assert!(view.accepts(&row(Some("app_rw"))));
    assert!(!view.accepts(&row(Some("postgres"))));
    assert!(!view.accepts(&row(None)));
}

#[test]
fn alignment_is_computed_once_per_session() {
    let mut view = Catalog::builtin().view("indexes").unwrap();
    let cols = ["index", "idx_scan", "tup_read", "tup_fetch", "reads", "hits"];

    let mut empty = matrix(&cols, &[]);
    view.align_once(&mut empty, 32, true);
    assert!(!view.aligned);

    let mut first = matrix(
        &cols,
        &[&[Some("public.t.t_pkey"), Some("1"), Some("1"), Some("1"), Some("1"), Some("1")]],
    );
    view.align_once(&mut first, 32, true);
    assert!(view.aligned);
    assert_eq!(view.widths[0], 15);

    let mut second = matrix(
        &cols,
        &[&[
            Some("public.longer_table.longer_index"),
            Some("1"),
            Some("1"),
            Some("1"),
            Some("1"),
            Some("1"),
        ]],
    );
    view.align_once(&mut second, 32, true);
    assert_eq!(view.widths[0], 15);
}
