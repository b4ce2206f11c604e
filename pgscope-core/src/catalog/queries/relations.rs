use crate::catalog::QueryOptions;
use crate::catalog::definitions::{Variant, ViewDef};

pub(crate) const TABLES: ViewDef = ViewDef {
    name: "tables",
    description: "\
Per-table access counters from pg_stat_user_tables and pg_statio_user_tables.

  relation     schema-qualified table name
  seq_scan     sequential scans/s
  seq_read     rows read by sequential scans/s
  idx_scan     index scans/s
  idx_fetch    rows fetched by index scans/s
  inserts      rows inserted/s
  updates      rows updated/s
  deletes      rows deleted/s
  hot_updates  HOT updates/s
  live         change in estimated live rows/s
  dead         change in estimated dead rows/s
  heap_read    heap blocks read/s
  heap_hit     heap blocks hit in shared buffers/s
  idx_read     index blocks read/s
  idx_hit      index blocks hit in shared buffers/s
  vacuums      manual and automatic vacuums/s
  analyzes     manual and automatic analyzes/s",
    needs_statements: false,
    variants: &[Variant {
        since: 90600,
        columns: &[
            "relation", "seq_scan", "seq_read", "idx_scan", "idx_fetch", "inserts", "updates",
            "deletes", "hot_updates", "live", "dead", "heap_read", "heap_hit", "idx_read",
            "idx_hit", "vacuums", "analyzes",
        ],
        diff: Some((1, 16)),
        order_key: 1,
        order_desc: true,
        unique_key: 0,
        render: render_tables,
    }],
};

pub(crate) const INDEXES: ViewDef = ViewDef {
    name: "indexes",
    description: "\
Per-index counters from pg_stat_user_indexes and pg_statio_user_indexes.

  index      schema.table.index
  idx_scan   scans initiated on the index/s
  tup_read   index entries returned/s
  tup_fetch  live table rows fetched/s
  reads      index blocks read/s
  hits       index blocks hit in shared buffers/s",
    needs_statements: false,
    variants: &[Variant {
        since: 90600,
        columns: &["index", "idx_scan", "tup_read", "tup_fetch", "reads", "hits"],
        diff: Some((1, 5)),
        order_key: 1,
        order_desc: true,
        unique_key: 0,
        render: render_indexes,
    }],
};

pub(crate) const FUNCTIONS: ViewDef = ViewDef {
    name: "functions",
    description: "\
Per-function counters from pg_stat_user_functions (needs track_functions).

  function    schema.name(oid)
  calls       calls/s
  total_t     time spent in the function and its callees, ms/s
  self_t      time spent in the function alone, ms/s
  avg_t       average total time per call, ms (as sampled)
  avg_self_t  average self time per call, ms (as sampled)",
    needs_statements: false,
    variants: &[Variant {
        since: 90600,
        columns: &["function", "calls", "total_t", "self_t", "avg_t", "avg_self_t"],
        diff: Some((1, 3)),
        order_key: 1,
        order_desc: true,
        unique_key: 0,
        render: render_functions,
    }],
};

pub(crate) const SIZES: ViewDef = ViewDef {
    name: "sizes",
    description: "\
Table sizes and how fast they change.

  relation      schema-qualified table name
  total_size    table, indexes and TOAST (as sampled)
  rel_size      main fork (as sampled)
  idx_size      all indexes (as sampled)
  total_change  growth of total size, KiB/s
  rel_change    growth of main fork, KiB/s
  idx_change    growth of indexes, KiB/s",
    needs_statements: false,
    variants: &[Variant {
        since: 90600,
        columns: &[
            "relation", "total_size", "rel_size", "idx_size", "total_change", "rel_change",
            "idx_change",
        ],
        diff: Some((4, 6)),
        order_key: 4,
        order_desc: true,
        unique_key: 0,
        render: render_sizes,
    }],
};

fn render_tables(_opts: &QueryOptions) -> String {
    r#"SELECT s.schemaname || '.' || s.relname AS relation,
    s.seq_scan,
    s.seq_tup_read AS seq_read,
    coalesce(s.idx_scan, 0) AS idx_scan,
    coalesce(s.idx_tup_fetch, 0) AS idx_fetch,
    s.n_tup_ins AS inserts,
    s.n_tup_upd AS updates,
    s.n_tup_del AS deletes,
    s.n_tup_hot_upd AS hot_updates,
    s.n_live_tup AS live,
    s.n_dead_tup AS dead,
    coalesce(io.heap_blks_read, 0) AS heap_read,
    coalesce(io.heap_blks_hit, 0) AS heap_hit,
    coalesce(io.idx_blks_read, 0) AS idx_read,
    coalesce(io.idx_blks_hit, 0) AS idx_hit,
    s.vacuum_count + s.autovacuum_count AS vacuums,
    s.analyze_count + s.autoanalyze_count AS analyzes
FROM pg_stat_user_tables s
JOIN pg_statio_user_tables io USING (relid)
ORDER BY 1"#
        .to_string()
}

fn render_indexes(_opts: &QueryOptions) -> String {
    r#"SELECT s.schemaname || '.' || s.relname || '.' || s.indexrelname AS "index",
    s.idx_scan,
    s.idx_tup_read AS tup_read,
    s.idx_tup_fetch AS tup_fetch,
    coalesce(io.idx_blks_read, 0) AS reads,
    coalesce(io.idx_blks_hit, 0) AS hits
FROM pg_stat_user_indexes s
JOIN pg_statio_user_indexes io USING (indexrelid)
ORDER BY 1"#
        .to_string()
}

fn render_functions(_opts: &QueryOptions) -> String {
    r#"SELECT schemaname || '.' || funcname || '(' || funcid || ')' AS "function",
    calls,
    round(total_time::numeric, 2) AS total_t,
    round(self_time::numeric, 2) AS self_t,
    round((total_time / greatest(calls, 1))::numeric, 4) AS avg_t,
    round((self_time / greatest(calls, 1))::numeric, 4) AS avg_self_t
FROM pg_stat_user_functions
ORDER BY 1"#
        .to_string()
}

fn render_sizes(_opts: &QueryOptions) -> String {
    r#"SELECT s.schemaname || '.' || s.relname AS relation,
    pg_size_pretty(pg_total_relation_size(s.relid)) AS total_size,
    pg_size_pretty(pg_relation_size(s.relid)) AS rel_size,
    pg_size_pretty(pg_indexes_size(s.relid)) AS idx_size,
    pg_total_relation_size(s.relid) / 1024 AS total_change,
    pg_relation_size(s.relid) / 1024 AS rel_change,
    pg_indexes_size(s.relid) / 1024 AS idx_change
FROM pg_stat_user_tables s
ORDER BY 1"#
        .to_string()
}
