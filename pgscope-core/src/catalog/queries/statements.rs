use crate::catalog::QueryOptions;
use crate::catalog::definitions::{Variant, ViewDef};

const QUERY_ID: &str = "left(md5(s.userid::text || s.dbid::text || s.queryid::text), 10)";

pub(crate) const STATEMENTS_TIMINGS: ViewDef = ViewDef {
    name: "statements_timings",
    description: "\
Statement timings from pg_stat_statements.

  queryid         short hash of user, database and query id
  database        database name
  user            role name
  calls           executions/s
  total_t         execution time, ms/s (before 13)
  plans           planning runs/s (13+)
  total_plan_t    planning time, ms/s (13+)
  total_exec_t    execution time, ms/s (13+)
  read_t          time reading blocks, ms/s (before 17)
  write_t         time writing blocks, ms/s (before 17)
  shared_read_t   time reading shared blocks, ms/s (17+)
  shared_write_t  time writing shared blocks, ms/s (17+)
  local_read_t    time reading local blocks, ms/s (17+)
  local_write_t   time writing local blocks, ms/s (17+)
  query           normalized query text",
    needs_statements: true,
    variants: &[
        Variant {
            since: 90600,
            columns: &[
                "queryid", "database", "user", "calls", "total_t", "read_t", "write_t", "query",
            ],
            diff: Some((3, 6)),
            order_key: 4,
            order_desc: true,
            unique_key: 0,
            render: render_timings_96,
        },
        Variant {
            since: 130000,
            columns: &[
                "queryid", "database", "user", "calls", "plans", "total_plan_t", "total_exec_t",
                "read_t", "write_t", "query",
            ],
            diff: Some((3, 8)),
            order_key: 6,
            order_desc: true,
            unique_key: 0,
            render: render_timings_13,
        },
        Variant {
            since: 170000,
            columns: &[
                "queryid", "database", "user", "calls", "plans", "total_plan_t", "total_exec_t",
                "shared_read_t", "shared_write_t", "local_read_t", "local_write_t", "query",
            ],
            diff: Some((3, 10)),
            order_key: 6,
            order_desc: true,
            unique_key: 0,
            render: render_timings_17,
        },
    ],
};

pub(crate) const STATEMENTS_GENERAL: ViewDef = ViewDef {
    name: "statements_general",
    description: "\
Statement call and row counts from pg_stat_statements.

  queryid   short hash of user, database and query id
  database  database name
  user      role name
  calls     executions/s
  rows      rows retrieved or affected/s
  query     normalized query text",
    needs_statements: true,
    variants: &[Variant {
        since: 90600,
        columns: &["queryid", "database", "user", "calls", "rows", "query"],
        diff: Some((3, 4)),
        order_key: 3,
        order_desc: true,
        unique_key: 0,
        render: render_general,
    }],
};

pub(crate) const STATEMENTS_IO: ViewDef = ViewDef {
    name: "statements_io",
    description: "\
Statement shared buffer usage from pg_stat_statements.

  queryid   short hash of user, database and query id
  database  database name
  user      role name
  hit       shared blocks hit/s
  read      shared blocks read/s
  dirtied   shared blocks dirtied/s
  written   shared blocks written/s
  query     normalized query text",
    needs_statements: true,
    variants: &[Variant {
        since: 90600,
        columns: &["queryid", "database", "user", "hit", "read", "dirtied", "written", "query"],
        diff: Some((3, 6)),
        order_key: 4,
        order_desc: true,
        unique_key: 0,
        render: render_io,
    }],
};

pub(crate) const STATEMENTS_TEMP: ViewDef = ViewDef {
    name: "statements_temp",
    description: "\
Statement temporary file usage from pg_stat_statements.

  queryid       short hash of user, database and query id
  database      database name
  user          role name
  temp_read     temp blocks read/s
  temp_written  temp blocks written/s
  query         normalized query text",
    needs_statements: true,
    variants: &[Variant {
        since: 90600,
        columns: &["queryid", "database", "user", "temp_read", "temp_written", "query"],
        diff: Some((3, 4)),
        order_key: 4,
        order_desc: true,
        unique_key: 0,
        render: render_temp,
    }],
};

pub(crate) const STATEMENTS_LOCAL: ViewDef = ViewDef {
    name: "statements_local",
    description: "\
Statement local (temporary table) buffer usage from pg_stat_statements.

  queryid   short hash of user, database and query id
  database  database name
  user      role name
  hit       local blocks hit/s
  read      local blocks read/s
  dirtied   local blocks dirtied/s
  written   local blocks written/s
  query     normalized query text",
    needs_statements: true,
    variants: &[Variant {
        since: 90600,
        columns: &["queryid", "database", "user", "hit", "read", "dirtied", "written", "query"],
        diff: Some((3, 6)),
        order_key: 4,
        order_desc: true,
        unique_key: 0,
        render: render_local,
    }],
};

pub(crate) const STATEMENTS_WAL: ViewDef = ViewDef {
    name: "statements_wal",
    description: "\
Statement WAL generation from pg_stat_statements (13+).

  queryid      short hash of user, database and query id
  database     database name
  user         role name
  wal_records  WAL records generated/s
  wal_fpi      full page images generated/s
  wal_bytes    WAL bytes generated/s
  query        normalized query text",
    needs_statements: true,
    variants: &[Variant {
        since: 130000,
        columns: &["queryid", "database", "user", "wal_records", "wal_fpi", "wal_bytes", "query"],
        diff: Some((3, 5)),
        order_key: 5,
        order_desc: true,
        unique_key: 0,
        render: render_wal,
    }],
};

/// Wrap the per-view select list with the identity columns, joins and query text.
fn statements_query(opts: &QueryOptions, counters: &str) -> String {
    format!(
        r#"SELECT {QUERY_ID} AS queryid,
    d.datname AS database,
    r.rolname AS "user",
    {counters},
    {query} AS query
FROM {relation} s
JOIN pg_database d ON d.oid = s.dbid
JOIN pg_roles r ON r.oid = s.userid
ORDER BY 1"#,
        query = opts.query_text("s.query"),
        relation = opts.statements_relation(),
    )
}

fn render_timings_96(opts: &QueryOptions) -> String {
    statements_query(
        opts,
        "s.calls,
    round(s.total_time::numeric, 2) AS total_t,
    round(s.blk_read_time::numeric, 2) AS read_t,
    round(s.blk_write_time::numeric, 2) AS write_t",
    )
}

fn render_timings_13(opts: &QueryOptions) -> String {
    statements_query(
        opts,
        "s.calls,
    s.plans,
    round(s.total_plan_time::numeric, 2) AS total_plan_t,
    round(s.total_exec_time::numeric, 2) AS total_exec_t,
    round(s.blk_read_time::numeric, 2) AS read_t,
    round(s.blk_write_time::numeric, 2) AS write_t",
    )
}

fn render_timings_17(opts: &QueryOptions) -> String {
    statements_query(
        opts,
        "s.calls,
    s.plans,
    round(s.total_plan_time::numeric, 2) AS total_plan_t,
    round(s.total_exec_time::numeric, 2) AS total_exec_t,
    round(s.shared_blk_read_time::numeric, 2) AS shared_read_t,
    round(s.shared_blk_write_time::numeric, 2) AS shared_write_t,
    round(s.local_blk_read_time::numeric, 2) AS local_read_t,
    round(s.local_blk_write_time::numeric, 2) AS local_write_t",
    )
}

fn render_general(opts: &QueryOptions) -> String {
    statements_query(opts, "s.calls,\n    s.rows")
}

fn render_io(opts: &QueryOptions) -> String {
    statements_query(
        opts,
        "s.shared_blks_hit AS hit,
    s.shared_blks_read AS read,
    s.shared_blks_dirtied AS dirtied,
    s.shared_blks_written AS written",
    )
}

fn render_local(opts: &QueryOptions) -> String {
    statements_query(
        opts,
        "s.local_blks_hit AS hit,
    s.local_blks_read AS read,
    s.local_blks_dirtied AS dirtied,
    s.local_blks_written AS written",
    )
}

fn render_temp(opts: &QueryOptions) -> String {
    statements_query(
        opts,
        "s.temp_blks_read AS temp_read,\n    s.temp_blks_written AS temp_written",
    )
}

fn render_wal(opts: &QueryOptions) -> String {
    statements_query(opts, "s.wal_records,\n    s.wal_fpi,\n    s.wal_bytes")
}
