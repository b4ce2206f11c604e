use crate::catalog::QueryOptions;
use crate::catalog::definitions::{Variant, ViewDef};

pub(crate) const DATABASES_GENERAL: ViewDef = ViewDef {
    name: "databases_general",
    description: "\
Per-database counters from pg_stat_database.

  datname     database name ('__shared' for shared catalogs, 12+)
  backends    connected sessions (as sampled)
  commits     committed transactions/s
  rollbacks   rolled back transactions/s
  reads       blocks read from disk or OS cache/s
  hits        blocks found in shared buffers/s
  returned    rows returned by scans/s
  fetched     rows fetched by index scans/s
  inserts     rows inserted/s
  updates     rows updated/s
  deletes     rows deleted/s
  conflicts   queries cancelled by recovery conflicts/s
  deadlocks   deadlocks detected/s
  csum_fails  data page checksum failures/s (12+)
  temp_files  temporary files created/s
  temp_bytes  bytes written to temporary files/s
  read_t      time spent reading blocks, ms/s
  write_t     time spent writing blocks, ms/s
  stats_age   time since statistics were reset",
    needs_statements: false,
    variants: &[
        Variant {
            since: 90600,
            columns: &[
                "datname", "backends", "commits", "rollbacks", "reads", "hits", "returned",
                "fetched", "inserts", "updates", "deletes", "conflicts", "deadlocks",
                "temp_files", "temp_bytes", "read_t", "write_t", "stats_age",
            ],
            diff: Some((2, 16)),
            order_key: 2,
            order_desc: true,
            unique_key: 0,
            render: render_general_96,
        },
        Variant {
            since: 120000,
            columns: &[
                "datname", "backends", "commits", "rollbacks", "reads", "hits", "returned",
                "fetched", "inserts", "updates", "deletes", "conflicts", "deadlocks",
                "csum_fails", "temp_files", "temp_bytes", "read_t", "write_t", "stats_age",
            ],
            diff: Some((2, 17)),
            order_key: 2,
            order_desc: true,
            unique_key: 0,
            render: render_general_12,
        },
    ],
};

pub(crate) const DATABASES_SESSIONS: ViewDef = ViewDef {
    name: "databases_sessions",
    description: "\
Per-database session accounting from pg_stat_database (14+).

  datname      database name
  session_t    time spent by sessions, ms/s
  active_t     time spent executing statements, ms/s
  idle_xact_t  time spent idle in transaction, ms/s
  sessions     sessions established/s
  abandoned    sessions ended by lost client connection/s
  fatal        sessions ended by fatal errors/s
  killed       sessions terminated by operator/s",
    needs_statements: false,
    variants: &[Variant {
        since: 140000,
        columns: &[
            "datname", "session_t", "active_t", "idle_xact_t", "sessions", "abandoned",
            "fatal", "killed",
        ],
        diff: Some((1, 7)),
        order_key: 1,
        order_desc: true,
        unique_key: 0,
        render: render_sessions,
    }],
};

fn render_general_96(_opts: &QueryOptions) -> String {
    r#"SELECT datname,
    numbackends AS backends,
    xact_commit AS commits,
    xact_rollback AS rollbacks,
    blks_read AS reads,
    blks_hit AS hits,
    tup_returned AS returned,
    tup_fetched AS fetched,
    tup_inserted AS inserts,
    tup_updated AS updates,
    tup_deleted AS deletes,
    conflicts,
    deadlocks,
    temp_files,
    temp_bytes,
    round(blk_read_time::numeric, 2) AS read_t,
    round(blk_write_time::numeric, 2) AS write_t,
    date_trunc('seconds', now() - stats_reset) AS stats_age
FROM pg_stat_database
ORDER BY datname"#
        .to_string()
}

fn render_general_12(_opts: &QueryOptions) -> String {
    r#"SELECT coalesce(datname, '__shared') AS datname,
    numbackends AS backends,
    xact_commit AS commits,
    xact_rollback AS rollbacks,
    blks_read AS reads,
    blks_hit AS hits,
    tup_returned AS returned,
    tup_fetched AS fetched,
    tup_inserted AS inserts,
    tup_updated AS updates,
    tup_deleted AS deletes,
    conflicts,
    deadlocks,
    coalesce(checksum_failures, 0) AS csum_fails,
    temp_files,
    temp_bytes,
    round(blk_read_time::numeric, 2) AS read_t,
    round(blk_write_time::numeric, 2) AS write_t,
    date_trunc('seconds', now() - stats_reset) AS stats_age
FROM pg_stat_database
ORDER BY datname"#
        .to_string()
}

fn render_sessions(_opts: &QueryOptions) -> String {
    r#"SELECT coalesce(datname, '__shared') AS datname,
    round(session_time::numeric, 2) AS session_t,
    round(active_time::numeric, 2) AS active_t,
    round(idle_in_transaction_time::numeric, 2) AS idle_xact_t,
    sessions,
    sessions_abandoned AS abandoned,
    sessions_fatal AS fatal,
    sessions_killed AS killed
FROM pg_stat_database
ORDER BY datname"#
        .to_string()
}
