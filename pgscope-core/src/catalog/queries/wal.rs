use crate::catalog::QueryOptions;
use crate::catalog::definitions::{Variant, ViewDef};

pub(crate) const WAL: ViewDef = ViewDef {
    name: "wal",
    description: "\
WAL generation from pg_stat_wal (14+). The single row is keyed by the
statistics reset time, so a reset starts a fresh baseline.

  stats_reset   when the counters were last reset
  records       WAL records generated/s
  fpi           full page images generated/s
  bytes         WAL bytes generated/s
  buffers_full  times WAL buffers were full and had to be written/s
  write         WAL buffer writes/s (14-17)
  sync          WAL file syncs/s (14-17)
  write_t       time spent writing WAL, ms/s (14-17)
  sync_t        time spent syncing WAL, ms/s (14-17)",
    needs_statements: false,
    variants: &[
        Variant {
            since: 140000,
            columns: &[
                "stats_reset", "records", "fpi", "bytes", "buffers_full", "write", "sync",
                "write_t", "sync_t",
            ],
            diff: Some((1, 8)),
            order_key: 1,
            order_desc: true,
            unique_key: 0,
            render: render_14,
        },
        Variant {
            since: 180000,
            columns: &["stats_reset", "records", "fpi", "bytes", "buffers_full"],
            diff: Some((1, 4)),
            order_key: 1,
            order_desc: true,
            unique_key: 0,
            render: render_18,
        },
    ],
};

fn render_14(_opts: &QueryOptions) -> String {
    r#"SELECT coalesce(date_trunc('seconds', stats_reset)::text, 'never') AS stats_reset,
    wal_records AS records,
    wal_fpi AS fpi,
    wal_bytes AS bytes,
    wal_buffers_full AS buffers_full,
    wal_write AS write,
    wal_sync AS sync,
    round(wal_write_time::numeric, 2) AS write_t,
    round(wal_sync_time::numeric, 2) AS sync_t
FROM pg_stat_wal"#
        .to_string()
}

fn render_18(_opts: &QueryOptions) -> String {
    r#"SELECT coalesce(date_trunc('seconds', stats_reset)::text, 'never') AS stats_reset,
    wal_records AS records,
    wal_fpi AS fpi,
    wal_bytes AS bytes,
    wal_buffers_full AS buffers_full
FROM pg_stat_wal"#
        .to_string()
}
