use crate::catalog::QueryOptions;
use crate::catalog::definitions::{Variant, ViewDef};

pub(crate) const REPLICATION: ViewDef = ViewDef {
    name: "replication",
    description: "\
Connected standbys from pg_stat_replication. Byte lags are measured
against the local WAL position (the receive position on a standby).

  pid        walsender process id
  client     standby address, 'local' for unix sockets
  user       replication role
  name       application_name of the standby
  state      walsender state
  mode       sync, async, potential or quorum
  wal        local WAL position
  pending    bytes not yet sent
  write      bytes sent but not written on the standby
  flush      bytes written but not flushed
  replay     bytes flushed but not replayed
  total_lag  bytes between local position and replay
  write_lag  time until written (10+)
  flush_lag  time until flushed (10+)
  replay_lag time until replayed (10+)

No column is a rate; values are shown as sampled.",
    needs_statements: false,
    variants: &[
        Variant {
            since: 90600,
            columns: &[
                "pid", "client", "user", "name", "state", "mode", "wal", "pending", "write",
                "flush", "replay", "total_lag",
            ],
            diff: None,
            order_key: 11,
            order_desc: true,
            unique_key: 0,
            render: render_96,
        },
        Variant {
            since: 100000,
            columns: &[
                "pid", "client", "user", "name", "state", "mode", "wal", "pending", "write",
                "flush", "replay", "total_lag", "write_lag", "flush_lag", "replay_lag",
            ],
            diff: None,
            order_key: 11,
            order_desc: true,
            unique_key: 0,
            render: render_10,
        },
    ],
};

fn render_96(opts: &QueryOptions) -> String {
    format!(
        r#"SELECT pid,
    coalesce(host(client_addr), 'local') AS client,
    usename AS "user",
    application_name AS name,
    state,
    sync_state AS mode,
    {pos}() AS wal,
    {diff}({pos}(), sent_location) AS pending,
    {diff}(sent_location, write_location) AS write,
    {diff}(write_location, flush_location) AS flush,
    {diff}(flush_location, replay_location) AS replay,
    {diff}({pos}(), replay_location) AS total_lag
FROM pg_stat_replication
ORDER BY pid"#,
        pos = opts.wal_position_fn,
        diff = opts.wal_diff_fn,
    )
}

fn render_10(opts: &QueryOptions) -> String {
    format!(
        r#"SELECT pid,
    coalesce(host(client_addr), 'local') AS client,
    usename AS "user",
    application_name AS name,
    state,
    sync_state AS mode,
    {pos}() AS wal,
    {diff}({pos}(), sent_lsn) AS pending,
    {diff}(sent_lsn, write_lsn) AS write,
    {diff}(write_lsn, flush_lsn) AS flush,
    {diff}(flush_lsn, replay_lsn) AS replay,
    {diff}({pos}(), replay_lsn) AS total_lag,
    coalesce(date_trunc('milliseconds', write_lag), '0'::interval) AS write_lag,
    coalesce(date_trunc('milliseconds', flush_lag), '0'::interval) AS flush_lag,
    coalesce(date_trunc('milliseconds', replay_lag), '0'::interval) AS replay_lag
FROM pg_stat_replication
ORDER BY pid"#,
        pos = opts.wal_position_fn,
        diff = opts.wal_diff_fn,
    )
}
