use crate::catalog::QueryOptions;
use crate::catalog::definitions::{Variant, ViewDef};

pub(crate) const ACTIVITY: ViewDef = ViewDef {
    name: "activity",
    description: "\
Sessions from pg_stat_activity, excluding pgscope's own connection.

  pid         backend process id
  client      client address, 'local' for unix sockets
  user        role name
  database    database name
  state       session state
  type        backend type (10+)
  wait_etype  wait event type
  wait_event  wait event name
  xact_age    time since the current transaction started
  query_age   time since the current query started
  change_age  time since the state last changed
  query       current or last query text

No column is a rate; values are shown as sampled.",
    needs_statements: false,
    variants: &[
        Variant {
            since: 90600,
            columns: &[
                "pid", "client", "user", "database", "state", "wait_etype", "wait_event",
                "xact_age", "query_age", "change_age", "query",
            ],
            diff: None,
            order_key: 7,
            order_desc: true,
            unique_key: 0,
            render: render_96,
        },
        Variant {
            since: 100000,
            columns: &[
                "pid", "client", "user", "database", "state", "type", "wait_etype",
                "wait_event", "xact_age", "query_age", "change_age", "query",
            ],
            diff: None,
            order_key: 8,
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
    datname AS database,
    state,
    wait_event_type AS wait_etype,
    wait_event,
    date_trunc('seconds', clock_timestamp() - xact_start) AS xact_age,
    date_trunc('seconds', clock_timestamp() - query_start) AS query_age,
    date_trunc('seconds', clock_timestamp() - state_change) AS change_age,
    {query} AS query
FROM pg_stat_activity
WHERE pid <> pg_backend_pid()
ORDER BY pid"#,
        query = opts.query_text("query"),
    )
}

fn render_10(opts: &QueryOptions) -> String {
    format!(
        r#"SELECT pid,
    coalesce(host(client_addr), 'local') AS client,
    usename AS "user",
    datname AS database,
    state,
    backend_type AS type,
    wait_event_type AS wait_etype,
    wait_event,
    date_trunc('seconds', clock_timestamp() - xact_start) AS xact_age,
    date_trunc('seconds', clock_timestamp() - query_start) AS query_age,
    date_trunc('seconds', clock_timestamp() - state_change) AS change_age,
    {query} AS query
FROM pg_stat_activity
WHERE pid <> pg_backend_pid()
ORDER BY pid"#,
        query = opts.query_text("query"),
    )
}
