use crate::catalog::QueryOptions;
use crate::catalog::definitions::{Variant, ViewDef};

pub(crate) const PROGRESS_VACUUM: ViewDef = ViewDef {
    name: "progress_vacuum",
    description: "\
Running VACUUM commands from pg_stat_progress_vacuum.

  pid         backend process id
  xact_age    time since the transaction started
  datname     database
  relation    table being vacuumed
  state       backend state
  waiting     wait event type, if any
  phase       current vacuum phase
  total       heap size, in blocks
  t_scanned   heap blocks scanned (as sampled)
  t_vacuumed  heap blocks vacuumed/s
  scanned     heap blocks scanned/s
  query       vacuum command text",
    needs_statements: false,
    variants: &[Variant {
        since: 90600,
        columns: &[
            "pid", "xact_age", "datname", "relation", "state", "waiting", "phase", "total",
            "t_scanned", "t_vacuumed", "scanned", "query",
        ],
        diff: Some((9, 10)),
        order_key: 1,
        order_desc: true,
        unique_key: 0,
        render: render_vacuum,
    }],
};

pub(crate) const PROGRESS_CLUSTER: ViewDef = ViewDef {
    name: "progress_cluster",
    description: "\
Running CLUSTER and VACUUM FULL commands from pg_stat_progress_cluster (12+).

  pid        backend process id
  xact_age   time since the transaction started
  datname    database
  relation   table being rewritten
  state      backend state
  waiting    wait event type, if any
  phase      current phase
  total      heap size, in blocks
  t_scanned  heap blocks scanned (as sampled)
  tup_scan   heap tuples scanned/s
  tup_write  heap tuples written/s
  query      command text",
    needs_statements: false,
    variants: &[Variant {
        since: 120000,
        columns: &[
            "pid", "xact_age", "datname", "relation", "state", "waiting", "phase", "total",
            "t_scanned", "tup_scan", "tup_write", "query",
        ],
        diff: Some((9, 10)),
        order_key: 1,
        order_desc: true,
        unique_key: 0,
        render: render_cluster,
    }],
};

pub(crate) const PROGRESS_INDEX: ViewDef = ViewDef {
    name: "progress_index",
    description: "\
Running CREATE INDEX and REINDEX commands from pg_stat_progress_create_index (12+).

  pid          backend process id
  xact_age     time since the transaction started
  datname      database
  relation     table being indexed
  index        index being built
  state        backend state
  phase        current phase
  total        blocks to process in this phase
  t_done       blocks processed (as sampled)
  blocks_done  blocks processed/s
  query        command text",
    needs_statements: false,
    variants: &[Variant {
        since: 120000,
        columns: &[
            "pid", "xact_age", "datname", "relation", "index", "state", "phase", "total",
            "t_done", "blocks_done", "query",
        ],
        diff: Some((8, 9)),
        order_key: 1,
        order_desc: true,
        unique_key: 0,
        render: render_index,
    }],
};

pub(crate) const PROGRESS_ANALYZE: ViewDef = ViewDef {
    name: "progress_analyze",
    description: "\
Running ANALYZE commands from pg_stat_progress_analyze (13+).

  pid          backend process id
  xact_age     time since the transaction started
  datname      database
  relation     table being analyzed
  state        backend state
  waiting      wait event type, if any
  phase        current phase
  total        heap blocks to sample
  child_total  child tables to process
  t_scanned    heap blocks scanned (as sampled)
  scanned      heap blocks scanned/s
  query        command text",
    needs_statements: false,
    variants: &[Variant {
        since: 130000,
        columns: &[
            "pid", "xact_age", "datname", "relation", "state", "waiting", "phase", "total",
            "child_total", "t_scanned", "scanned", "query",
        ],
        diff: Some((10, 10)),
        order_key: 1,
        order_desc: true,
        unique_key: 0,
        render: render_analyze,
    }],
};

pub(crate) const PROGRESS_BASEBACKUP: ViewDef = ViewDef {
    name: "progress_basebackup",
    description: "\
Running base backups from pg_stat_progress_basebackup (13+).

  pid         walsender process id
  client      client address, 'local' for unix sockets
  user        replication role
  state       walsender state
  phase       current phase
  total       estimated bytes to stream
  tbs_total   tablespaces to stream
  t_streamed  bytes streamed (as sampled)
  streamed    bytes streamed/s",
    needs_statements: false,
    variants: &[Variant {
        since: 130000,
        columns: &[
            "pid", "client", "user", "state", "phase", "total", "tbs_total", "t_streamed",
            "streamed",
        ],
        diff: Some((8, 8)),
        order_key: 0,
        order_desc: false,
        unique_key: 0,
        render: render_basebackup,
    }],
};

pub(crate) const PROGRESS_COPY: ViewDef = ViewDef {
    name: "progress_copy",
    description: "\
Running COPY commands from pg_stat_progress_copy (14+).

  pid          backend process id
  xact_age     time since the transaction started
  datname      database
  relation     table copied to or from, if any
  state        backend state
  command      COPY FROM or COPY TO
  type         FILE, PROGRAM, PIPE or CALLBACK
  t_bytes      bytes processed (as sampled)
  bytes        bytes processed/s
  tuples       tuples processed/s
  query        command text",
    needs_statements: false,
    variants: &[Variant {
        since: 140000,
        columns: &[
            "pid", "xact_age", "datname", "relation", "state", "command", "type", "t_bytes",
            "bytes", "tuples", "query",
        ],
        diff: Some((8, 9)),
        order_key: 1,
        order_desc: true,
        unique_key: 0,
        render: render_copy,
    }],
};

fn render_vacuum(opts: &QueryOptions) -> String {
    format!(
        r#"SELECT p.pid,
    date_trunc('seconds', clock_timestamp() - a.xact_start) AS xact_age,
    p.datname,
    p.relid::regclass AS relation,
    a.state,
    a.wait_event_type AS waiting,
    p.phase,
    p.heap_blks_total AS total,
    p.heap_blks_scanned AS t_scanned,
    p.heap_blks_vacuumed AS t_vacuumed,
    p.heap_blks_scanned AS scanned,
    {query} AS query
FROM pg_stat_progress_vacuum p
JOIN pg_stat_activity a ON a.pid = p.pid
ORDER BY 2 DESC"#,
        query = opts.query_text("a.query"),
    )
}

fn render_cluster(opts: &QueryOptions) -> String {
    format!(
        r#"SELECT p.pid,
    date_trunc('seconds', clock_timestamp() - a.xact_start) AS xact_age,
    p.datname,
    p.relid::regclass AS relation,
    a.state,
    a.wait_event_type AS waiting,
    p.phase,
    p.heap_blks_total AS total,
    p.heap_blks_scanned AS t_scanned,
    p.heap_tuples_scanned AS tup_scan,
    p.heap_tuples_written AS tup_write,
    {query} AS query
FROM pg_stat_progress_cluster p
JOIN pg_stat_activity a ON a.pid = p.pid
ORDER BY 2 DESC"#,
        query = opts.query_text("a.query"),
    )
}

fn render_index(opts: &QueryOptions) -> String {
    format!(
        r#"SELECT p.pid,
    date_trunc('seconds', clock_timestamp() - a.xact_start) AS xact_age,
    p.datname,
    p.relid::regclass AS relation,
    p.index_relid::regclass AS "index",
    a.state,
    p.phase,
    p.blocks_total AS total,
    p.blocks_done AS t_done,
    p.blocks_done,
    {query} AS query
FROM pg_stat_progress_create_index p
JOIN pg_stat_activity a ON a.pid = p.pid
ORDER BY 2 DESC"#,
        query = opts.query_text("a.query"),
    )
}

fn render_analyze(opts: &QueryOptions) -> String {
    format!(
        r#"SELECT p.pid,
    date_trunc('seconds', clock_timestamp() - a.xact_start) AS xact_age,
    p.datname,
    p.relid::regclass AS relation,
    a.state,
    a.wait_event_type AS waiting,
    p.phase,
    p.sample_blks_total AS total,
    p.child_tables_total AS child_total,
    p.sample_blks_scanned AS t_scanned,
    p.sample_blks_scanned AS scanned,
    {query} AS query
FROM pg_stat_progress_analyze p
JOIN pg_stat_activity a ON a.pid = p.pid
ORDER BY 2 DESC"#,
        query = opts.query_text("a.query"),
    )
}

fn render_basebackup(_opts: &QueryOptions) -> String {
    r#"SELECT p.pid,
    coalesce(host(a.client_addr), 'local') AS client,
    a.usename AS "user",
    a.state,
    p.phase,
    coalesce(p.backup_total, 0) AS total,
    p.tablespaces_total AS tbs_total,
    p.backup_streamed AS t_streamed,
    p.backup_streamed AS streamed
FROM pg_stat_progress_basebackup p
JOIN pg_stat_activity a ON a.pid = p.pid
ORDER BY 1"#
        .to_string()
}

fn render_copy(opts: &QueryOptions) -> String {
    format!(
        r#"SELECT p.pid,
    date_trunc('seconds', clock_timestamp() - a.xact_start) AS xact_age,
    p.datname,
    coalesce(p.relid::regclass::text, '') AS relation,
    a.state,
    p.command,
    p.type,
    p.bytes_processed AS t_bytes,
    p.bytes_processed AS bytes,
    p.tuples_processed AS tuples,
    {query} AS query
FROM pg_stat_progress_copy p
JOIN pg_stat_activity a ON a.pid = p.pid
ORDER BY 2 DESC"#,
        query = opts.query_text("a.query"),
    )
}
