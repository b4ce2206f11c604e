//! SQL for every view variant, grouped by the system views they read.

pub(crate) mod activity;
pub(crate) mod databases;
pub(crate) mod progress;
pub(crate) mod relations;
pub(crate) mod replication;
pub(crate) mod statements;
pub(crate) mod wal;
