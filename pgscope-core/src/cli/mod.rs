//! Subcommands behind the `pgscope` binary.
//!
//! Each subcommand layers its flags over the config file, checks the result
//! and drives the core. Connecting to the server and turning Ctrl-C into a
//! stop message are left to the binary.

pub mod describe;
pub mod record;
pub mod report;

#[cfg(test)]
mod tests;

use crate::config::{CONNINFO_ENV, parse_duration, parse_filter, parse_time};
use chrono::NaiveDateTime;
use clap::{Args, Subcommand};
use regex::Regex;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Sample every statistics view into an archive
    Record(RecordArgs),

    /// Replay one view from an archive as per-second rates
    Report(ReportArgs),

    /// Explain the columns of a view
    Describe(DescribeArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct RecordArgs {
    /// Archive to write [default: pgscope.stat.tar]
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Time between samples, at least one second, e.g. 5, 1s, 2m [default: 1s]
    #[arg(short, long, value_parser = parse_duration)]
    pub interval: Option<Duration>,

    /// Number of samples to take; runs until interrupted when omitted
    #[arg(short, long)]
    pub count: Option<u64>,

    /// Append to an existing archive instead of replacing it
    #[arg(short, long)]
    pub append: bool,

    /// Longest query text to store, 0 for the full text
    #[arg(long)]
    pub query_length: Option<usize>,

    /// TOML config file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// libpq connection string, e.g. "host=localhost user=postgres"
    #[arg(long, env = CONNINFO_ENV, hide_env_values = true)]
    pub conninfo: Option<String>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct ReportArgs {
    /// View to replay, see `pgscope describe`
    pub view: String,

    /// Archive to read [default: pgscope.stat.tar]
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Skip samples before this time (YYYYMMDD-hhmmss, "YYYY-MM-DD hh:mm:ss" or hh:mm:ss)
    #[arg(short, long, value_parser = parse_time)]
    pub start: Option<NaiveDateTime>,

    /// Skip samples after this time
    #[arg(short, long, value_parser = parse_time)]
    pub end: Option<NaiveDateTime>,

    /// Normalize deltas to this period [default: 1s]
    #[arg(short = 'R', long, value_parser = parse_duration)]
    pub rate: Option<Duration>,

    /// Column to order rows by
    #[arg(short, long)]
    pub order: Option<String>,

    /// Order descending
    #[arg(long, conflicts_with = "asc")]
    pub desc: bool,

    /// Order ascending
    #[arg(long)]
    pub asc: bool,

    /// Only show rows whose column matches, as COLUMN:REGEX
    #[arg(short = 'g', long, value_parser = parse_filter)]
    pub filter: Option<(String, Regex)>,

    /// Rows per sample, 0 for all
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Longest value shown, 0 to never truncate [default: 32]
    #[arg(short, long)]
    pub truncate: Option<usize>,

    /// TOML config file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct DescribeArgs {
    /// View to describe; lists every view when omitted
    pub view: Option<String>,
}
