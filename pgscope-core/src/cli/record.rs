use crate::archive::{Recorder, Schedule};
use crate::catalog::{Catalog, QueryOptions};
use crate::cli::RecordArgs;
use crate::config::{PgscopeConfig, RecordConfig};
use crate::source::{ServerInfo, StatSource};
use anyhow::{Context, Result};
use postgres::{Client, NoTls};
use std::sync::mpsc::Receiver;
use tracing::info;

/// Merge flags into the config file's `[record]` section.
pub fn resolve(args: &RecordArgs) -> Result<(RecordConfig, String)> {
    let config = PgscopeConfig::load(args.config.as_deref())?;
    let mut record = config.record;

    if let Some(file) = &args.file {
        record.file = file.clone();
    }
    if let Some(interval) = args.interval {
        record.interval = interval;
    }
    if args.count.is_some() {
        record.count = args.count;
    }
    if args.append {
        record.append = true;
    }
    if let Some(length) = args.query_length {
        record.query_length = length;
    }
    record.validate()?;

    let conninfo = config.connection.resolve(args.conninfo.as_deref())?;
    Ok((record, conninfo))
}

pub fn run(args: RecordArgs, stop: &Receiver<()>) -> Result<()> {
    let (config, conninfo) = resolve(&args)?;

    let mut client = Client::connect(&conninfo, NoTls).context("failed to connect to the server")?;
    record_with(&mut client, &config, stop)?;
    Ok(())
}

/// Record from an already open source until the schedule ends or `stop` fires.
pub fn record_with<S: StatSource + ?Sized>(
    source: &mut S,
    config: &RecordConfig,
    stop: &Receiver<()>,
) -> Result<u64> {
    let server = ServerInfo::fetch(source).context("failed to read server metadata")?;
    let options = QueryOptions::for_server(&server, config.query_length);
    let views = Catalog::builtin()
        .configure(&server, &options)
        .context("failed to prepare statistics views")?;

    info!(
        server = %server.version(),
        recovery = server.recovery,
        views = views.len(),
        file = %config.file.display(),
        "recording"
    );

    let mut recorder = Recorder::open(&config.file, config.append)?;
    let schedule = Schedule {
        interval: config.interval,
        count: config.count,
    };

    let outcome = recorder.run(source, &views, schedule, stop);
    let closed = recorder.close();
    let written = outcome?;
    closed?;

    info!(samples = written, "recording finished");
    Ok(written)
}
