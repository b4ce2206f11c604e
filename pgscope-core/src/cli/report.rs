use crate::archive::{ReportRequest, ReportSummary, Reporter};
use crate::catalog::Catalog;
use crate::cli::ReportArgs;
use crate::config::{PgscopeConfig, ReportConfig};
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufReader, BufWriter, IsTerminal, Read, Write};
use std::path::Path;
use tracing::debug;

/// Merge flags into the config file's `[report]` section.
pub fn resolve(args: &ReportArgs) -> Result<ReportConfig> {
    let mut report = PgscopeConfig::load(args.config.as_deref())?.report;

    if let Some(file) = &args.file {
        report.file = file.clone();
    }
    if let Some(rate) = args.rate {
        report.rate = rate;
    }
    if let Some(limit) = args.limit {
        report.limit = limit;
    }
    if let Some(truncate) = args.truncate {
        report.truncate = truncate;
    }
    report.validate()?;

    Ok(report)
}

/// Build the reporter's request from flags and resolved settings.
pub fn request(args: &ReportArgs, config: &ReportConfig) -> ReportRequest {
    let descending = match (args.desc, args.asc) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    };

    ReportRequest {
        start: args.start,
        end: args.end,
        rate: config.rate,
        order: args.order.clone(),
        descending,
        filter: args.filter.clone(),
        limit: config.limit,
        truncate: config.truncate,
        header_every: config.header_every,
        ..ReportRequest::new(&args.view, config.file.display().to_string())
    }
}

pub fn run(args: ReportArgs) -> Result<()> {
    let config = resolve(&args)?;
    let mut request = request(&args, &config);
    request.color = io::stdout().is_terminal();

    let file = open(&config.file)?;
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    let summary = report_to(request, BufReader::new(file), &mut out)?;
    out.flush().context("failed to write report")?;

    debug!(?summary, "report written");
    Ok(())
}

/// Replay an archive from `reader` into `out`.
pub fn report_to<R: Read, W: Write>(
    request: ReportRequest,
    reader: R,
    out: &mut W,
) -> Result<ReportSummary> {
    let mut reporter = Reporter::new(request, &Catalog::builtin())?;
    Ok(reporter.run(reader, out)?)
}

fn open(path: &Path) -> Result<File> {
    File::open(path).with_context(|| format!("failed to open archive {}", path.display()))
}
