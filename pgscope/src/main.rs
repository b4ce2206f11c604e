use anyhow::{Context, Result};
use clap::Parser;
use pgscope_core::cli::{self, Command};
use pgscope_core::logging::{LogFormat, default_log_format, init_logging};
use std::io;
use std::sync::mpsc;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "pgscope",
    version,
    about = "pgscope: record and replay PostgreSQL statistics"
)]
struct Cli {
    /// Log format for stderr [default: text on a terminal, json otherwise]
    #[arg(long, global = true, value_enum)]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Command,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_format.unwrap_or_else(default_log_format));

    if let Err(err) = run(cli.command) {
        eprintln!("pgscope: {err:#}");
        std::process::exit(1);
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Record(args) => {
            let (stop_tx, stop_rx) = mpsc::channel();
            ctrlc::set_handler(move || {
                info!("interrupted, stopping after the current sample");
                let _ = stop_tx.send(());
            })
            .context("failed to install the Ctrl-C handler")?;

            cli::record::run(args, &stop_rx)
        }
        Command::Report(args) => cli::report::run(args),
        Command::Describe(args) => cli::describe::run(&args, &mut io::stdout().lock()),
    }
}
