mod report_tests;

use crate::cli::Command;
use clap::Parser;

#[derive(Parser, Debug)]
struct TestCli {
    #[command(subcommand)]
    command: Command,
}

pub(crate) fn parse(args: &[&str]) -> Result<Command, clap::Error> {
    TestCli::try_parse_from(std::iter::once("pgscope").chain(args.iter().copied()))
        .map(|cli| cli.command)
}
