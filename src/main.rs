mod cli;
mod config;
mod convert;
mod derive_cmd;
mod logging;
mod render;
mod table_cmd;

use std::process;

use anyhow::Result;
use clap::Parser;

use crate::cli::{Cli, Command};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Derive(args) => derive_cmd::run(args),
        Command::Table(args) => table_cmd::run(args),
    }
}
