use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Daubechies scaling-filter coefficient generator.
#[derive(Parser)]
#[command(
    name = "daub",
    version,
    about = "Derive Daubechies scaling-filter coefficients at arbitrary precision"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Derive and print the coefficients of a single filter.
    Derive(DeriveArgs),
    /// Derive a range of orders and write one source fragment per order.
    Table(TableArgs),
}

/// Arguments for the `derive` subcommand.
#[derive(clap::Args)]
pub struct DeriveArgs {
    /// Filter name: `haar`, `d4`, `daub08` or a bare coefficient count.
    pub filter: String,

    /// Path to TOML configuration file. Defaults apply if it does not exist.
    #[arg(short, long, default_value = "daub.toml")]
    pub config: PathBuf,

    /// Override working precision in bits from config.
    #[arg(short, long)]
    pub bits: Option<u32>,

    /// Override number of significant digits printed.
    #[arg(short, long)]
    pub digits: Option<usize>,

    /// Verify the scaling-filter identities before printing.
    #[arg(long)]
    pub check: bool,
}

/// Arguments for the `table` subcommand.
#[derive(clap::Args)]
pub struct TableArgs {
    /// Path to TOML configuration file. Defaults apply if it does not exist.
    #[arg(short, long, default_value = "daub.toml")]
    pub config: PathBuf,

    /// Override output directory from config.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Override smallest order (coefficient count) from config.
    #[arg(long)]
    pub min: Option<usize>,

    /// Override largest order (coefficient count) from config.
    #[arg(long)]
    pub max: Option<usize>,
}
