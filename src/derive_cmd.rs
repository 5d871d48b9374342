//! Derive command: print the coefficients of one filter.

use std::io::Write;

use anyhow::{Context, Result, bail};
use tracing::{info, info_span};

use daub_wavelet::{ScalingFilter, daubechies};

use crate::cli::DeriveArgs;
use crate::config::DaubConfig;
use crate::convert;

/// Slack, in bits, allowed on top of the output precision when checking the
/// scaling-filter identities.
const CHECK_SLACK_BITS: u32 = 32;

/// Run the single-filter derivation.
pub fn run(args: DeriveArgs) -> Result<()> {
    let _cmd = info_span!("derive").entered();
    let config = DaubConfig::load(&args.config)?;
    let engine = convert::build_engine_config(&config.engine, args.bits)?;
    let order = convert::parse_filter(&args.filter)?;
    let digits = args.digits.unwrap_or(config.output.digits);
    if digits == 0 {
        bail!("--digits must be positive");
    }

    info!(order, bits = engine.precision().bits(), "deriving scaling filter");
    let filter = daubechies(order, &engine)
        .with_context(|| format!("failed to derive {}", args.filter))?;

    if args.check {
        let tolerance = engine.precision().tolerance(CHECK_SLACK_BITS);
        filter
            .verify(&tolerance)
            .with_context(|| format!("{} failed verification", args.filter))?;
        info!("scaling-filter identities hold");
    }

    let stdout = std::io::stdout();
    write_coefficients(&mut stdout.lock(), &filter, digits).context("failed to write output")?;
    Ok(())
}

/// Writes one coefficient per line at `digits` significant digits.
fn write_coefficients<W: Write>(out: &mut W, filter: &ScalingFilter, digits: usize) -> std::io::Result<()> {
    for c in filter.coeffs() {
        writeln!(out, "{}", c.to_significant(digits))?;
    }
    Ok(())
}
