//! Table command: derive a range of orders and write one fragment per order.

use std::path::Path;

use anyhow::{Context, Result, bail};
use rayon::prelude::*;
use tracing::{error, info, info_span};

use daub_wavelet::{EngineConfig, daubechies};

use crate::cli::TableArgs;
use crate::config::DaubConfig;
use crate::convert;
use crate::render;

/// Run the order sweep.
pub fn run(args: TableArgs) -> Result<()> {
    let _cmd = info_span!("table").entered();
    let config = DaubConfig::load(&args.config)?;
    let engine = convert::build_engine_config(&config.engine, None)?;
    let min = args.min.unwrap_or(config.output.min_order);
    let max = args.max.unwrap_or(config.output.max_order);
    let orders = convert::order_range(min, max)?;
    let digits = config.output.literal_digits;
    convert::validate_digits(&digits)?;
    let dir = args.output.unwrap_or(config.output.dir);

    std::fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create output directory: {}", dir.display()))?;
    info!(n_orders = orders.len(), min, max, dir = %dir.display(), "deriving coefficient tables");

    let failures = sweep(&orders, &engine, &dir, digits);
    if !failures.is_empty() {
        let list: Vec<String> = failures.iter().map(|(n, _)| n.to_string()).collect();
        bail!(
            "{} of {} orders failed: {}",
            failures.len(),
            orders.len(),
            list.join(", ")
        );
    }
    info!(n_orders = orders.len(), "all tables written");
    Ok(())
}

/// Derives and writes every order in parallel. Each order is independent; a
/// failure is logged and collected without stopping the others.
fn sweep(
    orders: &[usize],
    engine: &EngineConfig,
    dir: &Path,
    digits: [usize; 4],
) -> Vec<(usize, anyhow::Error)> {
    let outcomes: Vec<(usize, Result<()>)> = orders
        .par_iter()
        .map(|&order| (order, derive_and_write(order, engine, dir, digits)))
        .collect();

    outcomes
        .into_iter()
        .filter_map(|(order, outcome)| match outcome {
            Ok(()) => None,
            Err(e) => {
                error!(order, "{e:#}");
                Some((order, e))
            }
        })
        .collect()
}

fn derive_and_write(order: usize, engine: &EngineConfig, dir: &Path, digits: [usize; 4]) -> Result<()> {
    let filter = daubechies(order, engine)
        .with_context(|| format!("failed to derive daub{order:02}"))?;
    let path = render::write_fragment(dir, &filter, digits)?;
    info!(order, path = %path.display(), "fragment written");
    Ok(())
}
