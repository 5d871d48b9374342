//! Pure conversion functions: TOML config structs -> crate API config types.

use anyhow::{Context, Result, bail};

use daub_precision::Precision;
use daub_wavelet::{EngineConfig, parse_order, validate_order};

use crate::config::EngineToml;

/// Builds an [`EngineConfig`] from the TOML engine section.
///
/// `bits_override` replaces `precision_bits` when set.
pub fn build_engine_config(engine: &EngineToml, bits_override: Option<u32>) -> Result<EngineConfig> {
    let bits = bits_override.unwrap_or(engine.precision_bits);
    let precision = Precision::from_bits(bits).context("invalid precision_bits")?;
    let cfg = EngineConfig::new(precision)
        .with_guard_bits(engine.guard_bits)
        .with_max_steps(engine.max_steps)
        .with_extra_bits(engine.extra_bits);
    cfg.validate().context("invalid [engine] settings")?;
    Ok(cfg)
}

/// Parses a filter name into a validated order.
pub fn parse_filter(name: &str) -> Result<usize> {
    let order = parse_order(name)?;
    validate_order(order).with_context(|| format!("invalid filter {name:?}"))?;
    Ok(order)
}

/// Expands an inclusive order range into every even order it contains.
pub fn order_range(min: usize, max: usize) -> Result<Vec<usize>> {
    if min < 2 {
        bail!("min_order must be at least 2, got {min}");
    }
    if max < min {
        bail!("max_order ({max}) must not be below min_order ({min})");
    }
    let start = min + min % 2;
    Ok((start..=max).step_by(2).collect())
}

/// Checks the rendered literal digit counts.
pub fn validate_digits(digits: &[usize]) -> Result<()> {
    if let Some(&d) = digits.iter().find(|&&d| d == 0) {
        bail!("significant digit counts must be positive, got {d}");
    }
    Ok(())
}
