use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::info;

/// Top-level `daub.toml` configuration.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct DaubConfig {
    /// Derivation engine settings.
    #[serde(default)]
    pub engine: EngineToml,

    /// Output settings.
    #[serde(default)]
    pub output: OutputToml,
}

impl DaubConfig {
    /// Reads `path`, falling back to defaults when the file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }
        let toml_str = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        toml::from_str(&toml_str)
            .with_context(|| format!("failed to parse TOML config: {}", path.display()))
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EngineToml {
    #[serde(default = "default_precision_bits")]
    pub precision_bits: u32,
    #[serde(default = "default_guard_bits")]
    pub guard_bits: u32,
    #[serde(default = "default_max_steps")]
    pub max_steps: usize,
    #[serde(default = "default_extra_bits")]
    pub extra_bits: u32,
}

impl Default for EngineToml {
    fn default() -> Self {
        Self {
            precision_bits: default_precision_bits(),
            guard_bits: default_guard_bits(),
            max_steps: default_max_steps(),
            extra_bits: default_extra_bits(),
        }
    }
}

fn default_precision_bits() -> u32 {
    512
}
fn default_guard_bits() -> u32 {
    64
}
fn default_max_steps() -> usize {
    200
}
fn default_extra_bits() -> u32 {
    64
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputToml {
    #[serde(default = "default_dir")]
    pub dir: PathBuf,
    #[serde(default = "default_min_order")]
    pub min_order: usize,
    #[serde(default = "default_max_order")]
    pub max_order: usize,
    #[serde(default = "default_digits")]
    pub digits: usize,
    /// Significant digits for the float, double, long double and float128
    /// literals of the rendered fragment.
    #[serde(default = "default_literal_digits")]
    pub literal_digits: [usize; 4],
}

impl Default for OutputToml {
    fn default() -> Self {
        Self {
            dir: default_dir(),
            min_order: default_min_order(),
            max_order: default_max_order(),
            digits: default_digits(),
            literal_digits: default_literal_digits(),
        }
    }
}

fn default_dir() -> PathBuf {
    PathBuf::from("coefficients")
}
fn default_min_order() -> usize {
    2
}
fn default_max_order() -> usize {
    58
}
fn default_digits() -> usize {
    37
}
fn default_literal_digits() -> [usize; 4] {
    [9, 17, 22, 37]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let cfg: DaubConfig = toml::from_str("").unwrap();
        assert_eq!(cfg.engine.precision_bits, 512);
        assert_eq!(cfg.engine.guard_bits, 64);
        assert_eq!(cfg.engine.max_steps, 200);
        assert_eq!(cfg.engine.extra_bits, 64);
        assert_eq!(cfg.output.dir, PathBuf::from("coefficients"));
        assert_eq!((cfg.output.min_order, cfg.output.max_order), (2, 58));
        assert_eq!(cfg.output.literal_digits, [9, 17, 22, 37]);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let cfg: DaubConfig = toml::from_str(
            r#"
            [engine]
            precision_bits = 256

            [output]
            max_order = 20
            "#,
        )
        .unwrap();
        assert_eq!(cfg.engine.precision_bits, 256);
        assert_eq!(cfg.engine.max_steps, 200);
        assert_eq!(cfg.output.max_order, 20);
        assert_eq!(cfg.output.min_order, 2);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(toml::from_str::<DaubConfig>("[engine]\nprecison_bits = 10\n").is_err());
        assert!(toml::from_str::<DaubConfig>("[plot]\n").is_err());
    }

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = DaubConfig::load(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(cfg.engine.precision_bits, 512);
    }

    #[test]
    fn load_reports_parse_errors_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("daub.toml");
        std::fs::write(&path, "[engine]\nmax_steps = \"many\"\n").unwrap();
        let err = DaubConfig::load(&path).unwrap_err();
        assert!(format!("{err:#}").contains("daub.toml"));
    }
}
